//! Defines all the units relevant to layout: points, inches, pixels
//!
//! This module defines common units and conventional conversion factors between these (between pt and inches, inches and pixels, etc)

// ------------------------- BASIC UNITS --------------------------------

/// Font sizes in markup are usually given in points, e.g. `\fontsize{12}` or the default 10 pt.
///
/// Standardly, 1pt is set to 1 / 72 inch (DeskTop Publishing Point). Inches are physical units (i.e. you can measure with a ruler).
/// It is difficult to convert from physical units to pixels without knowledge of the display used so we only guarantee the standard of 96 PPI screen.
/// Cf [`Inch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pt;

/// This is the dimension relevant for printing ; this is a physical dimension used for e.g paper or the size of a computer screen (e.g. 20'' monitor)
///
/// To connect the numeric measures to the physical measures, we use the number of **pixels per inch**.
/// Because we don't know what screen the person is using we assume a standard PPI of 96 throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inch;


/// Device pixel, the unit in which every graphics backend is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Px;


// ------------------- UNIT COMBINATORS -------------------------

/// If U is a unit and V is a unit, Ratio<U, V> is the unit U . V⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<U, V> {
	_numerator    : std::marker::PhantomData<U>,
	_denominator  : std::marker::PhantomData<V>,
}


impl<U, V> Ratio<U, V> {
	/// Creates new ratio unit
	pub const fn new() -> Self {
		Self {
			_numerator:   std::marker::PhantomData,
			_denominator: std::marker::PhantomData
		}
	}
}
