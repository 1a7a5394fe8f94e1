//! Types for quantities with units (points, pixels, em)
//!
//! This allows for compile-time checking of unit errors.
//! Font sizes in an [`Environment`](crate::environment::Environment) may be given in points or in device pixels,
//! layout always happens in pixels: a function requiring a pixel length asks for a [`Unit<Px>`].


use std::ops::{Add, Sub, Mul, AddAssign, SubAssign, Div, Neg};
use std::cmp::{PartialEq, PartialOrd};
use std::fmt::{Display, Debug};
use std::iter::Sum;

use self::units::{Ratio, Inch, Px, Pt};
pub mod units;

/// A f64 value with its unit represented in the type
#[derive(Serialize, Deserialize)]
pub struct Unit<U> {
    value : f64,
    #[serde(skip)]
    _phantom : std::marker::PhantomData<U>,
}


impl<U> PartialEq for Unit<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl<U> PartialOrd for Unit<U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U> Clone for Unit<U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for Unit<U> {}
impl<U> Debug for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<U>();
        write!(f, "Unit::<{}>::new({})", type_name, self.value)
    }
}

impl<U> Display for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.value, f)
    }
}

impl<U> Default for Unit<U> {
    fn default() -> Self {
        Self::ZERO
    }
}


impl Unit<Ratio<Px, Inch>> {
    /// Standard value used for pixel per inch. Cf [`Inch`] for more explanation
    pub const STANDARD_PPI : Self = Self::new(96.);
}

impl Unit<Ratio<Inch, Pt>> {
    /// 1 pt = 1 / 72 in. Cf [`Pt`] for more explanation
    pub const DTP : Self = Self::new(1. / 72.);
}

impl Unit<Ratio<Px, Pt>> {
    /// A standard conversion between points and pixels: [`Unit::DTP`] followed by [`Unit::STANDARD_PPI`]
    pub fn standard_pt_to_px() -> Self {
        let one_pt = Unit::<Pt>::new(1.);
        one_pt * Unit::DTP * Unit::STANDARD_PPI / one_pt
    }
}

impl<U> Unit<U> {
    /// The zero value
    pub const ZERO : Self = Self::new(0.);

    /// Creates a value with unit from a unit-less value.
    /// To be used with care: you need to manually check that the value you pass is indeed in the right dimension.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData
        }
    }

    /// Is quantity equal to zero?
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    /// Converts a value to a unit-less value ("unsafe" since it removes information about dimensions)
    #[inline]
    pub const fn to_unitless(self) -> f64
    { self.value }

    /// Like [`Unit::to_unitless`] but explicitly asks for the dimension to avoid errors
    #[inline]
    pub fn unitless(self, _unit : U) -> f64
    { self.to_unitless() }

    /// Multiply value by a unitless value
    pub fn scale(self, scale : f64) -> Self {
        Self::new(self.value * scale)
    }

    /// Equivalent to [`f64::min`] for values with units
    pub fn min(self, other : Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    /// Equivalent to [`f64::max`] for values with units
    pub fn max(self, other : Self) -> Self {
        Self::new(self.value.max(other.value))
    }

    /// Equivalent to [`f64::abs`] for values with units
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }
}

impl<U> Add for Unit<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value)
    }
}

impl<U> Sub for Unit<U> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<U> Neg for Unit<U> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(- self.value)
    }
}

impl<U> AddAssign for Unit<U> {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<U> SubAssign for Unit<U> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<U, V> Mul<Unit<Ratio<U, V>>> for Unit<V> {
    type Output = Unit<U>;

    fn mul(self, rhs: Unit<Ratio<U, V>>) -> Self::Output {
        Unit::<U>::new(self.value * rhs.value)
    }
}

impl<U, V> Div<Unit<V>> for Unit<U> {
    type Output = Unit<Ratio<U, V>>;

    fn div(self, rhs: Unit<V>) -> Self::Output {
        Unit::<Ratio<U, V>>::new(self.value / rhs.value)
    }
}

impl<U> From<f64> for Unit<U> {
    fn from(x: f64) -> Self
    { Unit::new(x) }
}

impl<U> Sum for Unit<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(
            Unit::ZERO,
            |a, b| a + b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_to_px_is_four_thirds() {
        let nine_pt = Unit::<Pt>::new(9.);
        let px = nine_pt * Unit::standard_pt_to_px();
        assert!((px.to_unitless() - 12.).abs() < 1e-9);

        let inch = Unit::<Pt>::new(72.) * Unit::DTP * Unit::STANDARD_PPI;
        assert!((inch.to_unitless() - 96.).abs() < 1e-9);
    }
}
