//! Defines geometric primitives
//! Currently only defines bbox

use std::ops::Mul;

use crate::dimensions::Unit;

/// A generic bounding box for a 2D coordinate system, parameterized by unit type.
///
/// The coordinate system is the device one: x grows to the right, y grows downwards.
/// When used to store typographical measurements (e.g. the tight bounding box of a string), the origin is the start of the baseline,
/// so a box going above the baseline has a negative `y_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox<U> {
    /// minimal x-value
    pub x_min : Unit<U>,
    /// maximal x-value
    pub x_max : Unit<U>,
    /// minimal y-value
    pub y_min : Unit<U>,
    /// maximal y-value
    pub y_max : Unit<U>,
}

impl<U> BBox<U> {
    /// Creates new bbox from coordinates of extremal points
    /// Does not check the invariant that `x_min <= x_max` and `y_min <= y_max` in release builds
    pub fn new(x_min: Unit<U>, y_min: Unit<U>, x_max: Unit<U>, y_max: Unit<U>) -> Self {
        debug_assert!(x_min <= x_max);
        debug_assert!(y_min <= y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    /// Creates a bbox, given a position for top-left corner, width and height.
    pub fn from_dims(x : Unit<U>, y : Unit<U>, width : Unit<U>, height : Unit<U>) -> Self {
        Self {
            x_min : x.min(x + width), x_max : x.max(x + width),
            y_min : y.min(y + height), y_max : y.max(y + height),
        }
    }

    /// Moves the box by `t_x` to the right and `t_y` downwards
    pub fn translate(&self, t_x : Unit<U>, t_y : Unit<U>) -> Self {
        Self {
            x_min: self.x_min + t_x,
            x_max: self.x_max + t_x,
            y_min: self.y_min + t_y,
            y_max: self.y_max + t_y,
        }
    }

    /// Creates a bbox corresponding to a zero-width zero-height point
    pub fn single_point(x : Unit<U>, y : Unit<U>) -> Self {
        Self {
            x_min : x, x_max : x,
            y_min : y, y_max : y,
        }
    }

    /// Creates the smallest bbox containing `self` and the point with coordinates `x` and `y`
    pub fn enclose(&self, x : Unit<U>, y: Unit<U>) -> Self {
        self.union(Self::single_point(x, y))
    }

    /// Creates the smallest bbox containing `self` and `other`
    pub fn union(&self, other: Self) -> Self {
        Self {
            x_min : Unit::min(self.x_min, other.x_min),
            x_max : Unit::max(self.x_max, other.x_max),
            y_min : Unit::min(self.y_min, other.y_min),
            y_max : Unit::max(self.y_max, other.y_max),
        }
    }

    /// Width of the bounding box
    pub fn width(&self) -> Unit<U> {
        self.x_max - self.x_min
    }

    /// The geometric height: the unsigned distance between the top of the box and the bottom of the box
    pub fn total_height(&self) -> Unit<U> {
        self.y_max - self.y_min
    }

    /// Converts every coordinate with a ratio, e.g. from em to pixels
    pub fn scale<V, W>(&self, scale : Unit<V>) -> BBox<W>
    where Unit<U> : Mul<Unit<V>, Output = Unit<W>>
    {
        BBox::<W> {
            x_min: self.x_min * scale,
            x_max: self.x_max * scale,
            y_min: self.y_min * scale,
            y_max: self.y_max * scale,
        }
    }

    /// Checks if 2 bboxes are approximately the same, more specifically if the two corners' four coordinates are the same up to `epsilon` of their initial value.
    pub fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        fn close<U>(a : Unit<U>, b : Unit<U>, epsilon : f64) -> bool {
            (a - b).to_unitless().abs() * 2. <= epsilon * (a.abs() + b.abs()).to_unitless()
        }
        close(self.x_min, other.x_min, epsilon) &&
        close(self.x_max, other.x_max, epsilon) &&
        close(self.y_min, other.y_min, epsilon) &&
        close(self.y_max, other.y_max, epsilon)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::units::Px;

    #[test]
    fn union_and_translate() {
        let a = BBox::<Px>::from_dims(Unit::new(0.), Unit::new(-10.), Unit::new(5.), Unit::new(12.));
        let b = BBox::<Px>::from_dims(Unit::new(3.), Unit::new(-4.), Unit::new(10.), Unit::new(2.));
        let u = a.union(b);
        assert_eq!(u.width(), Unit::new(13.));
        assert_eq!(u.total_height(), Unit::new(12.));

        let t = u.translate(Unit::new(1.), Unit::new(1.));
        assert_eq!(t.x_min, Unit::new(1.));
        assert_eq!(t.y_min, Unit::new(-9.));
        assert!(t.close_to(&t.enclose(Unit::new(2.), Unit::new(0.)), 1e-9));
    }

    #[test]
    fn from_dims_with_negative_extent() {
        let b = BBox::<Px>::from_dims(Unit::new(4.), Unit::new(0.), Unit::new(-4.), Unit::new(2.));
        assert_eq!(b.x_min, Unit::new(0.));
        assert_eq!(b.x_max, Unit::new(4.));
    }
}
