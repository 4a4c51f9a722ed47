//! Geometric primitives for family-tree layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in chart space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Interval`] - A closed horizontal span, used for subtree extents
//!
//! # Coordinate System
//!
//! Coordinates follow SVG conventions:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Generations grow downward; siblings are packed left to right.

/// A 2D point in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use famtree_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// A rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the horizontal extent of the bounds as an [`Interval`]
    pub fn horizontal(self) -> Interval {
        Interval::new(self.min_x, self.max_x)
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A closed horizontal interval `[min, max]`.
///
/// Subtree extents are intervals: the layout packs sibling intervals side by
/// side and unions a parent's footprint with its children's span.
///
/// # Examples
///
/// ```
/// # use famtree_core::geometry::Interval;
/// let left = Interval::new(0.0, 100.0);
/// let right = Interval::new(140.0, 240.0);
///
/// let span = left.merge(right);
/// assert_eq!(span.center(), 120.0);
/// assert!(span.contains(left) && span.contains(right));
///
/// let shifted = left.translate(20.0);
/// assert_eq!(shifted.min(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Interval {
    min: f32,
    max: f32,
}

impl Interval {
    /// Creates an interval; the endpoints are swapped if given in reverse.
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Creates an interval of the given width centered on `center`.
    pub fn centered(center: f32, width: f32) -> Self {
        let half = width / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn min(self) -> f32 {
        self.min
    }

    pub fn max(self) -> f32 {
        self.max
    }

    pub fn width(self) -> f32 {
        self.max - self.min
    }

    pub fn center(self) -> f32 {
        (self.min + self.max) / 2.0
    }

    /// Moves the interval by `offset` along the x axis.
    pub fn translate(self, offset: f32) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Smallest interval covering both.
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns true if `other` lies entirely within this interval.
    pub fn contains(self, other: Self) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Returns true if the two intervals share more than an endpoint.
    pub fn overlaps(self, other: Self) -> bool {
        self.min < other.max && other.min < self.max
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));

        assert_approx_eq!(f32, bounds.min_x(), 10.0);
        assert_approx_eq!(f32, bounds.min_y(), 20.0);
        assert_approx_eq!(f32, bounds.max_x(), 40.0);
        assert_approx_eq!(f32, bounds.max_y(), 60.0);
        assert_approx_eq!(f32, bounds.width(), 30.0);
        assert_approx_eq!(f32, bounds.height(), 40.0);
        assert_eq!(bounds.horizontal(), Interval::new(10.0, 40.0));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(5.0, -5.0), Size::new(20.0, 5.0));
        let merged = a.merge(&b);

        assert_approx_eq!(f32, merged.min_x(), 0.0);
        assert_approx_eq!(f32, merged.min_y(), -5.0);
        assert_approx_eq!(f32, merged.max_x(), 25.0);
        assert_approx_eq!(f32, merged.max_y(), 10.0);
    }

    #[test]
    fn test_interval_new_normalizes() {
        let interval = Interval::new(5.0, -5.0);
        assert_approx_eq!(f32, interval.min(), -5.0);
        assert_approx_eq!(f32, interval.max(), 5.0);
        assert_approx_eq!(f32, interval.width(), 10.0);
    }

    #[test]
    fn test_interval_centered() {
        let interval = Interval::centered(100.0, 40.0);
        assert_approx_eq!(f32, interval.min(), 80.0);
        assert_approx_eq!(f32, interval.max(), 120.0);
        assert_approx_eq!(f32, interval.center(), 100.0);
    }

    #[test]
    fn test_interval_overlaps() {
        let a = Interval::new(0.0, 10.0);
        assert!(a.overlaps(Interval::new(5.0, 15.0)));
        assert!(!a.overlaps(Interval::new(10.0, 20.0)));
        assert!(!a.overlaps(Interval::new(30.0, 40.0)));
    }

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(10.0, 4.0));
        assert_approx_eq!(f32, mid.x(), 5.0);
        assert_approx_eq!(f32, mid.y(), 2.0);
    }
}
