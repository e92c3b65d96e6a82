use glam::Vec3;

use super::{axis::Axis, point::Point};

/// Axis Aligned Bounding Box
///
/// An empty box has `min = +inf` and `max = -inf` so that extending it by a
/// point yields the degenerate box around that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: Point(Vec3::INFINITY),
        max: Point(Vec3::NEG_INFINITY),
    };

    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn is_empty(&self) -> bool {
        let Vec3 { x, y, z } = self.max - self.min;
        !(x >= 0.0 && y >= 0.0 && z >= 0.0)
    }

    pub fn extend(&mut self, point: Point) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Axis along which the box is the widest.
    ///
    /// Ties are broken towards the last axis: x needs to be strictly wider than
    /// both y and z, y strictly wider than z. A box with no extent picks z.
    pub fn widest_axis(&self) -> Axis {
        let Vec3 { x, y, z } = self.extent();
        if x > y && x > z {
            Axis::X
        } else if y > z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Copy of this box whose upper bound on `axis` is `value`
    pub fn with_max(mut self, axis: Axis, value: f32) -> Self {
        self.max.0[axis.index()] = value;
        self
    }

    /// Copy of this box whose lower bound on `axis` is `value`
    pub fn with_min(mut self, axis: Axis, value: f32) -> Self {
        self.min.0[axis.index()] = value;
        self
    }

    pub fn contains(&self, point: Point) -> bool {
        let p = point.vec();
        p.cmpge(self.min.vec()).all() && p.cmple(self.max.vec()).all()
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Bounds, Point};

    #[test]
    fn extend_test() {
        let mut b = Bounds::EMPTY;
        assert!(b.is_empty());
        b.extend(Point::new(1.0, -1.0, 0.0));
        assert!(!b.is_empty());
        assert_eq!(b.min, b.max);
        b.extend(Point::new(-2.0, 3.0, 0.5));
        assert_eq!(b, Bounds::from_points(Point::new(-2.0, -1.0, 0.0), Point::new(1.0, 3.0, 0.5)));
        assert!(b.contains(Point::new(0.0, 0.0, 0.25)));
        assert!(!b.contains(Point::new(0.0, 0.0, 0.75)));
    }

    #[test]
    fn widest_axis_test() {
        let b = |x, y, z| Bounds::from_points(Point::ORIGIN, Point::new(x, y, z));
        assert_eq!(b(3.0, 1.0, 2.0).widest_axis(), Axis::X);
        assert_eq!(b(1.0, 3.0, 2.0).widest_axis(), Axis::Y);
        assert_eq!(b(1.0, 2.0, 3.0).widest_axis(), Axis::Z);
        // ties
        assert_eq!(b(2.0, 2.0, 1.0).widest_axis(), Axis::Y);
        assert_eq!(b(2.0, 1.0, 2.0).widest_axis(), Axis::Z);
        assert_eq!(b(0.0, 0.0, 0.0).widest_axis(), Axis::Z);
    }

    #[test]
    fn narrowing_is_by_value_test() {
        let b = Bounds::from_points(Point::ORIGIN, Point::new(4.0, 4.0, 4.0));
        let left = b.with_max(Axis::Y, 1.0);
        let right = b.with_min(Axis::Y, 1.0);
        assert_eq!(left.max, Point::new(4.0, 1.0, 4.0));
        assert_eq!(right.min, Point::new(0.0, 1.0, 0.0));
        assert_eq!(b.max, Point::new(4.0, 4.0, 4.0));
        assert_eq!(b.min, Point::ORIGIN);
    }
}
