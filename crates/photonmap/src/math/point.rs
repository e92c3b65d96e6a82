use std::ops::{Add, Sub};

use glam::Vec3;

use super::axis::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub Vec3);

impl Point {
    pub const ORIGIN: Point = Point(Vec3::ZERO);

    pub fn vec(self) -> Vec3 {
        self.0
    }

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    #[inline]
    pub fn coord(self, axis: Axis) -> f32 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        self.0.distance_squared(other.0)
    }

    /// Component-wise minimum
    pub fn min(self, other: Point) -> Point {
        Point(self.0.min(other.0))
    }

    /// Component-wise maximum
    pub fn max(self, other: Point) -> Point {
        Point(self.0.max(other.0))
    }
}

impl From<Vec3> for Point {
    fn from(v: Vec3) -> Self {
        Point(v)
    }
}

impl From<[f32; 3]> for Point {
    fn from(a: [f32; 3]) -> Self {
        Point(Vec3::from_array(a))
    }
}

impl Add<Vec3> for Point {
    type Output = Self;

    fn add(self, rhs: Vec3) -> Self::Output {
        Point(self.vec() + rhs)
    }
}

impl Sub<Vec3> for Point {
    type Output = Self;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Point(self.vec() - rhs)
    }
}

/// We can sub two points but not add them
impl Sub for Point {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        self.vec() - rhs.vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Point};

    #[test]
    fn coord_test() {
        let p = Point::new(1.0, -2.0, 3.5);
        assert_eq!(p.coord(Axis::X), 1.0);
        assert_eq!(p.coord(Axis::Y), -2.0);
        assert_eq!(p.coord(Axis::Z), 3.5);
    }

    #[test]
    fn distance_squared_test() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!((b - a).length(), 5.0);
    }
}
