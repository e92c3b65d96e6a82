use glam::Vec3;

use crate::math::{axis::Axis, direction::PackedDirection, point::Point};

/// A stored light transport event.
///
/// This is the logical view of one slot of a [`PhotonStore`](crate::store::PhotonStore),
/// which keeps the fields in separate columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    pub position: Point,
    pub power: f32,
    /// Incoming direction
    pub direction: PackedDirection,
    /// Splitting plane of the subtree rooted at this photon, only meaningful for
    /// interior nodes of a balanced map
    pub plane: Axis,
}

impl Photon {
    pub fn new(position: Point, direction: Vec3, power: f32) -> Self {
        Self {
            position,
            power,
            direction: PackedDirection::encode(direction),
            plane: Axis::default(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction.decode()
    }
}
