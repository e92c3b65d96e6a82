use glam::Vec3;

use crate::{
    error::PhotonMapError,
    math::{axis::Axis, bounds::Bounds, direction::PackedDirection, point::Point},
    photon::Photon,
};

/// Fixed capacity, column oriented photon storage.
///
/// Photons live in slots `1..=len`. Slot 0 is scratch space for the balancer
/// so that tree indices can start at 1.
pub struct PhotonStore {
    capacity: usize,
    positions: Vec<Point>,
    powers: Vec<f32>,
    directions: Vec<PackedDirection>,
    planes: Vec<Axis>,
    bounds: Bounds,
}

impl PhotonStore {
    pub fn new(capacity: usize) -> Self {
        let mut this = Self {
            capacity,
            positions: Vec::with_capacity(capacity + 1),
            powers: Vec::with_capacity(capacity + 1),
            directions: Vec::with_capacity(capacity + 1),
            planes: Vec::with_capacity(capacity + 1),
            bounds: Bounds::EMPTY,
        };
        this.push(Photon {
            position: Point::ORIGIN,
            power: 0.0,
            direction: PackedDirection::default(),
            plane: Axis::default(),
        });
        this
    }

    fn push(&mut self, photon: Photon) {
        self.positions.push(photon.position);
        self.powers.push(photon.power);
        self.directions.push(photon.direction);
        self.planes.push(photon.plane);
    }

    /// Appends a photon and grows the bounding box around it.
    pub fn store(&mut self, position: Point, direction: Vec3, power: f32) -> Result<(), PhotonMapError> {
        if self.is_full() {
            return Err(PhotonMapError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        self.push(Photon::new(position, direction, power));
        self.bounds.extend(position);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Bounding box of every photon stored so far
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn get(&self, index: usize) -> Photon {
        Photon {
            position: self.position(index),
            power: self.power(index),
            direction: self.packed_direction(index),
            plane: self.plane(index),
        }
    }

    #[inline]
    pub fn position(&self, index: usize) -> Point {
        self.positions[self.slot(index)]
    }

    #[inline]
    pub fn coord(&self, index: usize, axis: Axis) -> f32 {
        self.position(index).coord(axis)
    }

    pub fn x(&self, index: usize) -> f32 {
        self.coord(index, Axis::X)
    }

    pub fn y(&self, index: usize) -> f32 {
        self.coord(index, Axis::Y)
    }

    pub fn z(&self, index: usize) -> f32 {
        self.coord(index, Axis::Z)
    }

    #[inline]
    pub fn power(&self, index: usize) -> f32 {
        self.powers[self.slot(index)]
    }

    #[inline]
    pub fn plane(&self, index: usize) -> Axis {
        self.planes[self.slot(index)]
    }

    pub fn packed_direction(&self, index: usize) -> PackedDirection {
        self.directions[self.slot(index)]
    }

    pub fn direction(&self, index: usize) -> Vec3 {
        self.packed_direction(index).decode()
    }

    pub fn set_plane(&mut self, index: usize, axis: Axis) {
        let slot = self.slot(index);
        self.planes[slot] = axis;
    }

    /// Overwrites the whole record in slot `dst` with the one in slot `src`.
    ///
    /// Slot 0 is a valid source and destination.
    pub fn copy(&mut self, src: usize, dst: usize) {
        self.positions[dst] = self.positions[src];
        self.powers[dst] = self.powers[src];
        self.directions[dst] = self.directions[src];
        self.planes[dst] = self.planes[src];
    }

    pub fn scale_power(&mut self, factor: f32) {
        for power in &mut self.powers[1..] {
            *power *= factor;
        }
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        debug_assert!(
            (1..=self.len()).contains(&index),
            "photon index {index} out of 1..={}",
            self.len()
        );
        index
    }
}
