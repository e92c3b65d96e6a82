use glam::Vec3;
use log::info;

use crate::{
    balance,
    error::PhotonMapError,
    math::{bounds::Bounds, point::Point},
    photon::Photon,
    store::PhotonStore,
    utils::timer::timed_scope_log,
};

/// A photon map that is still being filled.
///
/// Photons can only be added here; lookups need the [`PhotonMap`] returned by
/// [`balance`](Self::balance).
pub struct PhotonMapBuilder {
    store: PhotonStore,
}

impl PhotonMapBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            store: PhotonStore::new(capacity),
        }
    }

    /// Records a photon arriving at `position` along `direction` with `power`.
    ///
    /// Fails once `capacity` photons have been stored.
    pub fn store(&mut self, position: Point, direction: Vec3, power: f32) -> Result<(), PhotonMapError> {
        self.store.store(position, direction, power)
    }

    /// Multiplies the power of every photon stored so far, typically by
    /// `1 / emitted photons`.
    pub fn scale_power(&mut self, factor: f32) {
        self.store.scale_power(factor);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    pub fn bounds(&self) -> Bounds {
        self.store.bounds()
    }

    /// Arranges the photons into a kd-tree, freezing the map.
    pub fn balance(self) -> PhotonMap {
        let Self { mut store } = self;
        info!(
            "balancing photon map: {} photons, bounds {:?}",
            store.len(),
            store.bounds()
        );
        let leaf_start = timed_scope_log("Balance photon map", || balance::balance(&mut store)).res;

        PhotonMap { store, leaf_start }
    }
}

/// A balanced photon map.
///
/// The photons form an implicit kd-tree: the root is photon 1 and the
/// children of photon `i` are photons `2i` and `2i + 1`. The map can be
/// shared between threads for concurrent lookups.
pub struct PhotonMap {
    store: PhotonStore,
    leaf_start: usize,
}

impl PhotonMap {
    pub fn builder(capacity: usize) -> PhotonMapBuilder {
        PhotonMapBuilder::new(capacity)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// `len / 2 - 1`, or 0 for fewer than two photons. Every photon below it
    /// has both children.
    pub fn leaf_start(&self) -> usize {
        self.leaf_start
    }

    pub fn bounds(&self) -> Bounds {
        self.store.bounds()
    }

    /// Photon at tree node `index`, in `1..=len`
    pub fn photon(&self, index: usize) -> Photon {
        self.store.get(index)
    }

    /// See [`PhotonMapBuilder::scale_power`]. Needs exclusive access, so it
    /// cannot race with lookups.
    pub fn scale_power(&mut self, factor: f32) {
        self.store.scale_power(factor);
    }

    pub(crate) fn store(&self) -> &PhotonStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::PhotonMap;
    use crate::{error::PhotonMapError, math::point::Point};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn lifecycle_test() {
        assert_send_sync::<PhotonMap>();

        let mut builder = PhotonMap::builder(50);
        assert_eq!(builder.capacity(), 50);
        for i in 0..50 {
            builder
                .store(Point::new(i as f32, (i % 7) as f32, 0.0), Vec3::NEG_Y, 2.0)
                .unwrap();
        }
        assert!(builder.is_full());
        assert_eq!(
            builder.store(Point::ORIGIN, Vec3::NEG_Y, 2.0),
            Err(PhotonMapError::CapacityExhausted { capacity: 50 })
        );
        builder.scale_power(0.5);
        let bounds = builder.bounds();

        let map = builder.balance();
        assert_eq!(map.len(), 50);
        assert_eq!(map.leaf_start(), 24);
        assert_eq!(map.bounds(), bounds);
        assert!((1..=50).all(|i| map.photon(i).power == 1.0));
        assert!((1..=50).all(|i| bounds.contains(map.photon(i).position)));
    }

    #[test]
    fn tree_shape_test() {
        for n in [0, 1, 2, 5, 33, 128] {
            let mut builder = PhotonMap::builder(n);
            for i in 0..n {
                builder
                    .store(Point::new((i * 37 % 11) as f32, i as f32, 0.5), Vec3::Y, 1.0)
                    .unwrap();
            }
            let map = builder.balance();
            assert_eq!(map.is_empty(), n == 0);
            for i in 1..map.leaf_start() {
                assert!(2 * i + 1 <= map.len());
            }
        }
    }
}
