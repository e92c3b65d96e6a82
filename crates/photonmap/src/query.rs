use std::f32::consts::FRAC_1_PI;

use glam::Vec3;
use log::trace;

use crate::{
    map::PhotonMap,
    math::point::Point,
    utils::{counter::counter, timer::timed_scope_accumulate, log_once::warn_once},
};

/// Below this many neighbours an irradiance estimate is too noisy to be used
/// and [`PhotonMap::irradiance_estimate`] returns 0.
pub const MIN_PHOTONS_FOR_ESTIMATE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fewer than `limit` candidates, kept in insertion order
    Gathering,
    /// `limit` candidates arranged as a max-heap on distance
    Heap,
}

/// The closest photons found so far by a lookup.
///
/// Slot 0 of `distances` holds the current search bound, the squared radius
/// beyond which nothing is accepted. Candidates occupy slots `1..=len`. Once
/// `limit` candidates are held they are turned into a max-heap, and from then
/// on the bound is the distance of the farthest one.
#[derive(Debug, Clone)]
pub struct NearestPhotons {
    limit: usize,
    mode: Mode,
    distances: Vec<f32>,
    indices: Vec<usize>,
    /// Bound after every offer
    #[cfg(test)]
    bounds: Vec<f32>,
}

impl NearestPhotons {
    pub fn new(limit: usize, max_distance: f32) -> Self {
        let mut distances = Vec::with_capacity(limit + 1);
        let mut indices = Vec::with_capacity(limit + 1);
        distances.push(max_distance * max_distance);
        indices.push(0);

        Self {
            limit,
            mode: Mode::Gathering,
            distances,
            indices,
            #[cfg(test)]
            bounds: Vec::new(),
        }
    }

    /// Current squared search radius. Never grows.
    #[inline]
    pub fn bound(&self) -> f32 {
        self.distances[0]
    }

    pub fn len(&self) -> usize {
        self.indices.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Photon indices with their squared distance, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices[1..]
            .iter()
            .copied()
            .zip(self.distances[1..].iter().copied())
    }

    /// Offers a photon at squared distance `dist2`.
    pub fn insert(&mut self, index: usize, dist2: f32) {
        self.offer(index, dist2);
        #[cfg(test)]
        self.bounds.push(self.bound());
    }

    fn offer(&mut self, index: usize, dist2: f32) {
        if !(dist2 < self.bound()) || self.limit == 0 {
            return;
        }

        if self.len() < self.limit {
            self.distances.push(dist2);
            self.indices.push(index);
            return;
        }

        if self.mode == Mode::Gathering {
            counter!("Candidate heap promotions");
            self.build_heap();
            self.mode = Mode::Heap;
        }

        if dist2 < self.distances[1] {
            self.sift_down(1, index, dist2);
        }
        self.distances[0] = self.distances[1];
    }

    fn build_heap(&mut self) {
        for parent in (1..=self.len() / 2).rev() {
            let (index, dist2) = (self.indices[parent], self.distances[parent]);
            self.sift_down(parent, index, dist2);
        }
    }

    /// Places `(index, dist2)` at `parent`, moving it down the heap until both
    /// children are closer.
    fn sift_down(&mut self, mut parent: usize, index: usize, dist2: f32) {
        let n = self.len();
        let mut child = 2 * parent;
        while child <= n {
            if child < n && self.distances[child] < self.distances[child + 1] {
                child += 1;
            }
            if dist2 >= self.distances[child] {
                break;
            }
            self.distances[parent] = self.distances[child];
            self.indices[parent] = self.indices[child];
            parent = child;
            child *= 2;
        }
        self.distances[parent] = dist2;
        self.indices[parent] = index;
    }
}

impl PhotonMap {
    /// Collects up to `k` photons closer than `max_distance` to `position`.
    pub fn nearest_photons(&self, position: Point, max_distance: f32, k: usize) -> NearestPhotons {
        let mut nearest = NearestPhotons::new(k, max_distance);
        if !self.is_empty() {
            timed_scope_accumulate!("Nearest photons search", || self.locate(&mut nearest, position, 1));
        }
        nearest
    }

    fn locate(&self, nearest: &mut NearestPhotons, position: Point, node: usize) {
        let n = self.len();
        let store = self.store();

        if 2 * node <= n {
            let axis = store.plane(node);
            let delta = position.coord(axis) - store.coord(node, axis);
            let (near, far) = if delta > 0.0 {
                (2 * node + 1, 2 * node)
            } else {
                (2 * node, 2 * node + 1)
            };

            if near <= n {
                self.locate(nearest, position, near);
            }
            if far <= n && delta * delta < nearest.bound() {
                self.locate(nearest, position, far);
            }
        }

        nearest.insert(node, store.position(node).distance_squared(position));
    }

    /// Irradiance at a surface point from the density of nearby photons.
    ///
    /// Sums the power of the (at most `k`) nearest photons within `max_distance`
    /// that arrive against `normal`, divided by the area `pi * r^2` of the disc
    /// they were gathered from. Returns 0 when fewer than
    /// [`MIN_PHOTONS_FOR_ESTIMATE`] photons are found: there is no reliable
    /// estimate, which is not the same as no light.
    pub fn irradiance_estimate(&self, position: Point, normal: Vec3, max_distance: f32, k: usize) -> f32 {
        counter!("Irradiance estimates");
        if k < MIN_PHOTONS_FOR_ESTIMATE {
            warn_once!(
                "irradiance lookups with k = {k} can never gather the {MIN_PHOTONS_FOR_ESTIMATE} photons an estimate needs"
            );
        }

        let nearest = self.nearest_photons(position, max_distance, k);
        if nearest.len() < MIN_PHOTONS_FOR_ESTIMATE {
            counter!("Irradiance estimates with too few photons");
            return 0.0;
        }

        let store = self.store();
        let flux: f32 = nearest
            .iter()
            .filter(|&(index, _)| store.direction(index).dot(normal) < 0.0)
            .map(|(index, _)| store.power(index))
            .sum();

        trace!(
            "irradiance at {position:?}: {} photons, r2 = {}, flux = {flux}",
            nearest.len(),
            nearest.bound()
        );
        flux * FRAC_1_PI / nearest.bound()
    }

    /// [`irradiance_estimate`](Self::irradiance_estimate) for many shading
    /// points at once, spread over the rayon thread pool.
    pub fn irradiance_estimates(&self, points: &[(Point, Vec3)], max_distance: f32, k: usize) -> Vec<f32> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|&(position, normal)| self.irradiance_estimate(position, normal, max_distance, k))
            .collect()
    }
}
