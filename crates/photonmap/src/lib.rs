//! Photon map: a balanced kd-tree over stored photons, built once and then
//! queried for density based irradiance estimates.
//!
//! Photons are pushed into a [`PhotonMapBuilder`] while tracing. Calling
//! [`PhotonMapBuilder::balance`] turns it into a read-only [`PhotonMap`] that
//! can be shared between shading threads.

pub mod balance;
pub mod error;
pub mod map;
pub mod math;
pub mod photon;
pub mod query;
pub mod store;
pub mod utils;

pub use error::PhotonMapError;
pub use map::{PhotonMap, PhotonMapBuilder};
pub use math::{axis::Axis, bounds::Bounds, direction::PackedDirection, point::Point};
pub use photon::Photon;
pub use query::{NearestPhotons, MIN_PHOTONS_FOR_ESTIMATE};
