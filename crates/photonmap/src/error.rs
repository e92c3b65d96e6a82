use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotonMapError {
    #[error("photon map is full ({capacity} photons stored)")]
    CapacityExhausted { capacity: usize },
}
