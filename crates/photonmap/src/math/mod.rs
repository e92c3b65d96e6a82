pub mod axis;
pub mod bounds;
pub mod direction;
pub mod point;

pub use glam::Vec3;
