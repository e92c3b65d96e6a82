use std::f32::consts::TAU;

use anyhow::Result;
use clap::ValueEnum;
use glam::Vec3;
use photonmap::{PhotonMapBuilder, Point};
use rand::{distributions::Uniform, prelude::Distribution, Rng};

/// Direction uniformly distributed on the unit sphere
pub struct UniformUnitSphere3;

impl Distribution<Vec3> for UniformUnitSphere3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new(0., 1.);
        let z = 1.0 - 2.0 * uniform.sample(rng);
        let r = f32::sqrt(f32::max(0.0, 1.0 - z * z));
        let (s, c) = f32::sin_cos(TAU * uniform.sample(rng));

        Vec3::new(r * c, r * s, z)
    }
}

/// Cosine weighted direction around +z
pub struct CosineHemisphere3;

impl Distribution<Vec3> for CosineHemisphere3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new(0., 1.);
        let r = f32::sqrt(uniform.sample(rng));
        let (s, c) = f32::sin_cos(TAU * uniform.sample(rng));
        let (x, y) = (r * c, r * s);

        Vec3::new(x, y, f32::sqrt(f32::max(0.0, 1.0 - x * x - y * y)))
    }
}

/// Synthetic photon layouts used to exercise the map
#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum AvailableDistribution {
    /// Photons on the `y = 0` square `[-1, 1]^2`, falling with a cosine weighted tilt
    #[default]
    Floor,
    /// Photons at `(i, 0, 0)`, falling straight down
    Line,
    /// Photons in the unit cube with uniformly random directions
    Cloud,
}

impl AvailableDistribution {
    /// Stores photons of unit power until the builder is full.
    pub fn fill(self, builder: &mut PhotonMapBuilder, rng: &mut impl Rng) -> Result<()> {
        for i in 0..builder.capacity() - builder.len() {
            let (position, direction) = match self {
                AvailableDistribution::Floor => {
                    let p = Point::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));
                    let Vec3 { x, y, z } = CosineHemisphere3.sample(rng);
                    // around -y
                    (p, Vec3::new(x, -z, y))
                }
                AvailableDistribution::Line => (Point::new(i as f32, 0.0, 0.0), Vec3::NEG_Y),
                AvailableDistribution::Cloud => {
                    let p = Point::new(rng.gen(), rng.gen(), rng.gen());
                    (p, UniformUnitSphere3.sample(rng))
                }
            };
            builder.store(position, direction, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use photonmap::PhotonMap;
    use rand::{prelude::Distribution, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    use super::{AvailableDistribution, CosineHemisphere3, UniformUnitSphere3};

    #[test]
    fn directions_test() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        for _ in 0..1000 {
            let d = UniformUnitSphere3.sample(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-4);
            let h = CosineHemisphere3.sample(&mut rng);
            assert!((h.length() - 1.0).abs() < 1e-4);
            assert!(h.z >= 0.0);
        }
    }

    #[test]
    fn fill_test() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for distribution in [
            AvailableDistribution::Floor,
            AvailableDistribution::Line,
            AvailableDistribution::Cloud,
        ] {
            let mut builder = PhotonMap::builder(500);
            distribution.fill(&mut builder, &mut rng).unwrap();
            assert!(builder.is_full());
            let map = builder.balance();
            match distribution {
                AvailableDistribution::Floor => {
                    assert!((1..=500).all(|i| map.photon(i).position.vec().y == 0.0));
                }
                AvailableDistribution::Line => {
                    assert!((1..=500).all(|i| map.photon(i).direction().dot(Vec3::Y) < 0.0));
                    assert_eq!(map.bounds().max.vec().x, 499.0);
                }
                AvailableDistribution::Cloud => {
                    assert!((1..=500).all(|i| map.bounds().contains(map.photon(i).position)));
                }
            }
        }
    }
}
