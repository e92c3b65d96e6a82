use std::f32::consts::{PI, TAU};

use glam::Vec3;

const BINS: usize = 256;

lazy_static::lazy_static! {
    static ref COS_THETA: [f32; BINS] = table(|i| f32::cos(polar_of_bin(i)));
    static ref SIN_THETA: [f32; BINS] = table(|i| f32::sin(polar_of_bin(i)));
    static ref COS_PHI: [f32; BINS] = table(|i| f32::cos(azimuth_of_bin(i)));
    static ref SIN_PHI: [f32; BINS] = table(|i| f32::sin(azimuth_of_bin(i)));
}

fn table(f: impl Fn(usize) -> f32) -> [f32; BINS] {
    std::array::from_fn(f)
}

fn polar_of_bin(bin: usize) -> f32 {
    (bin as f32 + 0.5) * (PI / BINS as f32)
}

fn azimuth_of_bin(bin: usize) -> f32 {
    (bin as f32 + 0.5) * (TAU / BINS as f32)
}

/// Unit vector quantized to two bytes.
///
/// The high byte holds the polar angle `acos(z)` over `[0, pi]`, the low byte
/// the azimuth `atan2(y, x)` over `[0, 2pi)`. Decoding returns the centre of
/// the bin, so the angular error stays below 0.02 rad.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedDirection(u16);

impl PackedDirection {
    pub fn encode(dir: Vec3) -> Self {
        let dir = dir.try_normalize().unwrap_or(Vec3::Z);

        let theta = f32::acos(dir.z.clamp(-1.0, 1.0));
        let theta_bin = ((theta * (BINS as f32 / PI)) as usize).min(BINS - 1);

        let mut phi = f32::atan2(dir.y, dir.x);
        if phi < 0.0 {
            phi += TAU;
        }
        let phi_bin = ((phi * (BINS as f32 / TAU)) as usize).min(BINS - 1);

        Self(((theta_bin as u16) << 8) | phi_bin as u16)
    }

    pub fn decode(self) -> Vec3 {
        let theta = (self.0 >> 8) as usize;
        let phi = (self.0 & 0xff) as usize;
        Vec3::new(
            SIN_THETA[theta] * COS_PHI[phi],
            SIN_THETA[theta] * SIN_PHI[phi],
            COS_THETA[theta],
        )
    }

    pub fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

impl From<Vec3> for PackedDirection {
    fn from(dir: Vec3) -> Self {
        Self::encode(dir)
    }
}

impl From<PackedDirection> for Vec3 {
    fn from(dir: PackedDirection) -> Self {
        dir.decode()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    use super::PackedDirection;

    fn random_unit(rng: &mut impl Rng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let l = v.length_squared();
            if l > 1e-4 && l <= 1.0 {
                break v.normalize();
            }
        }
    }

    #[test]
    fn precision_test() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..10_000 {
            let v = random_unit(&mut rng);
            let decoded = PackedDirection::encode(v).decode();
            assert!((decoded.length() - 1.0).abs() < 1e-5);
            assert!(decoded.angle_between(v) < 0.02, "{v} -> {decoded}");
        }
    }

    #[test]
    fn axes_test() {
        for v in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let decoded = PackedDirection::encode(v).decode();
            assert!(decoded.dot(v) > 0.999, "{v} -> {decoded}");
        }
    }

    #[test]
    fn hemisphere_sign_test() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let normal = Vec3::Y;
        let mut checked = 0;
        while checked < 5_000 {
            let v = random_unit(&mut rng);
            // Keep away from the plane by more than the quantization error
            if v.dot(normal).abs() < 0.03 {
                continue;
            }
            let decoded = PackedDirection::encode(v).decode();
            assert_eq!(decoded.dot(normal) < 0.0, v.dot(normal) < 0.0);
            checked += 1;
        }
    }

    #[test]
    fn layout_test() {
        // +z is the pole, -z the antipode
        assert_eq!(PackedDirection::encode(Vec3::Z).bits() >> 8, 0);
        assert_eq!(PackedDirection::encode(Vec3::NEG_Z).bits() >> 8, 255);
        // straight down the y axis sits on the equator, three quarters around
        let down = PackedDirection::encode(Vec3::NEG_Y).bits();
        assert!((127..=128).contains(&(down >> 8)));
        assert!((191..=192).contains(&(down & 0xff)));
        assert_eq!(PackedDirection::from_bits(down).bits(), down);
    }

    #[test]
    fn degenerate_direction_test() {
        assert_eq!(PackedDirection::encode(Vec3::ZERO), PackedDirection::encode(Vec3::Z));
        assert_eq!(PackedDirection::encode(Vec3::NAN), PackedDirection::encode(Vec3::Z));
        // not normalized input is accepted
        assert_eq!(
            PackedDirection::encode(Vec3::new(0.0, -5.0, 0.0)),
            PackedDirection::encode(Vec3::NEG_Y)
        );
    }
}
