mod scatter;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use glam::Vec3;
use photonmap::{
    utils::{counter, timer::timed_scope_log},
    PhotonMap, Point,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use scatter::AvailableDistribution;

#[derive(Debug, Default, Clone, Copy, ValueEnum)]
pub enum ExecutionMode {
    #[default]
    Multithreaded,
    Monothreaded,
}

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(short = 'n', long, default_value_t = 200_000)]
    /// Number of photons stored in the map
    photons: usize,

    #[arg(short, long, value_enum, default_value_t)]
    /// Photon layout
    distribution: AvailableDistribution,

    #[arg(short, long, default_value_t = 10_000)]
    /// Number of irradiance estimates to compute
    queries: usize,

    #[arg(short, long, default_value_t = 50)]
    /// Maximum number of photons gathered per estimate
    k: usize,

    #[arg(short, long, default_value_t = 0.1)]
    /// Radius of the photon search around each shading point
    max_distance: f32,

    #[arg(short, long, value_enum, default_value_t)]
    execution_mode: ExecutionMode,

    #[arg(long, default_value_t)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the run is deterministic.
    seed: u64,
}

/// Shading points spread over the photon bounds, on the plane at mid height
/// facing up.
fn shading_points(map: &PhotonMap, count: usize, rng: &mut impl Rng) -> Vec<(Point, Vec3)> {
    let bounds = map.bounds();
    let (min, max) = (bounds.min.vec(), bounds.max.vec());
    let y = 0.5 * (min.y + max.y);
    (0..count)
        .map(|_| {
            let p = Point::new(rng.gen_range(min.x..=max.x), y, rng.gen_range(min.z..=max.z));
            (p, Vec3::Y)
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if !(args.max_distance > 0.0) {
        anyhow::bail!("--max-distance must be positive, got {}", args.max_distance);
    }

    let mut rng = Xoshiro256StarStar::seed_from_u64(args.seed);

    log::info!("storing {} photons ({:?})", args.photons, args.distribution);
    let mut builder = PhotonMap::builder(args.photons);
    timed_scope_log("Store photons", || args.distribution.fill(&mut builder, &mut rng)).res?;
    builder.scale_power(1.0 / args.photons.max(1) as f32);
    let map = builder.balance();

    if map.is_empty() {
        log::warn!("no photons stored, nothing to estimate");
        return Ok(());
    }

    let points = shading_points(&map, args.queries, &mut rng);
    log::info!(
        "estimating irradiance at {} points (k = {}, max distance = {})",
        points.len(),
        args.k,
        args.max_distance
    );
    let estimates = timed_scope_log("Irradiance estimates", || match args.execution_mode {
        ExecutionMode::Multithreaded => map.irradiance_estimates(&points, args.max_distance, args.k),
        ExecutionMode::Monothreaded => points
            .iter()
            .map(|&(p, n)| map.irradiance_estimate(p, n, args.max_distance, args.k))
            .collect::<Vec<f32>>(),
    })
    .res;

    let zeros = estimates.iter().filter(|&&e| e == 0.0).count();
    let (min, max) = estimates
        .iter()
        .fold((f32::INFINITY, 0.0f32), |(lo, hi), &e| (lo.min(e), hi.max(e)));
    let mean = estimates.iter().sum::<f32>() / estimates.len().max(1) as f32;
    log::info!("irradiance: min {min}, mean {mean}, max {max}");
    log::info!(
        "{zeros}/{} estimates are 0 (fewer than {} photons in range or none arriving from above)",
        estimates.len(),
        photonmap::MIN_PHOTONS_FOR_ESTIMATE
    );

    log::info!("Done");
    counter::report_counters();
    Ok(())
}
