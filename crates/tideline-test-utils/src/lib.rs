//! Test utilities and mock collaborators for Tideline development.
//!
//! Provides generators for the historical inputs ([`SpinUp`],
//! [`ForestProfiles`]) and cross-shore profiles, plus mock collaborator
//! models in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tideline_core::YearGrid;
use tideline_model::{ForestProfiles, SpinUp};

/// Annual deposition per spin-up cell (g).
pub const SPIN_UP_MINERAL: f64 = 1000.0;
pub const SPIN_UP_ORGANIC_ALLOCH: f64 = 50.0;
pub const SPIN_UP_ORGANIC_AUTOCH: f64 = 150.0;

/// Uniform draw in `[0, 1)` with 53 bits of precision.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// Spin-up marsh whose platform sits at `elevation` in every year.
///
/// Each cell-year carries [`SPIN_UP_MINERAL`], [`SPIN_UP_ORGANIC_ALLOCH`]
/// and [`SPIN_UP_ORGANIC_AUTOCH`] grams.
pub fn flat_spin_up(years: usize, marsh_width: usize, elevation: f64) -> SpinUp {
    spin_up_from(YearGrid::from_fn(years, marsh_width, |_, _| elevation))
}

/// Spin-up marsh with a platform that rises `rate` metres per year from
/// `base`, with cell-to-cell jitter of up to `jitter` metres drawn from a
/// seeded ChaCha8 stream.
pub fn seeded_spin_up(
    seed: u64,
    years: usize,
    marsh_width: usize,
    base: f64,
    rate: f64,
    jitter: f64,
) -> SpinUp {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let offsets: Vec<f64> = (0..marsh_width)
        .map(|_| (unit(&mut rng) - 0.5) * jitter)
        .collect();
    spin_up_from(YearGrid::from_fn(years, marsh_width, |y, c| {
        base + rate * y as f64 + offsets[c]
    }))
}

fn spin_up_from(elevation: YearGrid) -> SpinUp {
    let (years, cells) = elevation.shape();
    let fill = |v: f64| YearGrid::from_fn(years, cells, |_, _| v);
    let mineral = fill(SPIN_UP_MINERAL);
    let alloch = fill(SPIN_UP_ORGANIC_ALLOCH);
    let autoch = fill(SPIN_UP_ORGANIC_AUTOCH);
    match SpinUp::new(elevation, mineral, alloch, autoch) {
        Ok(s) => s,
        Err(e) => panic!("fixture spin-up rejected: {e}"),
    }
}

/// Forest tables with the same value at every depth and age.
pub fn uniform_forest_profiles(
    depth_rows: usize,
    ages: usize,
    organic: f64,
    mineral: f64,
    roots: f64,
) -> ForestProfiles {
    let fill = |v: f64| YearGrid::from_fn(depth_rows, ages, |_, _| v);
    match ForestProfiles::new(fill(organic), fill(mineral), fill(roots)) {
        Ok(p) => p,
        Err(e) => panic!("fixture forest profiles rejected: {e}"),
    }
}

/// Forest tables whose organic stock grows with age and shrinks with
/// depth, perturbed by a seeded ChaCha8 stream.
pub fn seeded_forest_profiles(seed: u64, depth_rows: usize, ages: usize) -> ForestProfiles {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut noisy = |scale: f64| {
        let mut grid = YearGrid::zeros(depth_rows, ages);
        for d in 0..depth_rows {
            for a in 0..ages {
                let trend = (a + 1) as f64 / ages as f64 * (depth_rows - d) as f64;
                grid[(d, a)] = scale * trend * (0.9 + 0.2 * unit(&mut rng));
            }
        }
        grid
    };
    let organic = noisy(100.0);
    let mineral = noisy(400.0);
    let roots = noisy(20.0);
    match ForestProfiles::new(organic, mineral, roots) {
        Ok(p) => p,
        Err(e) => panic!("fixture forest profiles rejected: {e}"),
    }
}

/// Cross-shore profile: `bay_cells` at `bay_floor`, `marsh_cells` at
/// `marsh`, then `upland_cells` rising from the marsh at `slope`.
pub fn stepped_profile(
    bay_cells: usize,
    bay_floor: f64,
    marsh_cells: usize,
    marsh: f64,
    upland_cells: usize,
    slope: f64,
) -> Vec<f64> {
    let mut profile = vec![bay_floor; bay_cells];
    profile.extend(std::iter::repeat_n(marsh, marsh_cells));
    profile.extend((1..=upland_cells).map(|j| marsh + slope * j as f64));
    profile
}
