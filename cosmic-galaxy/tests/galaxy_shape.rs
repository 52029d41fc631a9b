//! Shape tests for the generated galaxy
//!
//! These check the properties the eye relies on: density falls off away from
//! the core, the disk thins toward the rim, color fades from warm core to
//! dim halo, and every arm receives the same share of stars.

use cosmic_galaxy::*;
use std::f32::consts::TAU;

fn spiral(count: usize, seed: u64) -> cosmic_core::ParticleCloud {
    let params = SpiralParams { count, ..SpiralParams::default() };
    generate_spiral_galaxy(&params, seed).unwrap()
}

#[test]
fn test_density_falls_off_with_radius() {
    let stats = FieldStats::compute(&spiral(100_000, 1), 10);
    let d = |i: usize| stats.bands[i].density;
    assert!(d(1) > d(4), "{} <= {}", d(1), d(4));
    assert!(d(4) > d(7), "{} <= {}", d(4), d(7));
    // Quadratic bias puts most stars well inside the rim
    assert!(stats.mean_radius < 65.0, "mean radius {}", stats.mean_radius);
}

#[test]
fn test_disk_thins_toward_rim() {
    let stats = FieldStats::compute(&spiral(100_000, 2), 10);
    let h = |i: usize| stats.bands[i].mean_abs_height;
    assert!(h(1) > h(4));
    assert!(h(4) > h(7));
}

#[test]
fn test_color_fades_from_core_to_halo() {
    let stats = FieldStats::compute(&spiral(100_000, 3), 10);
    let l = |i: usize| stats.bands[i].mean_luminance;
    assert!(l(0) > l(1));
    assert!(l(1) > l(7));
}

#[test]
fn test_planar_radius_envelope() {
    let params = SpiralParams { count: 50_000, ..SpiralParams::default() };
    let cloud = generate_spiral_galaxy(&params, 4).unwrap();
    // The arm offset moves a particle by at most spread/2 * r along (1, 1)
    let slack = params.arm_spread / 2.0 * 2.0_f32.sqrt();
    for p in cloud.iter() {
        let r = p.planar_radius();
        assert!(r >= params.inner_radius * (1.0 - slack) - 1e-3);
        assert!(r <= params.outer_radius * (1.0 + slack) + 1e-3);
    }
}

#[test]
fn test_arms_share_stars_evenly() {
    let params = SpiralParams {
        count: 40_000,
        angle_jitter: 0.0,
        arm_spread: 0.0,
        ..SpiralParams::default()
    };
    let cloud = generate_spiral_galaxy(&params, 5).unwrap();

    let mut per_arm = vec![0usize; params.arms as usize];
    for p in cloud.iter() {
        let r = p.planar_radius();
        let spin = (r / params.inner_radius + 1.0).ln() * params.spin_factor;
        let base = (p.position.z.atan2(p.position.x) - spin).rem_euclid(TAU);
        let arm = (base / (TAU / params.arms as f32)).round() as usize % params.arms as usize;
        per_arm[arm] += 1;
    }
    assert!(per_arm.iter().all(|&n| n == 10_000), "{:?}", per_arm);
}

#[test]
fn test_full_field_is_seed_stable() {
    let params = GalaxyFieldParams::default().scaled(0.02);
    let a = GalaxyField::generate(&params, 2024).unwrap();
    let b = GalaxyField::generate(&params, 2024).unwrap();
    assert_eq!(a.arms.points, b.arms.points);
    assert_eq!(a.total_len(), params.total_count());
}
