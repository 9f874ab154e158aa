// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Random Walk Updater

//! Clamped, rounded random-walk steps for the primary process variables.
//!
//! Randomness enters through the [`NoiseSource`] capability so the tick logic
//! stays deterministic under test: the engine hands in a ChaCha-backed source,
//! tests hand in [`ZeroNoise`] or [`ConstNoise`].

use crate::profile::Band;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// NoiseSource
// ---------------------------------------------------------------------------

/// Source of uniform perturbation samples in [-1.0, 1.0).
pub trait NoiseSource {
    fn sample(&mut self) -> f64;
}

impl NoiseSource for ChaCha8Rng {
    fn sample(&mut self) -> f64 {
        self.gen_range(-1.0..1.0)
    }
}

/// Always samples 0.0 -- every walk step becomes a hold.
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

/// Always samples the same value. Handy for driving a variable steadily up
/// (+1.0) or down (-1.0) in tests and scenarios.
pub struct ConstNoise(pub f64);

impl NoiseSource for ConstNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Walk step
// ---------------------------------------------------------------------------

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// One random-walk step: perturb by up to +/- `step`, clamp into `window`,
/// round to `decimals`.
///
/// A zero step freezes the variable entirely -- no clamping, no re-rounding.
/// Scenario injection relies on this to hold a variable at an out-of-window
/// value across ticks.
pub fn walk(
    current: f64,
    step: f64,
    window: Band,
    decimals: u32,
    noise: &mut dyn NoiseSource,
) -> f64 {
    if step == 0.0 {
        return current;
    }
    let delta = noise.sample() * step;
    round_to(window.clamp(current + delta), decimals)
}

/// Soft mean-reversion for the H2/CO2 ratio: one fixed nudge toward the
/// optimum band when the walked value lands outside it. Values already inside
/// the band pass through untouched, so the correction is idempotent there.
pub fn correct_ratio(ratio: f64, optimum: Band, correction: f64, decimals: u32) -> f64 {
    if ratio < optimum.min {
        round_to(ratio + correction, decimals)
    } else if ratio > optimum.max {
        round_to(ratio - correction, decimals)
    } else {
        ratio
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
