// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Metric Estimator

//! Pure estimation formulas: weighted-penalty baselines over the current
//! primary variables, clamped into each metric's declared band. Total
//! functions -- no input can produce an out-of-range or undefined result.

use crate::profile::{Band, ConversionModel, PressureTerm, SelectivityModel};
use crate::random_walk::NoiseSource;

/// Estimated single-pass CO2 conversion [%].
///
/// Baseline constant, minus temperature and ratio deviation penalties, plus
/// the profile's pressure term. The revised model adds a small symmetric
/// measurement-noise term before the final clamp.
pub fn estimate_conversion(
    model: &ConversionModel,
    pressure: f64,
    reactor_temp: f64,
    ratio: f64,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let mut conv = model.base;

    conv += match model.pressure {
        PressureTerm::Linear { setpoint, weight } => -(pressure - setpoint).abs() * weight,
        PressureTerm::OptimumBand {
            band,
            bonus,
            decay_above,
            penalty_below,
        } => {
            if band.contains(pressure) {
                bonus
            } else if pressure > band.max {
                // Above the optimum: the bonus decays gently.
                bonus - (pressure - band.max) * decay_above
            } else {
                // Below the optimum: equilibrium limits bite harder.
                -(band.min - pressure) * penalty_below
            }
        }
    };

    conv -= (reactor_temp - model.temp_setpoint).abs() * model.temp_weight;
    conv -= (ratio - model.ratio_setpoint).abs() * model.ratio_weight;

    if model.noise_amp > 0.0 {
        conv += noise.sample() * model.noise_amp;
    }

    model.clamp.clamp(conv)
}

/// Estimated methanol selectivity [%].
///
/// Baseline minus temperature and ratio deviation penalties. The revised
/// model adds a pressure response: full bonus in the working band, a smaller
/// bonus above it, and a per-bar penalty below the low threshold where the
/// reverse water-gas shift starts producing CO instead of methanol.
pub fn estimate_selectivity(
    model: &SelectivityModel,
    reactor_temp: f64,
    ratio: f64,
    pressure: f64,
) -> f64 {
    let mut sel = model.base;
    sel -= (reactor_temp - model.temp_setpoint).abs() * model.temp_weight;
    sel -= (ratio - model.ratio_setpoint).abs() * model.ratio_weight;

    if let Some(resp) = model.pressure {
        sel += if resp.bonus_band.contains(pressure) {
            resp.bonus
        } else if pressure > resp.high_band.min && pressure <= resp.high_band.max {
            resp.high_bonus
        } else if pressure < resp.low_threshold {
            -(resp.low_threshold - pressure) * resp.low_penalty_per_bar
        } else {
            0.0
        };
    }

    model.clamp.clamp(sel)
}

/// Combined performance index: product of the conversion and selectivity
/// fractions, rescaled to percent. The caller feeds in the PREVIOUS tick's
/// stored metrics, which gives the index its intentional one-tick lag.
pub fn performance_index(conversion: f64, selectivity: f64, clamp: Band) -> f64 {
    clamp.clamp((conversion / 100.0) * (selectivity / 100.0) * 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
