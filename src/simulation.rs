// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Simulation Core

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

use crate::estimator;
use crate::presenter;
use crate::profile::{PlantProfile, ProfileError};
use crate::random_walk::{self, NoiseSource, ZeroNoise};
use crate::status;
use crate::types::*;

// ─── PlantSimulation struct ──────────────────────────────────────────────────

#[wasm_bindgen]
pub struct PlantSimulation {
    pub(crate) profile: PlantProfile,
    pub(crate) state: ProcessState,
    pub(crate) rng: ChaCha8Rng,

    /// Multiplier on every walk step and on the estimator noise amplitude.
    /// 0.0 freezes the plant for deterministic scenario runs.
    pub(crate) step_scale: f64,

    // Run statistics, indexed by PlantStatus discriminant
    pub(crate) status_ticks: [u64; 4],
    pub(crate) alarm_transitions: u32,
    pub(crate) conversion_sum: f64,
    pub(crate) selectivity_sum: f64,
    pub(crate) min_conversion: f64,
    pub(crate) max_conversion: f64,
}

/// Scales samples from an inner source. Shares the step-scale knob with the
/// estimator noise term so a frozen plant is fully deterministic.
struct ScaledNoise<'a> {
    inner: &'a mut dyn NoiseSource,
    scale: f64,
}

impl NoiseSource for ScaledNoise<'_> {
    fn sample(&mut self) -> f64 {
        self.inner.sample() * self.scale
    }
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl PlantSimulation {
    /// Original pilot tuning.
    pub fn baseline() -> Self {
        Self::build(PlantProfile::baseline())
    }

    /// Recalibrated tuning with the lagged performance index.
    pub fn revised() -> Self {
        Self::build(PlantProfile::revised())
    }

    /// Construct from a custom profile after validating it.
    pub fn with_profile(profile: PlantProfile) -> Result<Self, ProfileError> {
        profile.validate()?;
        Ok(Self::build(profile))
    }

    pub(crate) fn build(profile: PlantProfile) -> Self {
        let init = profile.initial;
        let conversion = estimator::estimate_conversion(
            &profile.conversion,
            init.pressure,
            init.reactor_temp,
            init.ratio,
            &mut ZeroNoise,
        );
        let selectivity = estimator::estimate_selectivity(
            &profile.selectivity,
            init.reactor_temp,
            init.ratio,
            init.pressure,
        );
        let performance = match profile.performance {
            Some(clamp) => estimator::performance_index(conversion, selectivity, clamp),
            None => 0.0,
        };
        let mut state = ProcessState {
            current_tick: 0,
            pressure: init.pressure,
            reactor_temp: init.reactor_temp,
            soec_temp: init.soec_temp,
            ratio: init.ratio,
            catalyst: init.catalyst,
            conversion,
            selectivity,
            performance,
            status: PlantStatus::default(),
        };
        state.status = status::classify(&profile.thresholds, &state);

        Self {
            profile,
            state,
            rng: ChaCha8Rng::from_entropy(),
            step_scale: 1.0,
            status_ticks: [0; 4],
            alarm_transitions: 0,
            conversion_sum: 0.0,
            selectivity_sum: 0.0,
            min_conversion: f64::INFINITY,
            max_conversion: f64::NEG_INFINITY,
        }
    }

    /// Advance one tick using the owned noise source.
    pub fn tick_core(&mut self) -> TickResult {
        let prev_status = self.state.status;
        let Self {
            profile,
            state,
            rng,
            step_scale,
            ..
        } = self;
        advance(profile, state, *step_scale, rng);
        self.finalize(prev_status)
    }

    /// Advance one tick with an injected noise source.
    pub fn tick_with(&mut self, noise: &mut dyn NoiseSource) -> TickResult {
        let prev_status = self.state.status;
        advance(&self.profile, &mut self.state, self.step_scale, noise);
        self.finalize(prev_status)
    }

    /// Per-tick bookkeeping after the state update: run statistics and the
    /// render payload.
    fn finalize(&mut self, prev_status: PlantStatus) -> TickResult {
        // Out-of-range derived values are defects in the clamp bounds, not
        // runtime conditions (the formulas are total).
        debug_assert!(self.profile.conversion.clamp.contains(self.state.conversion));
        debug_assert!(self.profile.selectivity.clamp.contains(self.state.selectivity));

        self.status_ticks[self.state.status as usize] += 1;
        if self.state.status.is_alarm() && !prev_status.is_alarm() {
            self.alarm_transitions += 1;
        }
        self.conversion_sum += self.state.conversion;
        self.selectivity_sum += self.state.selectivity;
        self.min_conversion = self.min_conversion.min(self.state.conversion);
        self.max_conversion = self.max_conversion.max(self.state.conversion);

        TickResult {
            state: self.state.clone(),
            gauges: presenter::build_gauges(&self.profile, &self.state),
            status: presenter::status_update(self.state.status),
        }
    }

    /// Reseed the owned noise source (bench runs use one seed per iteration).
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn snapshot(&self) -> ProcessState {
        self.state.clone()
    }

    pub fn profile(&self) -> &PlantProfile {
        &self.profile
    }

    pub fn stats(&self) -> RunStats {
        let ticks = self.state.current_tick;
        let (mean_conversion, mean_selectivity, min_c, max_c) = if ticks > 0 {
            (
                self.conversion_sum / ticks as f64,
                self.selectivity_sum / ticks as f64,
                self.min_conversion,
                self.max_conversion,
            )
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };
        RunStats {
            ticks,
            startup_ticks: self.status_ticks[PlantStatus::Startup as usize],
            steady_ticks: self.status_ticks[PlantStatus::Steady as usize],
            warning_ticks: self.status_ticks[PlantStatus::Warning as usize],
            critical_ticks: self.status_ticks[PlantStatus::Critical as usize],
            alarm_transitions: self.alarm_transitions,
            mean_conversion,
            mean_selectivity,
            min_conversion: min_c,
            max_conversion: max_c,
        }
    }
}

// ─── Tick update ─────────────────────────────────────────────────────────────

/// One plant update: sequential walks over the primaries, derived metrics,
/// classification. Runs to completion; there is exactly one writer and no
/// overlapping ticks.
fn advance(profile: &PlantProfile, state: &mut ProcessState, scale: f64, noise: &mut dyn NoiseSource) {
    state.current_tick += 1;

    // Prior-tick metrics, read before they are overwritten below. The
    // performance index lags by exactly one tick.
    let prior_conversion = state.conversion;
    let prior_selectivity = state.selectivity;

    // 1. Pressure (master variable)
    let spec = &profile.pressure;
    state.pressure = random_walk::walk(
        state.pressure,
        spec.step * scale,
        spec.walk,
        spec.decimals,
        noise,
    );

    // 2. Reactor temperature: walk window tracks pressure
    let spec = &profile.reactor_temp;
    let window = profile
        .reactor_coupling
        .window(state.pressure)
        .intersect(spec.walk);
    state.reactor_temp = random_walk::walk(
        state.reactor_temp,
        spec.step * scale,
        window,
        spec.decimals,
        noise,
    );

    // 3. H2/CO2 ratio: walk, then soft correction toward the optimum band
    let spec = &profile.ratio;
    state.ratio = random_walk::walk(
        state.ratio,
        spec.step * scale,
        spec.walk,
        spec.decimals,
        noise,
    );
    if let Some(optimum) = spec.optimum {
        state.ratio = random_walk::correct_ratio(
            state.ratio,
            optimum,
            profile.ratio_correction,
            spec.decimals,
        );
    }

    // 4. SOEC temperature: walk window tracks H2 demand
    let spec = &profile.soec_temp;
    let window = profile
        .soec_coupling
        .window(state.ratio)
        .intersect(spec.walk);
    state.soec_temp = random_walk::walk(
        state.soec_temp,
        spec.step * scale,
        window,
        spec.decimals,
        noise,
    );

    // 5. Catalyst loading: slow drift
    let spec = &profile.catalyst;
    state.catalyst = random_walk::walk(
        state.catalyst,
        spec.step * scale,
        spec.walk,
        spec.decimals,
        noise,
    );

    // Derived metrics from the updated primaries
    let mut estimator_noise = ScaledNoise { inner: noise, scale };
    state.conversion = estimator::estimate_conversion(
        &profile.conversion,
        state.pressure,
        state.reactor_temp,
        state.ratio,
        &mut estimator_noise,
    );
    state.selectivity = estimator::estimate_selectivity(
        &profile.selectivity,
        state.reactor_temp,
        state.ratio,
        state.pressure,
    );
    if let Some(clamp) = profile.performance {
        state.performance =
            estimator::performance_index(prior_conversion, prior_selectivity, clamp);
    }

    state.status = status::classify(&profile.thresholds, state);
}
