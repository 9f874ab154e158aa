// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop")

pub mod estimator;
pub mod presenter;
pub mod profile;
pub mod random_walk;
pub mod simulation;
pub mod status;
pub mod types;

pub use profile::{Band, PlantProfile, ProfileError, TICK_INTERVAL_MS};
pub use random_walk::{ConstNoise, NoiseSource, ZeroNoise};
pub use simulation::PlantSimulation;
pub use types::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl PlantSimulation {
    /// `revised = false` builds the baseline profile, `true` the revised one.
    /// The dashboard timer drives `tick()` every `TICK_INTERVAL_MS`.
    #[wasm_bindgen(constructor)]
    pub fn new(revised: bool) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        if revised {
            Self::revised()
        } else {
            Self::baseline()
        }
    }

    /// Advance one tick and return the full render payload.
    pub fn tick(&mut self) -> JsValue {
        let result = self.tick_core();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Run N ticks without returning payloads (fast batch mode).
    pub fn run_batch(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick_core();
        }
    }

    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.state).unwrap_or(JsValue::NULL)
    }

    /// Render payload for the current state without advancing the plant.
    pub fn get_gauges(&self) -> JsValue {
        let gauges = presenter::build_gauges(&self.profile, &self.state);
        serde_wasm_bindgen::to_value(&gauges).unwrap_or(JsValue::NULL)
    }

    pub fn get_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.stats()).unwrap_or(JsValue::NULL)
    }

    pub fn tick_interval_ms() -> u32 {
        TICK_INTERVAL_MS as u32
    }

    // Scenario injection: pin a primary variable for the next tick. Combined
    // with a zero step scale these hold the plant in a chosen operating point.
    pub fn set_pressure(&mut self, val: f64) { self.state.pressure = val; }
    pub fn set_reactor_temp(&mut self, val: f64) { self.state.reactor_temp = val; }
    pub fn set_soec_temp(&mut self, val: f64) { self.state.soec_temp = val; }
    pub fn set_ratio(&mut self, val: f64) { self.state.ratio = val; }
    pub fn set_catalyst(&mut self, val: f64) { self.state.catalyst = val; }

    /// Scale every walk step and the estimator noise amplitude. 0.0 freezes
    /// the plant entirely.
    pub fn set_step_scale(&mut self, scale: f64) {
        self.step_scale = scale.max(0.0);
    }

    /// Reseed the internal noise source for reproducible runs.
    pub fn set_seed(&mut self, seed: u64) {
        self.reseed(seed);
    }

    /// Reset to the profile's initial conditions, clearing run statistics.
    pub fn reset(&mut self) {
        *self = PlantSimulation::build(self.profile.clone());
    }
}
