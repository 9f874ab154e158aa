// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Status Classifier

//! Ordered first-match status classification. The ordering is load-bearing:
//! STARTUP outranks CRITICAL, so a cold plant ramping up never alarms on the
//! excursions that are normal during a cold start.

use crate::profile::StatusThresholds;
use crate::types::{PlantStatus, ProcessState};

/// Classify the current state. First match wins; the arms are NOT independent
/// conditions.
pub fn classify(thresholds: &StatusThresholds, state: &ProcessState) -> PlantStatus {
    if state.pressure < thresholds.startup_pressure
        || state.reactor_temp < thresholds.startup_reactor_temp
        || state.soec_temp < thresholds.startup_soec_temp
    {
        return PlantStatus::Startup;
    }

    if state.reactor_temp > thresholds.critical_reactor_temp
        || state.soec_temp > thresholds.critical_soec_temp
        || !thresholds.critical_ratio.contains(state.ratio)
    {
        return PlantStatus::Critical;
    }

    if !thresholds.warning_ratio.contains(state.ratio) {
        return PlantStatus::Warning;
    }

    PlantStatus::Steady
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PlantProfile;

    fn state_with(pressure: f64, reactor_temp: f64, soec_temp: f64, ratio: f64) -> ProcessState {
        ProcessState {
            current_tick: 0,
            pressure,
            reactor_temp,
            soec_temp,
            ratio,
            catalyst: 720.0,
            conversion: 0.0,
            selectivity: 0.0,
            performance: 0.0,
            status: PlantStatus::default(),
        }
    }

    #[test]
    fn steady_at_defaults() {
        let thresholds = PlantProfile::baseline().thresholds;
        let state = state_with(65.0, 230.0, 800.0, 3.0);
        assert_eq!(classify(&thresholds, &state), PlantStatus::Steady);
    }

    #[test]
    fn startup_on_each_low_variable() {
        let thresholds = PlantProfile::baseline().thresholds;
        assert_eq!(
            classify(&thresholds, &state_with(54.9, 230.0, 800.0, 3.0)),
            PlantStatus::Startup
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 209.9, 800.0, 3.0)),
            PlantStatus::Startup
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 719.9, 3.0)),
            PlantStatus::Startup
        );
    }

    #[test]
    fn startup_outranks_critical() {
        let thresholds = PlantProfile::baseline().thresholds;
        // Pressure 40 (below startup) AND reactor 260 (above critical):
        // the cold-start check wins.
        let state = state_with(40.0, 260.0, 800.0, 3.0);
        assert_eq!(classify(&thresholds, &state), PlantStatus::Startup);
    }

    #[test]
    fn critical_on_high_temps_and_ratio_excursion() {
        let thresholds = PlantProfile::baseline().thresholds;
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 245.1, 800.0, 3.0)),
            PlantStatus::Critical
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 880.1, 3.0)),
            PlantStatus::Critical
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 2.69)),
            PlantStatus::Critical
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 3.31)),
            PlantStatus::Critical
        );
    }

    #[test]
    fn warning_band_is_narrower_than_critical() {
        let thresholds = PlantProfile::baseline().thresholds;
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 2.75)),
            PlantStatus::Warning
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 3.25)),
            PlantStatus::Warning
        );
        // Band edges are inclusive on the steady side.
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 2.8)),
            PlantStatus::Steady
        );
        assert_eq!(
            classify(&thresholds, &state_with(65.0, 230.0, 800.0, 3.2)),
            PlantStatus::Steady
        );
    }

    #[test]
    fn boundary_values_are_not_startup() {
        let thresholds = PlantProfile::baseline().thresholds;
        // Exactly at the thresholds: the strict comparisons do not fire.
        let state = state_with(55.0, 210.0, 720.0, 3.0);
        assert_eq!(classify(&thresholds, &state), PlantStatus::Steady);
    }

    #[test]
    fn revised_startup_pressure_threshold() {
        let thresholds = PlantProfile::revised().thresholds;
        assert_eq!(
            classify(&thresholds, &state_with(74.9, 230.0, 800.0, 3.0)),
            PlantStatus::Startup
        );
        assert_eq!(
            classify(&thresholds, &state_with(85.0, 230.0, 800.0, 3.0)),
            PlantStatus::Steady
        );
    }
}
