// Per-Tick Metric Trackers — Bounds Audit and Status Dwell
// The bounds auditor is the bench-side check of the core invariant: every
// variable stays inside its declared closed interval after every tick.

use plant_engine::*;

// ─── Bounds Auditor ─────────────────────────────────────────────────────────

/// Counts ticks where any primary leaves its walk band or any derived metric
/// leaves its clamp band. The expected count is always zero; a non-zero count
/// is an engine defect, not a scenario outcome.
pub struct BoundsAuditor {
    pub ticks: u64,
    pub violations: u32,
    pub first_violation: Option<String>,
}

impl BoundsAuditor {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            violations: 0,
            first_violation: None,
        }
    }

    pub fn record_tick(&mut self, profile: &PlantProfile, state: &ProcessState) {
        self.ticks += 1;

        let mut checks: Vec<(&str, f64, Band)> = vec![
            ("pressure", state.pressure, profile.pressure.walk),
            ("reactor_temp", state.reactor_temp, profile.reactor_temp.walk),
            ("soec_temp", state.soec_temp, profile.soec_temp.walk),
            ("ratio", state.ratio, profile.ratio.walk),
            ("catalyst", state.catalyst, profile.catalyst.walk),
            ("conversion", state.conversion, profile.conversion.clamp),
            ("selectivity", state.selectivity, profile.selectivity.clamp),
        ];
        if let Some(perf_clamp) = profile.performance {
            checks.push(("performance", state.performance, perf_clamp));
        }

        for (name, value, band) in checks {
            if !band.contains(value) {
                self.violations += 1;
                if self.first_violation.is_none() {
                    self.first_violation = Some(format!(
                        "tick {}: {} = {} outside [{}, {}]",
                        state.current_tick, name, value, band.min, band.max
                    ));
                }
            }
        }
    }
}

// ─── Status Dwell Tracker ───────────────────────────────────────────────────

/// Tracks per-status dwell counts and the first tick the plant settles into
/// STEADY (used by the cold-start and excursion scenarios).
pub struct StatusTracker {
    pub counts: [u64; 4],
    pub first_steady_tick: Option<u64>,
    pub ticks: u64,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            counts: [0; 4],
            first_steady_tick: None,
            ticks: 0,
        }
    }

    pub fn record_tick(&mut self, state: &ProcessState) {
        self.ticks += 1;
        self.counts[state.status as usize] += 1;
        if state.status == PlantStatus::Steady && self.first_steady_tick.is_none() {
            self.first_steady_tick = Some(state.current_tick);
        }
    }

    pub fn steady_pct(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.counts[PlantStatus::Steady as usize] as f64 / self.ticks as f64 * 100.0
    }

    pub fn critical_ticks(&self) -> u64 {
        self.counts[PlantStatus::Critical as usize]
    }

    pub fn startup_ticks(&self) -> u64 {
        self.counts[PlantStatus::Startup as usize]
    }

    pub fn warning_ticks(&self) -> u64 {
        self.counts[PlantStatus::Warning as usize]
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auditor_flags_out_of_band_value() {
        let profile = PlantProfile::baseline();
        let mut sim = PlantSimulation::baseline();
        let mut auditor = BoundsAuditor::new();
        auditor.record_tick(&profile, &sim.snapshot());
        assert_eq!(auditor.violations, 0);

        // Inject an out-of-band pressure; the auditor must flag it.
        sim.set_pressure(120.0);
        auditor.record_tick(&profile, &sim.snapshot());
        assert_eq!(auditor.violations, 1);
        assert!(auditor.first_violation.as_deref().unwrap().contains("pressure"));
    }

    #[test]
    fn tracker_records_first_steady() {
        let mut tracker = StatusTracker::new();
        let mut sim = PlantSimulation::baseline();
        sim.set_step_scale(0.0);
        for _ in 0..3 {
            let result = sim.tick_core();
            tracker.record_tick(&result.state);
        }
        assert_eq!(tracker.steady_pct(), 100.0);
        assert_eq!(tracker.first_steady_tick, Some(1));
    }
}
