// Scenario Definitions — operating-envelope and recovery runs
// All scenario logic lives in setup/mid-event closures and pass criteria;
// the engine itself is never special-cased for the bench.

use plant_engine::PlantSimulation;

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    /// Revised profile when true, baseline otherwise.
    pub revised: bool,
    pub ticks: u64,
    /// Walk/noise multiplier; 0.0 freezes the plant.
    pub step_scale: f64,
    pub criteria: PassCriteria,
    /// Pre-run setup (e.g., pin a cold-start operating point).
    pub setup: Option<Box<dyn Fn(&mut PlantSimulation) + Send + Sync>>,
    /// Mid-simulation events (e.g., ratio excursion at a specific tick).
    pub mid_event: Option<Box<dyn Fn(&mut PlantSimulation, u64) + Send + Sync>>,
}

pub struct PassCriteria {
    /// Bound violations are engine defects; always 0 unless a scenario
    /// deliberately injects out-of-band values.
    pub max_bound_violations: u32,
    pub min_steady_pct: Option<f64>,
    pub max_critical_ticks: Option<u64>,
    /// The plant must reach STEADY no later than this tick.
    pub max_settle_tick: Option<u64>,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            max_bound_violations: 0,
            min_steady_pct: None,
            max_critical_ticks: None,
            max_settle_tick: None,
        }
    }
}

// ─── Scenario Definitions ───────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // ─── Envelope (long-run invariant) ──────────────────────────────
        Scenario {
            name: "BASELINE_ENVELOPE",
            label: "Baseline: 10K-tick envelope",
            category: "envelope",
            revised: false,
            ticks: 10_000,
            step_scale: 1.0,
            // Baseline physics cannot reach CRITICAL: the ratio walk clamp
            // equals the critical band and both coupled temperature windows
            // stay below their critical thresholds.
            criteria: PassCriteria {
                max_critical_ticks: Some(0),
                min_steady_pct: Some(30.0),
                ..Default::default()
            },
            setup: None,
            mid_event: None,
        },
        Scenario {
            name: "REVISED_ENVELOPE",
            label: "Revised: 10K-tick envelope",
            category: "envelope",
            revised: true,
            ticks: 10_000,
            step_scale: 1.0,
            // High pressure legitimately drives the reactor window past the
            // critical threshold, so CRITICAL ticks are allowed here.
            criteria: PassCriteria::default(),
            setup: None,
            mid_event: None,
        },
        Scenario {
            name: "CATALYST_DRIFT",
            label: "Baseline: catalyst drift 20K ticks",
            category: "envelope",
            revised: false,
            ticks: 20_000,
            step_scale: 1.0,
            criteria: PassCriteria {
                max_critical_ticks: Some(0),
                ..Default::default()
            },
            setup: None,
            mid_event: None,
        },
        // ─── Deterministic setpoint holds ───────────────────────────────
        Scenario {
            name: "FROZEN_SETPOINT",
            label: "Baseline: frozen at setpoints",
            category: "deterministic",
            revised: false,
            ticks: 500,
            step_scale: 0.0,
            criteria: PassCriteria {
                min_steady_pct: Some(100.0),
                max_critical_ticks: Some(0),
                max_settle_tick: Some(1),
                ..Default::default()
            },
            setup: None,
            mid_event: None,
        },
        Scenario {
            name: "REVISED_FROZEN",
            label: "Revised: frozen at setpoints",
            category: "deterministic",
            revised: true,
            ticks: 500,
            step_scale: 0.0,
            criteria: PassCriteria {
                min_steady_pct: Some(100.0),
                max_settle_tick: Some(1),
                ..Default::default()
            },
            setup: None,
            mid_event: None,
        },
        // ─── Recovery ───────────────────────────────────────────────────
        Scenario {
            name: "COLD_START",
            label: "Baseline: cold start recovery",
            category: "recovery",
            revised: false,
            ticks: 2_000,
            step_scale: 1.0,
            criteria: PassCriteria {
                max_critical_ticks: Some(0),
                max_settle_tick: Some(1_500),
                ..Default::default()
            },
            setup: Some(Box::new(|sim: &mut PlantSimulation| {
                sim.set_pressure(50.0);
                sim.set_reactor_temp(205.0);
                sim.set_soec_temp(700.0);
            })),
            mid_event: None,
        },
        Scenario {
            name: "RATIO_EXCURSION",
            label: "Baseline: ratio excursion at t=100",
            category: "recovery",
            revised: false,
            ticks: 1_000,
            step_scale: 1.0,
            // The walk clamp pulls the injected 2.6 back inside [2.7, 3.3]
            // on the next tick, so the excursion never classifies CRITICAL.
            criteria: PassCriteria {
                max_critical_ticks: Some(0),
                max_settle_tick: Some(500),
                ..Default::default()
            },
            setup: None,
            mid_event: Some(Box::new(|sim: &mut PlantSimulation, tick: u64| {
                if tick == 100 {
                    sim.set_ratio(2.6);
                }
            })),
        },
        Scenario {
            name: "REVISED_COLD_START",
            label: "Revised: cold start recovery",
            category: "recovery",
            revised: true,
            ticks: 6_000,
            step_scale: 1.0,
            // Unbiased walk from 60 bar to the 75 bar startup threshold is
            // diffusive (~700 ticks expected); the budget covers the tail.
            criteria: PassCriteria {
                max_settle_tick: Some(5_000),
                ..Default::default()
            },
            setup: Some(Box::new(|sim: &mut PlantSimulation| {
                // Below the revised 75 bar startup threshold.
                sim.set_pressure(60.0);
            })),
            mid_event: None,
        },
    ]
}
