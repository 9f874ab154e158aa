// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── Plant Status ────────────────────────────────────────────────────────────

/// Coarse health classification of the whole plant state.
///
/// Classification is order-sensitive: STARTUP is checked before CRITICAL, so a
/// cold, under-pressure plant with a temperature excursion still reads STARTUP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlantStatus {
    Startup = 0,
    Critical = 1,
    Warning = 2,
    Steady = 3,
}

impl Default for PlantStatus {
    fn default() -> Self { PlantStatus::Startup }
}

impl PlantStatus {
    /// Display label as shown on the dashboard status slot.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Startup => "STARTUP",
            Self::Critical => "CRITICAL",
            Self::Warning => "WARNING",
            Self::Steady => "STEADY",
        }
    }

    pub fn is_alarm(&self) -> bool {
        matches!(self, Self::Warning | Self::Critical)
    }
}

// ─── ProcessState ────────────────────────────────────────────────────────────

/// One snapshot of the simulated plant: five primary variables, the derived
/// metrics, and the classified status. A single instance lives inside
/// `PlantSimulation` and is rewritten once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessState {
    pub current_tick: u64,

    // Primary variables (random-walked each tick)
    /// Reactor pressure [bar].
    pub pressure: f64,
    /// Methanol reactor temperature [degC]. Setpoint window tracks pressure.
    pub reactor_temp: f64,
    /// SOEC stack temperature [degC]. Setpoint window tracks the H2/CO2 ratio.
    pub soec_temp: f64,
    /// H2/CO2 feed ratio, softly corrected toward the 2.8-3.2 optimum band.
    pub ratio: f64,
    /// Catalyst loading [kg]. Slow drift.
    pub catalyst: f64,

    // Derived metrics (recomputed from the primaries each tick)
    /// Single-pass CO2 conversion [%].
    pub conversion: f64,
    /// Methanol selectivity [%].
    pub selectivity: f64,
    /// Combined performance index [%], revised profile only. Computed from the
    /// PREVIOUS tick's conversion and selectivity (one-tick lag).
    #[serde(default)]
    pub performance: f64,

    pub status: PlantStatus,
}

// ─── GaugeUpdate ─────────────────────────────────────────────────────────────

/// One display slot for the dashboard: formatted text, a proportional bar fill
/// within the slot's display bounds, and a highlight color hint. The frontend
/// treats this as an opaque key -> (text, fill, color) sink.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeUpdate {
    pub key: &'static str,
    pub text: String,
    /// Bar fill within the display bounds, clamped to [0, 100].
    pub fill_pct: f64,
    /// CSS color hint.
    pub color: &'static str,
}

/// The status slot: label text plus its color hint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusUpdate {
    pub text: &'static str,
    pub color: &'static str,
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub state: ProcessState,
    pub gauges: Vec<GaugeUpdate>,
    pub status: StatusUpdate,
}

// ─── RunStats ────────────────────────────────────────────────────────────────

/// Accumulated run statistics, exposed to the dashboard and the bench runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub startup_ticks: u64,
    pub steady_ticks: u64,
    pub warning_ticks: u64,
    pub critical_ticks: u64,
    /// Transitions from a non-alarm status into WARNING or CRITICAL.
    pub alarm_transitions: u32,
    pub mean_conversion: f64,
    pub mean_selectivity: f64,
    pub min_conversion: f64,
    pub max_conversion: f64,
}

impl RunStats {
    /// Fraction of elapsed ticks spent in STEADY.
    pub fn steady_fraction(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.steady_ticks as f64 / self.ticks as f64
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
