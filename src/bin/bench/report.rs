// Bench Report Types — structured output for regression tracking
// One JSON report per suite run, aggregated per scenario across seeds

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Result ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    /// Ticks where any primary or derived variable left its declared band.
    pub bound_violations: u32,
    pub steady_pct: f64,
    pub startup_ticks: u64,
    pub warning_ticks: u64,
    pub critical_ticks: u64,
    pub alarm_transitions: u32,
    /// First tick classified STEADY, if any.
    pub settle_tick: Option<u64>,
    pub mean_conversion: f64,
    pub mean_selectivity: f64,
    pub elapsed_ms: f64,
    pub passed: bool,
    pub failures: Vec<String>,
}

// ─── Monte Carlo Aggregate ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct McReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub runs: usize,
    pub pass_rate: f64,
    pub bound_violations: Stats,
    pub steady_pct: Stats,
    pub critical_ticks: Stats,
    pub settle_tick: Stats,
    pub mean_conversion: Stats,
    pub elapsed_ms: Stats,
    /// Failure messages from the first failing run, if any.
    pub sample_failures: Vec<String>,
}

// ─── Suite Report ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub scenarios: Vec<McReport>,
}
