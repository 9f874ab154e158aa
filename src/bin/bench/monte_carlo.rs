// Monte Carlo Infrastructure — N seeded runs per scenario
// Seeds base_seed..base_seed+N-1, aggregated as mean ± 95% CI

use plant_engine::*;

use crate::metrics::{BoundsAuditor, StatusTracker};
use crate::report::*;
use crate::scenarios::Scenario;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(scenario: &Scenario, seed: u64) -> BenchResult {
    let start = Instant::now();
    let mut sim = if scenario.revised {
        PlantSimulation::revised()
    } else {
        PlantSimulation::baseline()
    };
    sim.set_seed(seed);
    sim.set_step_scale(scenario.step_scale);

    if let Some(setup) = &scenario.setup {
        setup(&mut sim);
    }

    let profile = sim.profile().clone();
    let mut auditor = BoundsAuditor::new();
    let mut tracker = StatusTracker::new();

    for tick in 0..scenario.ticks {
        if let Some(event) = &scenario.mid_event {
            event(&mut sim, tick);
        }
        let result = sim.tick_core();
        auditor.record_tick(&profile, &result.state);
        tracker.record_tick(&result.state);
    }

    let run_stats = sim.stats();

    // ─── Pass criteria ──────────────────────────────────────────────────
    let criteria = &scenario.criteria;
    let mut failures = Vec::new();

    if auditor.violations > criteria.max_bound_violations {
        let detail = auditor
            .first_violation
            .clone()
            .unwrap_or_else(|| "no detail".to_string());
        failures.push(format!(
            "{} bound violations (limit {}): {}",
            auditor.violations, criteria.max_bound_violations, detail
        ));
    }
    if let Some(min) = criteria.min_steady_pct {
        if tracker.steady_pct() < min {
            failures.push(format!(
                "steady {:.1}% below required {:.1}%",
                tracker.steady_pct(),
                min
            ));
        }
    }
    if let Some(max) = criteria.max_critical_ticks {
        if tracker.critical_ticks() > max {
            failures.push(format!(
                "{} CRITICAL ticks (limit {})",
                tracker.critical_ticks(),
                max
            ));
        }
    }
    if let Some(max) = criteria.max_settle_tick {
        match tracker.first_steady_tick {
            Some(t) if t <= max => {}
            Some(t) => failures.push(format!("settled at tick {} (limit {})", t, max)),
            None => failures.push(format!("never settled (limit {})", max)),
        }
    }

    BenchResult {
        scenario: scenario.name.to_string(),
        seed,
        ticks: scenario.ticks,
        bound_violations: auditor.violations,
        steady_pct: tracker.steady_pct(),
        startup_ticks: tracker.startup_ticks(),
        warning_ticks: tracker.warning_ticks(),
        critical_ticks: tracker.critical_ticks(),
        alarm_transitions: run_stats.alarm_transitions,
        settle_tick: tracker.first_steady_tick,
        mean_conversion: run_stats.mean_conversion,
        mean_selectivity: run_stats.mean_selectivity,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        passed: failures.is_empty(),
        failures,
    }
}

/// Run a scenario N times and aggregate.
pub fn run_monte_carlo(scenario: &Scenario, runs: usize, base_seed: u64) -> McReport {
    let results: Vec<BenchResult> = (0..runs)
        .map(|i| run_single(scenario, base_seed + i as u64))
        .collect();

    let passed = results.iter().filter(|r| r.passed).count();
    let sample_failures = results
        .iter()
        .find(|r| !r.passed)
        .map(|r| r.failures.clone())
        .unwrap_or_default();

    let collect = |f: fn(&BenchResult) -> f64| -> Vec<f64> { results.iter().map(f).collect() };

    // Runs that never settle report the full run length.
    let settle_samples: Vec<f64> = results
        .iter()
        .map(|r| r.settle_tick.unwrap_or(r.ticks) as f64)
        .collect();

    McReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        runs,
        pass_rate: passed as f64 / runs as f64,
        bound_violations: Stats::from_samples(&collect(|r| r.bound_violations as f64)),
        steady_pct: Stats::from_samples(&collect(|r| r.steady_pct)),
        critical_ticks: Stats::from_samples(&collect(|r| r.critical_ticks as f64)),
        settle_tick: Stats::from_samples(&settle_samples),
        mean_conversion: Stats::from_samples(&collect(|r| r.mean_conversion)),
        elapsed_ms: Stats::from_samples(&collect(|r| r.elapsed_ms)),
        sample_failures,
    }
}
