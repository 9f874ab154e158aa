// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Presenter Payload

//! Compute-then-render split: the tick produces a plain data payload here and
//! the dashboard frontend only writes it to the DOM. Nothing in this module
//! feeds back into the process core.

use crate::profile::{Band, PlantProfile};
use crate::types::{GaugeUpdate, PlantStatus, ProcessState, StatusUpdate};

pub const COLOR_OPTIMAL: &str = "#2ecc71";
pub const COLOR_OFF_OPTIMAL: &str = "#f1c40f";
pub const COLOR_NEUTRAL: &str = "#3498db";
pub const COLOR_CRITICAL: &str = "#e74c3c";

/// Proportional bar fill within the display bounds, clamped to [0, 100].
pub fn fill_pct(value: f64, display: Band) -> f64 {
    if display.span() <= 0.0 {
        return 0.0;
    }
    (((value - display.min) / display.span()) * 100.0).clamp(0.0, 100.0)
}

/// Highlight color: green inside the optimum band, amber outside it, blue for
/// gauges without a band.
pub fn bar_color(value: f64, optimum: Option<Band>) -> &'static str {
    match optimum {
        Some(band) if band.contains(value) => COLOR_OPTIMAL,
        Some(_) => COLOR_OFF_OPTIMAL,
        None => COLOR_NEUTRAL,
    }
}

/// Fixed-precision numeric text, with an optional unit suffix.
pub fn format_value(value: f64, decimals: u32, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("{:.*}", decimals as usize, value)
    } else {
        format!("{:.*} {}", decimals as usize, value, suffix)
    }
}

/// Status slot payload.
pub fn status_update(status: PlantStatus) -> StatusUpdate {
    let color = match status {
        PlantStatus::Steady => COLOR_OPTIMAL,
        PlantStatus::Warning => COLOR_OFF_OPTIMAL,
        PlantStatus::Critical => COLOR_CRITICAL,
        PlantStatus::Startup => COLOR_NEUTRAL,
    };
    StatusUpdate {
        text: status.label(),
        color,
    }
}

/// Build the full gauge payload for one tick: the five primaries plus the
/// derived metrics the profile enables.
pub fn build_gauges(profile: &PlantProfile, state: &ProcessState) -> Vec<GaugeUpdate> {
    let mut gauges = vec![
        gauge("pressure", state.pressure, profile.pressure.decimals, "",
            profile.pressure.display, profile.pressure.optimum),
        gauge("reactor_temp", state.reactor_temp, profile.reactor_temp.decimals, "",
            profile.reactor_temp.display, profile.reactor_temp.optimum),
        gauge("ratio", state.ratio, profile.ratio.decimals, "",
            profile.ratio.display, profile.ratio.optimum),
        gauge("soec_temp", state.soec_temp, profile.soec_temp.decimals, "",
            profile.soec_temp.display, profile.soec_temp.optimum),
        gauge("catalyst", state.catalyst, profile.catalyst.decimals, "",
            profile.catalyst.display, profile.catalyst.optimum),
        gauge("conversion", state.conversion, 1, "%", profile.conversion.clamp, None),
        gauge("selectivity", state.selectivity, 1, "%", profile.selectivity.clamp, None),
    ];
    if let Some(perf_clamp) = profile.performance {
        gauges.push(gauge("performance", state.performance, 1, "%", perf_clamp, None));
    }
    gauges
}

fn gauge(
    key: &'static str,
    value: f64,
    decimals: u32,
    suffix: &str,
    display: Band,
    optimum: Option<Band>,
) -> GaugeUpdate {
    GaugeUpdate {
        key,
        text: format_value(value, decimals, suffix),
        fill_pct: fill_pct(value, display),
        color: bar_color(value, optimum),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PlantProfile;

    #[test]
    fn fill_is_proportional_and_clamped() {
        let display = Band::new(50.0, 80.0);
        assert_eq!(fill_pct(65.0, display), 50.0);
        assert_eq!(fill_pct(50.0, display), 0.0);
        assert_eq!(fill_pct(80.0, display), 100.0);
        // Catalyst walks inside a much wider display band; values past the
        // bounds (custom profiles) still clamp.
        assert_eq!(fill_pct(40.0, display), 0.0);
        assert_eq!(fill_pct(90.0, display), 100.0);
    }

    #[test]
    fn optimum_band_drives_color() {
        let band = Some(Band::new(2.8, 3.2));
        assert_eq!(bar_color(3.0, band), COLOR_OPTIMAL);
        assert_eq!(bar_color(2.75, band), COLOR_OFF_OPTIMAL);
        assert_eq!(bar_color(3.0, None), COLOR_NEUTRAL);
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(65.0, 1, ""), "65.0");
        assert_eq!(format_value(3.05, 2, ""), "3.05");
        assert_eq!(format_value(720.0, 0, ""), "720");
        assert_eq!(format_value(87.4, 1, "%"), "87.4 %");
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_update(PlantStatus::Steady).color, COLOR_OPTIMAL);
        assert_eq!(status_update(PlantStatus::Warning).color, COLOR_OFF_OPTIMAL);
        assert_eq!(status_update(PlantStatus::Critical).color, COLOR_CRITICAL);
        assert_eq!(status_update(PlantStatus::Startup).color, COLOR_NEUTRAL);
        assert_eq!(status_update(PlantStatus::Critical).text, "CRITICAL");
    }

    #[test]
    fn gauge_payload_shape() {
        let baseline = PlantProfile::baseline();
        let state = ProcessState {
            current_tick: 0,
            pressure: 65.0,
            reactor_temp: 230.0,
            soec_temp: 800.0,
            ratio: 3.0,
            catalyst: 720.0,
            conversion: 65.0,
            selectivity: 90.0,
            performance: 0.0,
            status: PlantStatus::Steady,
        };
        let gauges = build_gauges(&baseline, &state);
        assert_eq!(gauges.len(), 7);
        assert!(gauges.iter().all(|g| !g.text.is_empty()));
        assert_eq!(gauges[0].key, "pressure");

        // The revised profile adds the performance slot.
        let revised = PlantProfile::revised();
        let gauges = build_gauges(&revised, &state);
        assert_eq!(gauges.len(), 8);
        assert_eq!(gauges.last().unwrap().key, "performance");
    }

    #[test]
    fn ratio_gauge_uses_wide_display_band() {
        let profile = PlantProfile::baseline();
        let state = ProcessState {
            current_tick: 0,
            pressure: 65.0,
            reactor_temp: 230.0,
            soec_temp: 800.0,
            ratio: 3.0,
            catalyst: 720.0,
            conversion: 65.0,
            selectivity: 90.0,
            performance: 0.0,
            status: PlantStatus::Steady,
        };
        let gauges = build_gauges(&profile, &state);
        let ratio = gauges.iter().find(|g| g.key == "ratio").unwrap();
        // 3.0 within [2.6, 3.4] -> exactly half fill, and inside the optimum.
        assert!((ratio.fill_pct - 50.0).abs() < 1e-9);
        assert_eq!(ratio.color, COLOR_OPTIMAL);
    }
}
