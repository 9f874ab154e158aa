// Copyright 2026 Veridis Energy Labs. All rights reserved.
// Power-to-Methanol Pilot Simulation Suite ("The Loop") - Plant Profiles

//! The unified formula set: every threshold, band, step size and penalty
//! weight the engine uses, collected in one configuration struct.
//!
//! Two presets exist. `baseline()` is the original pilot tuning; `revised()`
//! is the recalibrated tuning with a wider pressure envelope, a pressure-aware
//! selectivity model and the lagged performance index. Both run through the
//! same tick code -- there are no preset-specific code paths.

use serde::{Deserialize, Serialize};

/// Dashboard refresh period. The host timer owns this; the engine only
/// advances when `tick()` is called.
pub const TICK_INTERVAL_MS: u64 = 2000;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from custom-profile validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{0}: band minimum exceeds maximum")]
    InvertedBand(&'static str),
    #[error("{0}: step must be non-negative and finite")]
    BadStep(&'static str),
    #[error("{0}: optimum band extends outside the display bounds")]
    OptimumOutsideDisplay(&'static str),
}

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// A closed interval [min, max].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Intersection with another band. Callers guarantee overlap; the coupled
    /// windows always overlap their full clamp ranges.
    pub fn intersect(&self, other: Band) -> Band {
        Band::new(self.min.max(other.min), self.max.min(other.max))
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

// ---------------------------------------------------------------------------
// VariableSpec
// ---------------------------------------------------------------------------

/// Per-variable random-walk and display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Maximum per-tick perturbation magnitude.
    pub step: f64,
    /// Hard clamp applied after each walk step.
    pub walk: Band,
    /// Rounding precision after clamping.
    pub decimals: u32,
    /// Dashboard bar bounds (may be wider than the walk clamp).
    pub display: Band,
    /// Favorable sub-band highlighted by the dashboard, if any.
    pub optimum: Option<Band>,
}

impl VariableSpec {
    fn validate(&self, name: &'static str) -> Result<(), ProfileError> {
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(ProfileError::BadStep(name));
        }
        if !self.walk.is_ordered() || !self.display.is_ordered() {
            return Err(ProfileError::InvertedBand(name));
        }
        if let Some(opt) = self.optimum {
            if !opt.is_ordered() {
                return Err(ProfileError::InvertedBand(name));
            }
            if opt.min < self.display.min || opt.max > self.display.max {
                return Err(ProfileError::OptimumOutsideDisplay(name));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CoupledWindow
// ---------------------------------------------------------------------------

/// A setpoint window that tracks another variable:
/// target = base + gain * (driver - anchor), window = target +/- half_width.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoupledWindow {
    pub base: f64,
    pub gain: f64,
    pub anchor: f64,
    pub half_width: f64,
}

impl CoupledWindow {
    pub fn target(&self, driver: f64) -> f64 {
        self.base + self.gain * (driver - self.anchor)
    }

    /// Effective walk window for the current driver value.
    pub fn window(&self, driver: f64) -> Band {
        let target = self.target(driver);
        Band::new(target - self.half_width, target + self.half_width)
    }
}

// ---------------------------------------------------------------------------
// Formula models
// ---------------------------------------------------------------------------

/// Pressure contribution to the conversion estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PressureTerm {
    /// Weighted linear deviation from a setpoint. The baseline profile uses
    /// weight 0.0: pressure is walked but does not enter the estimate.
    Linear { setpoint: f64, weight: f64 },
    /// Flat bonus inside the optimum band, gentle decay above it, steeper
    /// penalty below it.
    OptimumBand {
        band: Band,
        bonus: f64,
        decay_above: f64,
        penalty_below: f64,
    },
}

/// Conversion estimate: baseline minus deviation penalties, plus the
/// profile's pressure term, clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionModel {
    pub base: f64,
    pub temp_setpoint: f64,
    pub temp_weight: f64,
    pub ratio_setpoint: f64,
    pub ratio_weight: f64,
    pub pressure: PressureTerm,
    /// Amplitude of the symmetric measurement-noise term (0 disables it).
    pub noise_amp: f64,
    pub clamp: Band,
}

/// Pressure contribution to the selectivity estimate. Low pressure favors the
/// reverse water-gas shift side reaction, hence the penalty below the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PressureResponse {
    /// Full bonus inside this band.
    pub bonus_band: Band,
    pub bonus: f64,
    /// Reduced bonus above the bonus band, up to this ceiling.
    pub high_band: Band,
    pub high_bonus: f64,
    /// Below this pressure, selectivity drops per bar of shortfall.
    pub low_threshold: f64,
    pub low_penalty_per_bar: f64,
}

/// Selectivity estimate: baseline minus deviation penalties, with an optional
/// pressure response, clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectivityModel {
    pub base: f64,
    pub temp_setpoint: f64,
    pub temp_weight: f64,
    pub ratio_setpoint: f64,
    pub ratio_weight: f64,
    pub pressure: Option<PressureResponse>,
    pub clamp: Band,
}

// ---------------------------------------------------------------------------
// StatusThresholds
// ---------------------------------------------------------------------------

/// Ordered classifier thresholds. Checked first-match: startup, critical,
/// warning, steady.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// STARTUP when pressure falls below this.
    pub startup_pressure: f64,
    /// STARTUP when reactor temperature falls below this.
    pub startup_reactor_temp: f64,
    /// STARTUP when SOEC temperature falls below this.
    pub startup_soec_temp: f64,
    /// CRITICAL when reactor temperature exceeds this.
    pub critical_reactor_temp: f64,
    /// CRITICAL when SOEC temperature exceeds this.
    pub critical_soec_temp: f64,
    /// CRITICAL when the ratio leaves this band.
    pub critical_ratio: Band,
    /// WARNING when the ratio leaves this narrower band.
    pub warning_ratio: Band,
}

// ---------------------------------------------------------------------------
// InitialConditions
// ---------------------------------------------------------------------------

/// Primary-variable values the plant resets to. Derived metrics are seeded
/// from these at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InitialConditions {
    pub pressure: f64,
    pub reactor_temp: f64,
    pub soec_temp: f64,
    pub ratio: f64,
    pub catalyst: f64,
}

// ---------------------------------------------------------------------------
// PlantProfile
// ---------------------------------------------------------------------------

/// Complete plant tuning: walk specs, couplings, formula models, classifier
/// thresholds and initial conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantProfile {
    pub name: String,
    pub pressure: VariableSpec,
    pub reactor_temp: VariableSpec,
    /// Reactor setpoint tracks pressure: higher pressure runs hotter.
    pub reactor_coupling: CoupledWindow,
    pub soec_temp: VariableSpec,
    /// SOEC setpoint tracks the ratio: more H2 demand runs the stack hotter.
    pub soec_coupling: CoupledWindow,
    pub ratio: VariableSpec,
    /// Soft mean-reversion nudge applied when the ratio leaves the optimum
    /// band after its walk. No-op inside the band.
    pub ratio_correction: f64,
    pub catalyst: VariableSpec,
    pub conversion: ConversionModel,
    pub selectivity: SelectivityModel,
    /// Clamp band for the lagged performance index; None disables it.
    pub performance: Option<Band>,
    pub thresholds: StatusThresholds,
    pub initial: InitialConditions,
}

impl PlantProfile {
    /// Original pilot tuning.
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            pressure: VariableSpec {
                step: 1.5,
                walk: Band::new(50.0, 80.0),
                decimals: 1,
                display: Band::new(50.0, 80.0),
                optimum: None,
            },
            reactor_temp: VariableSpec {
                step: 2.0,
                walk: Band::new(200.0, 250.0),
                decimals: 1,
                display: Band::new(200.0, 250.0),
                optimum: None,
            },
            reactor_coupling: CoupledWindow {
                base: 210.0,
                gain: 0.8,
                anchor: 50.0,
                half_width: 5.0,
            },
            soec_temp: VariableSpec {
                step: 8.0,
                walk: Band::new(700.0, 900.0),
                decimals: 1,
                display: Band::new(700.0, 900.0),
                optimum: None,
            },
            soec_coupling: CoupledWindow {
                base: 750.0,
                gain: 200.0,
                anchor: 2.8,
                half_width: 20.0,
            },
            ratio: VariableSpec {
                step: 0.08,
                walk: Band::new(2.7, 3.3),
                decimals: 2,
                display: Band::new(2.6, 3.4),
                optimum: Some(Band::new(2.8, 3.2)),
            },
            ratio_correction: 0.05,
            catalyst: VariableSpec {
                step: 5.0,
                walk: Band::new(650.0, 800.0),
                decimals: 0,
                display: Band::new(600.0, 1800.0),
                optimum: Some(Band::new(700.0, 750.0)),
            },
            conversion: ConversionModel {
                base: 65.0,
                temp_setpoint: 230.0,
                temp_weight: 0.8,
                ratio_setpoint: 3.0,
                ratio_weight: 25.0,
                pressure: PressureTerm::Linear {
                    setpoint: 65.0,
                    weight: 0.0,
                },
                noise_amp: 0.0,
                clamp: Band::new(10.0, 95.0),
            },
            selectivity: SelectivityModel {
                base: 90.0,
                temp_setpoint: 230.0,
                temp_weight: 0.5,
                ratio_setpoint: 3.0,
                ratio_weight: 20.0,
                pressure: None,
                clamp: Band::new(60.0, 98.0),
            },
            performance: None,
            thresholds: StatusThresholds {
                startup_pressure: 55.0,
                startup_reactor_temp: 210.0,
                startup_soec_temp: 720.0,
                critical_reactor_temp: 245.0,
                critical_soec_temp: 880.0,
                critical_ratio: Band::new(2.7, 3.3),
                warning_ratio: Band::new(2.8, 3.2),
            },
            initial: InitialConditions {
                pressure: 65.0,
                reactor_temp: 230.0,
                soec_temp: 800.0,
                ratio: 3.0,
                catalyst: 720.0,
            },
        }
    }

    /// Recalibrated tuning: wider pressure envelope with an
    /// 80-95 bar optimum, pressure-aware selectivity, lagged performance
    /// index, and a higher startup pressure threshold.
    pub fn revised() -> Self {
        let mut profile = Self::baseline();
        profile.name = "revised".to_string();
        profile.pressure = VariableSpec {
            step: 1.5,
            walk: Band::new(50.0, 100.0),
            decimals: 1,
            display: Band::new(50.0, 100.0),
            optimum: Some(Band::new(80.0, 95.0)),
        };
        profile.conversion = ConversionModel {
            base: 90.0,
            temp_setpoint: 230.0,
            temp_weight: 0.2,
            ratio_setpoint: 3.0,
            ratio_weight: 5.0,
            pressure: PressureTerm::OptimumBand {
                band: Band::new(80.0, 95.0),
                bonus: 4.0,
                decay_above: 0.2,
                penalty_below: 0.3,
            },
            noise_amp: 0.5,
            clamp: Band::new(90.0, 98.0),
        };
        profile.selectivity = SelectivityModel {
            base: 90.0,
            temp_setpoint: 230.0,
            temp_weight: 0.5,
            ratio_setpoint: 3.0,
            ratio_weight: 20.0,
            pressure: Some(PressureResponse {
                bonus_band: Band::new(75.0, 90.0),
                bonus: 3.0,
                high_band: Band::new(90.0, 100.0),
                high_bonus: 1.5,
                low_threshold: 65.0,
                low_penalty_per_bar: 0.25,
            }),
            clamp: Band::new(70.0, 99.0),
        };
        profile.performance = Some(Band::new(0.0, 100.0));
        profile.thresholds.startup_pressure = 75.0;
        // Baseline default (65 bar) sits below the revised startup threshold;
        // start mid optimum band instead.
        profile.initial.pressure = 85.0;
        profile
    }

    /// Validate a custom profile. The built-in presets always pass.
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.pressure.validate("pressure")?;
        self.reactor_temp.validate("reactor_temp")?;
        self.soec_temp.validate("soec_temp")?;
        self.ratio.validate("ratio")?;
        self.catalyst.validate("catalyst")?;
        if !self.conversion.clamp.is_ordered() {
            return Err(ProfileError::InvertedBand("conversion"));
        }
        if !self.selectivity.clamp.is_ordered() {
            return Err(ProfileError::InvertedBand("selectivity"));
        }
        if let Some(perf) = self.performance {
            if !perf.is_ordered() {
                return Err(ProfileError::InvertedBand("performance"));
            }
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
