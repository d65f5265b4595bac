//! Threshold configuration and breach evaluation.
//!
//! Evaluation is a pure function over the newest reading and the current
//! bounds: no hysteresis, no stored state. An alert fires anew every
//! tick its condition holds and disappears the tick it clears.

use serde::{Deserialize, Serialize};

use crate::series::Reading;

/// Operator-configurable alert bounds.
///
/// A min that meets or exceeds its max is not rejected; each bound is
/// evaluated independently, so an inverted range can breach both sides
/// of a metric at once. [`ThresholdConfig::inverted`] lets callers warn
/// about it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Maximum temperature in °C.
    #[serde(default = "default_temp_max")]
    pub temp_max: f64,
    /// Minimum temperature in °C.
    #[serde(default = "default_temp_min")]
    pub temp_min: f64,
    /// Maximum relative humidity in %.
    #[serde(default = "default_hum_max")]
    pub hum_max: f64,
    /// Minimum relative humidity in %.
    #[serde(default = "default_hum_min")]
    pub hum_min: f64,
}

fn default_temp_max() -> f64 {
    35.0
}
fn default_temp_min() -> f64 {
    10.0
}
fn default_hum_max() -> f64 {
    80.0
}
fn default_hum_min() -> f64 {
    20.0
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temp_max: default_temp_max(),
            temp_min: default_temp_min(),
            hum_max: default_hum_max(),
            hum_min: default_hum_min(),
        }
    }
}

impl ThresholdConfig {
    /// True when either metric has min >= max.
    pub fn inverted(&self) -> bool {
        self.temp_min >= self.temp_max || self.hum_min >= self.hum_max
    }
}

/// Which bound was breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Temperature strictly above `temp_max`.
    TempHigh,
    /// Temperature strictly below `temp_min`.
    TempLow,
    /// Humidity strictly above `hum_max`.
    HumHigh,
    /// Humidity strictly below `hum_min`.
    HumLow,
}

/// One breached bound, with the measured value and the bound it crossed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alert {
    /// The breached bound.
    pub kind: AlertKind,
    /// Measured value.
    pub value: f64,
    /// The configured bound that was crossed.
    pub bound: f64,
}

impl Alert {
    /// Operator-facing banner text.
    pub fn message(&self) -> String {
        match self.kind {
            AlertKind::TempHigh => {
                format!("Temperature above limit: {:.1}°C > {:.1}°C", self.value, self.bound)
            }
            AlertKind::TempLow => {
                format!("Temperature below limit: {:.1}°C < {:.1}°C", self.value, self.bound)
            }
            AlertKind::HumHigh => {
                format!("Humidity above limit: {:.1}% > {:.1}%", self.value, self.bound)
            }
            AlertKind::HumLow => {
                format!("Humidity below limit: {:.1}% < {:.1}%", self.value, self.bound)
            }
        }
    }
}

/// Evaluate the four bounds against a reading. Zero, one, or several
/// alerts may fire in the same tick; all that apply are returned.
pub fn evaluate(reading: &Reading, config: &ThresholdConfig) -> Vec<Alert> {
    evaluate_values(reading.temperature, reading.humidity, config)
}

/// Same as [`evaluate`], over bare metric values.
pub fn evaluate_values(temperature: f64, humidity: f64, config: &ThresholdConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if temperature > config.temp_max {
        alerts.push(Alert {
            kind: AlertKind::TempHigh,
            value: temperature,
            bound: config.temp_max,
        });
    }
    if temperature < config.temp_min {
        alerts.push(Alert {
            kind: AlertKind::TempLow,
            value: temperature,
            bound: config.temp_min,
        });
    }
    if humidity > config.hum_max {
        alerts.push(Alert {
            kind: AlertKind::HumHigh,
            value: humidity,
            bound: config.hum_max,
        });
    }
    if humidity < config.hum_min {
        alerts.push(Alert {
            kind: AlertKind::HumLow,
            value: humidity,
            bound: config.hum_min,
        });
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn reading(temperature: f64, humidity: f64) -> Reading {
        Reading {
            received: Local::now(),
            device_ms: None,
            temperature,
            humidity,
        }
    }

    #[test]
    fn test_no_alerts_inside_bounds() {
        let config = ThresholdConfig::default();
        let alerts = evaluate(&reading(20.0, 50.0), &config);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_two_alerts_fire_together() {
        let config = ThresholdConfig::default(); // 35/10/80/20
        let alerts = evaluate(&reading(36.0, 15.0), &config);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::TempHigh);
        assert_eq!(alerts[1].kind, AlertKind::HumLow);
    }

    #[test]
    fn test_strict_comparison_at_bound() {
        let config = ThresholdConfig::default();
        // Exactly at the bound is not a breach.
        assert!(evaluate(&reading(35.0, 20.0), &config).is_empty());
        assert!(evaluate(&reading(10.0, 80.0), &config).is_empty());
    }

    #[test]
    fn test_alert_carries_value_and_bound() {
        let config = ThresholdConfig::default();
        let alerts = evaluate(&reading(37.5, 50.0), &config);
        assert_eq!(alerts.len(), 1);
        assert!((alerts[0].value - 37.5).abs() < f64::EPSILON);
        assert!((alerts[0].bound - 35.0).abs() < f64::EPSILON);
        assert!(alerts[0].message().contains("37.5"));
        assert!(alerts[0].message().contains("35.0"));
    }

    #[test]
    fn test_stateless_refire_every_call() {
        let config = ThresholdConfig::default();
        let r = reading(40.0, 50.0);
        for _ in 0..3 {
            assert_eq!(evaluate(&r, &config).len(), 1);
        }
    }

    #[test]
    fn test_inverted_bounds_breach_both_sides() {
        let config = ThresholdConfig {
            temp_max: 10.0,
            temp_min: 30.0,
            ..ThresholdConfig::default()
        };
        assert!(config.inverted());
        // 20.0 is above the max and below the min at the same time.
        let alerts = evaluate(&reading(20.0, 50.0), &config);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::TempHigh);
        assert_eq!(alerts[1].kind, AlertKind::TempLow);
    }

    #[test]
    fn test_default_bounds() {
        let config = ThresholdConfig::default();
        assert!((config.temp_max - 35.0).abs() < f64::EPSILON);
        assert!((config.temp_min - 10.0).abs() < f64::EPSILON);
        assert!((config.hum_max - 80.0).abs() < f64::EPSILON);
        assert!((config.hum_min - 20.0).abs() < f64::EPSILON);
        assert!(!config.inverted());
    }
}
