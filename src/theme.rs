//! Theme and color system for sertop.
//!
//! Dark theme with rounded borders and one accent color per panel.

use chrono::{DateTime, Local};
use ratatui::style::Color;

/// Panel border colors.
pub mod borders {
    use ratatui::style::Color;
    use ratatui::widgets::BorderType;

    pub const STATUS: Color = Color::Rgb(100, 200, 255); // Bright cyan
    pub const ALERTS: Color = Color::Rgb(255, 100, 100); // Red
    pub const OK: Color = Color::Rgb(100, 255, 150); // Bright green
    pub const METRICS: Color = Color::Rgb(220, 180, 100); // Gold
    pub const TEMPERATURE: Color = Color::Rgb(255, 107, 107); // Warm red
    pub const HUMIDITY: Color = Color::Rgb(78, 205, 196); // Teal
    pub const TABLE: Color = Color::Rgb(180, 120, 255); // Purple

    /// Rounded border style across all panels.
    pub const STYLE: BorderType = BorderType::Rounded;
}

/// Graph and reference-line colors.
pub mod graph {
    use ratatui::style::Color;

    pub const TEMPERATURE: Color = Color::Rgb(255, 107, 107);
    pub const HUMIDITY: Color = Color::Rgb(78, 205, 196);
    pub const BOUND_MAX: Color = Color::Rgb(200, 80, 80); // Dashed max line
    pub const BOUND_MIN: Color = Color::Rgb(80, 120, 200); // Dashed min line
}

/// Temperature color gradient (Celsius): cool cyan through green to red.
pub fn temp_color(temp: f64) -> Color {
    if temp > 35.0 {
        Color::Rgb(255, 80, 80)
    } else if temp > 28.0 {
        Color::Rgb(255, 180, 50)
    } else if temp > 18.0 {
        Color::Rgb(100, 220, 100)
    } else if temp > 10.0 {
        Color::Rgb(80, 180, 220)
    } else {
        Color::Rgb(120, 140, 255)
    }
}

/// Connection state color: green when connected, gray otherwise.
pub fn state_color(connected: bool) -> Color {
    if connected {
        Color::Rgb(100, 255, 100)
    } else {
        Color::Rgb(120, 120, 140)
    }
}

/// Clock string for the table and metrics row.
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Signed delta string, or `--` when no previous point exists.
pub fn format_delta(delta: Option<f64>, unit: &str) -> String {
    match delta {
        Some(d) => format!("{d:+.1}{unit}"),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_color_gradient() {
        // Hot temps should be red.
        if let Color::Rgb(r, g, _) = temp_color(40.0) {
            assert!(r > 200 && g < 120, "hot temp should be red");
        }
        // Cool temps should be blue/cyan.
        if let Color::Rgb(_, _, b) = temp_color(5.0) {
            assert!(b > 150, "cool temp should be blue");
        }
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(Some(1.5), "°C"), "+1.5°C");
        assert_eq!(format_delta(Some(-0.25), "%"), "-0.2%");
        assert_eq!(format_delta(None, "°C"), "--");
    }

    #[test]
    fn test_format_clock() {
        let at = Local::now();
        let s = format_clock(&at);
        assert_eq!(s.len(), 8);
        assert_eq!(s.matches(':').count(), 2);
    }
}
