//! Readings and the lockstep series history.
//!
//! `SeriesBuffer` keeps three parallel ring buffers (timestamps,
//! temperatures, humidities) that are only ever mutated together, so
//! index `i` in each refers to the same reading.

use chrono::{DateTime, Local};

use crate::ring_buffer::RingBuffer;

/// One validated sensor reading. Immutable once created.
///
/// `received` is the wall-clock receipt time, which is what the time
/// axis uses; `device_ms` is the device's own millisecond counter,
/// retained for display only so a device clock reset can never make the
/// axis go backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Wall-clock time the line was received.
    pub received: DateTime<Local>,
    /// Device-reported millisecond timestamp, when the token was numeric.
    pub device_ms: Option<u64>,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// A (time, temperature, humidity) triple reassembled from the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Receipt time of the reading.
    pub at: DateTime<Local>,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// Three parallel ring buffers of equal capacity, appended in lockstep.
///
/// All mutation goes through [`SeriesBuffer::push`] and
/// [`SeriesBuffer::clear`], which is what upholds the equal-length
/// invariant.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    timestamps: RingBuffer<DateTime<Local>>,
    temperatures: RingBuffer<f64>,
    humidities: RingBuffer<f64>,
}

impl SeriesBuffer {
    /// Default retained history length.
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Create an empty series with the given per-series capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            timestamps: RingBuffer::new(capacity),
            temperatures: RingBuffer::new(capacity),
            humidities: RingBuffer::new(capacity),
        }
    }

    /// Append a reading to all three series. Evicts the oldest entry of
    /// each once capacity is reached, keeping the buffers aligned.
    pub fn push(&mut self, reading: &Reading) {
        self.timestamps.push(reading.received);
        self.temperatures.push(reading.temperature);
        self.humidities.push(reading.humidity);
        debug_assert!(
            self.timestamps.len() == self.temperatures.len()
                && self.temperatures.len() == self.humidities.len()
        );
    }

    /// Empty all three series. Connection state is not this type's
    /// concern and is unaffected.
    pub fn clear(&mut self) {
        self.timestamps.clear();
        self.temperatures.clear();
        self.humidities.clear();
    }

    /// Number of retained readings.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when no readings are retained.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Per-series capacity.
    pub fn capacity(&self) -> usize {
        self.timestamps.capacity()
    }

    /// The most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        Some(Sample {
            at: *self.timestamps.latest()?,
            temperature: *self.temperatures.latest()?,
            humidity: *self.humidities.latest()?,
        })
    }

    /// The `k` most recent samples in chronological order (oldest of the
    /// window first).
    pub fn last(&self, k: usize) -> Vec<Sample> {
        self.timestamps
            .last(k)
            .zip(self.temperatures.last(k))
            .zip(self.humidities.last(k))
            .map(|((at, temperature), humidity)| Sample {
                at: *at,
                temperature: *temperature,
                humidity: *humidity,
            })
            .collect()
    }

    /// Change from the previous temperature to the latest, if at least
    /// two readings exist.
    pub fn temperature_delta(&self) -> Option<f64> {
        delta(self.temperatures.last(2).copied().collect())
    }

    /// Change from the previous humidity to the latest, if at least two
    /// readings exist.
    pub fn humidity_delta(&self) -> Option<f64> {
        delta(self.humidities.last(2).copied().collect())
    }

    /// Temperature chart points as (seconds since oldest retained, °C).
    pub fn temperature_points(&self) -> Vec<(f64, f64)> {
        self.points(&self.temperatures)
    }

    /// Humidity chart points as (seconds since oldest retained, %).
    pub fn humidity_points(&self) -> Vec<(f64, f64)> {
        self.points(&self.humidities)
    }

    /// Observed (min, max) of the temperature series.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        if self.temperatures.is_empty() {
            return None;
        }
        Some((self.temperatures.min(), self.temperatures.max()))
    }

    /// Observed (min, max) of the humidity series.
    pub fn humidity_range(&self) -> Option<(f64, f64)> {
        if self.humidities.is_empty() {
            return None;
        }
        Some((self.humidities.min(), self.humidities.max()))
    }

    /// Seconds spanned by the retained history.
    pub fn time_span_secs(&self) -> f64 {
        match (self.timestamps.oldest(), self.timestamps.latest()) {
            (Some(first), Some(last)) => {
                (*last - *first).num_milliseconds() as f64 / 1000.0
            }
            _ => 0.0,
        }
    }

    fn points(&self, values: &RingBuffer<f64>) -> Vec<(f64, f64)> {
        let Some(first) = self.timestamps.oldest().copied() else {
            return Vec::new();
        };
        self.timestamps
            .iter()
            .zip(values.iter())
            .map(|(at, v)| ((*at - first).num_milliseconds() as f64 / 1000.0, *v))
            .collect()
    }
}

fn delta(window: Vec<f64>) -> Option<f64> {
    match window.as_slice() {
        [prev, curr] => Some(curr - prev),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn reading(offset_secs: i64, temperature: f64, humidity: f64) -> Reading {
        Reading {
            received: Local::now() + Duration::seconds(offset_secs),
            device_ms: Some(offset_secs as u64 * 1000),
            temperature,
            humidity,
        }
    }

    #[test]
    fn test_lockstep_lengths() {
        let mut series = SeriesBuffer::new(4);
        for i in 0..10 {
            series.push(&reading(i, 20.0 + i as f64, 50.0));
            assert_eq!(series.len(), (i as usize + 1).min(4));
        }
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_eviction_preserves_alignment() {
        let mut series = SeriesBuffer::new(3);
        for i in 0..5 {
            series.push(&reading(i, i as f64, 100.0 - i as f64));
        }
        let samples = series.last(3);
        assert_eq!(samples.len(), 3);
        // Oldest retained is reading #2; temp and hum must line up.
        assert!((samples[0].temperature - 2.0).abs() < f64::EPSILON);
        assert!((samples[0].humidity - 98.0).abs() < f64::EPSILON);
        assert!((samples[2].temperature - 4.0).abs() < f64::EPSILON);
        assert!((samples[2].humidity - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clear_empties_all_three() {
        let mut series = SeriesBuffer::new(10);
        series.push(&reading(0, 21.0, 60.0));
        series.push(&reading(1, 22.0, 61.0));
        series.clear();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
        assert!(series.temperature_points().is_empty());
    }

    #[test]
    fn test_last_window_chronological() {
        let mut series = SeriesBuffer::new(100);
        for i in 0..15 {
            series.push(&reading(i, i as f64, 50.0));
        }
        let window = series.last(10);
        assert_eq!(window.len(), 10);
        assert!((window[0].temperature - 5.0).abs() < f64::EPSILON);
        assert!((window[9].temperature - 14.0).abs() < f64::EPSILON);
        assert!(window.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_delta_requires_two_points() {
        let mut series = SeriesBuffer::new(10);
        assert_eq!(series.temperature_delta(), None);

        series.push(&reading(0, 21.0, 60.0));
        assert_eq!(series.temperature_delta(), None);

        series.push(&reading(1, 22.5, 58.0));
        assert!((series.temperature_delta().unwrap() - 1.5).abs() < 1e-9);
        assert!((series.humidity_delta().unwrap() - (-2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_points_monotonic_x() {
        let mut series = SeriesBuffer::new(100);
        for i in 0..5 {
            series.push(&reading(i * 2, 20.0, 50.0));
        }
        let points = series.temperature_points();
        assert_eq!(points.len(), 5);
        assert!((points[0].0 - 0.0).abs() < 1e-9);
        assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_ranges() {
        let mut series = SeriesBuffer::new(10);
        assert_eq!(series.temperature_range(), None);
        series.push(&reading(0, 18.0, 40.0));
        series.push(&reading(1, 26.0, 70.0));
        assert_eq!(series.temperature_range(), Some((18.0, 26.0)));
        assert_eq!(series.humidity_range(), Some((40.0, 70.0)));
    }
}
