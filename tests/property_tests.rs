//! Property tests for the buffer and parser layers.
#![allow(clippy::unwrap_used)]

use chrono::Local;
use proptest::prelude::*;

use sertop::parser::parse_line;
use sertop::ring_buffer::RingBuffer;
use sertop::series::SeriesBuffer;

proptest! {
    /// The buffer never holds more than its capacity, and the newest
    /// push is always the latest element.
    #[test]
    fn ring_buffer_respects_capacity(
        capacity in 1usize..64,
        values in prop::collection::vec(any::<i64>(), 0..256),
    ) {
        let mut buf = RingBuffer::new(capacity);
        for &v in &values {
            buf.push(v);
        }
        prop_assert!(buf.len() <= capacity);
        prop_assert_eq!(buf.len(), values.len().min(capacity));
        prop_assert_eq!(buf.latest(), values.last());
    }

    /// `last(k)` yields the k newest elements in push order.
    #[test]
    fn ring_buffer_last_window(
        capacity in 1usize..32,
        values in prop::collection::vec(any::<u32>(), 0..64),
        k in 0usize..40,
    ) {
        let mut buf = RingBuffer::new(capacity);
        for &v in &values {
            buf.push(v);
        }
        let window: Vec<_> = buf.last(k).copied().collect();
        prop_assert_eq!(window.len(), k.min(buf.len()));

        let retained: Vec<_> = values
            .iter()
            .skip(values.len().saturating_sub(capacity))
            .copied()
            .collect();
        let expected: Vec<_> = retained
            .iter()
            .skip(retained.len().saturating_sub(k))
            .copied()
            .collect();
        prop_assert_eq!(window, expected);
    }

    /// Well-formed lines parse back to the values they encode.
    #[test]
    fn parse_line_roundtrip(
        device_ms in 0u64..1_000_000_000,
        temperature in -100.0f64..200.0,
        humidity in 0.0f64..100.0,
    ) {
        let raw = format!("{device_ms} {temperature:.4} {humidity:.4}");
        let reading = parse_line(raw.as_bytes(), Local::now()).unwrap();
        prop_assert_eq!(reading.device_ms, Some(device_ms));
        prop_assert!((reading.temperature - temperature).abs() < 1e-3);
        prop_assert!((reading.humidity - humidity).abs() < 1e-3);
    }

    /// Arbitrary bytes never panic the parser.
    #[test]
    fn parse_line_never_panics(raw in prop::collection::vec(any::<u8>(), 0..128)) {
        let _ = parse_line(&raw, Local::now());
    }

    /// The three series stay in lockstep under any mix of valid and
    /// invalid lines: only parsed readings are appended, and the
    /// window length never exceeds capacity.
    #[test]
    fn series_stays_in_lockstep(
        capacity in 1usize..32,
        lines in prop::collection::vec(
            prop_oneof![
                (0u64..100_000, -50.0f64..100.0, 0.0f64..100.0)
                    .prop_map(|(ms, t, h)| format!("{ms} {t:.2} {h:.2}")),
                "[a-z ]{0,16}".prop_map(|s| s),
            ],
            0..128,
        ),
    ) {
        let mut series = SeriesBuffer::new(capacity);
        let mut accepted = 0usize;
        for raw in &lines {
            if let Ok(reading) = parse_line(raw.as_bytes(), Local::now()) {
                series.push(&reading);
                accepted += 1;
            }
        }
        prop_assert_eq!(series.len(), accepted.min(capacity));
        let window = series.last(capacity);
        prop_assert_eq!(window.len(), series.len());
    }
}
