//! Wire-format parser for device lines.
//!
//! One reading per newline-terminated line, whitespace-separated:
//! `<device-timestamp-ms> <temperature> <humidity>`, e.g.
//! `114538 21.6 74.2`. The resulting [`Reading`] is stamped with the
//! receipt time, not the device timestamp, so the plotted axis stays
//! monotonic even if the device clock resets.

use chrono::{DateTime, Local};

use crate::error::ParseError;
use crate::series::Reading;

/// Parse one raw device line into a validated [`Reading`].
///
/// Each line is independent: any failure drops the line without
/// affecting the session or any retained history.
///
/// # Errors
///
/// - [`ParseError::MalformedEncoding`] when the bytes are not UTF-8.
/// - [`ParseError::ShortRecord`] when fewer than 3 fields are present.
/// - [`ParseError::MalformedValue`] when temperature or humidity does
///   not parse as a float.
pub fn parse_line(raw: &[u8], received: DateTime<Local>) -> Result<Reading, ParseError> {
    let text = std::str::from_utf8(raw)?;
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(ParseError::ShortRecord(tokens.len()));
    }

    // The device timestamp is accepted but only kept for display; a
    // non-numeric token here is not a reason to drop the line.
    let device_ms = tokens[0].parse::<u64>().ok();

    let temperature = tokens[1]
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedValue {
            field: "temperature",
            value: tokens[1].to_string(),
        })?;
    let humidity = tokens[2]
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedValue {
            field: "humidity",
            value: tokens[2].to_string(),
        })?;

    Ok(Reading {
        received,
        device_ms,
        temperature,
        humidity,
    })
}
