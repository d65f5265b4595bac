//! Error types for sertop.
//!
//! Per-line parse failures are a separate channel from connection-level
//! faults: a malformed line is dropped and the session continues, while
//! any open/read fault forces the connection back to `Disconnected`.

use std::io;
use std::str::Utf8Error;
use thiserror::Error;

/// Connection-level errors. Always surfaced to the operator and always
/// accompanied by a transition to `ConnectionState::Disconnected`.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Failed to open the serial device.
    #[error("failed to open {port}: {source}")]
    Open {
        /// The port identifier that failed to open.
        port: String,
        /// Underlying serial error.
        #[source]
        source: serialport::Error,
    },

    /// I/O fault while reading from an open device.
    #[error("serial read failed: {0}")]
    Read(#[source] io::Error),

    /// A read was attempted without an open handle.
    #[error("not connected")]
    NotConnected,
}

/// Per-line parse failures. The offending line is dropped; buffers are
/// never mutated on any of these.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The raw bytes are not valid UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    MalformedEncoding(#[from] Utf8Error),

    /// Fewer than the three required fields were present.
    #[error("expected at least 3 fields, got {0}")]
    ShortRecord(usize),

    /// A temperature or humidity field did not parse as a float.
    #[error("field '{field}' is not a number: {value:?}")]
    MalformedValue {
        /// Which field failed to parse.
        field: &'static str,
        /// The raw token.
        value: String,
    },
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found or unreadable.
    #[error("configuration file not found: {0}")]
    NotFound(String),

    /// YAML parse error with line number.
    #[error("configuration error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Failed to write the configuration file.
    #[error("failed to write configuration: {0}")]
    Write(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_includes_port() {
        let err = ConnectionError::Open {
            port: "/dev/ttyUSB0".to_string(),
            source: serialport::Error::new(serialport::ErrorKind::NoDevice, "no such device"),
        };
        let display = err.to_string();
        assert!(display.contains("/dev/ttyUSB0"), "got: {display}");
    }

    #[test]
    fn test_read_error_includes_cause() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged");
        let err = ConnectionError::Read(io_err);
        assert!(err.to_string().contains("serial read failed"));
    }

    #[test]
    fn test_short_record_includes_count() {
        let err = ParseError::ShortRecord(2);
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_malformed_value_includes_token() {
        let err = ParseError::MalformedValue {
            field: "temperature",
            value: "abc".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("temperature"));
        assert!(display.contains("abc"));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let err = ConfigError::Parse {
            line: 7,
            message: "invalid value".to_string(),
        };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConnectionError>();
        assert_send_sync::<ParseError>();
        assert_send_sync::<ConfigError>();
    }
}
