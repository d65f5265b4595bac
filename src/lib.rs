//! sertop - terminal dashboard for a serial-attached sensor
//!
//! Reads whitespace-delimited `<device-ms> <temperature> <humidity>`
//! lines from a serial port, retains a sliding window of readings,
//! evaluates them against configurable alert bounds, and renders live
//! charts, metrics, and a recent-data table in the terminal.
//!
//! # Architecture
//!
//! - [`connection`] - serial handle lifecycle (at most one open handle)
//! - [`parser`] - wire line to [`series::Reading`]
//! - [`series`] - lockstep ring buffers over [`ring_buffer`]
//! - [`thresholds`] - strict bound evaluation, recomputed per reading
//! - [`app`] - session state and the per-iteration poll logic
//! - [`ui`] / [`panels`] / [`theme`] - rendering
//! - [`config`] - YAML file + CLI precedence

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod app;
pub mod config;
pub mod connection;
pub mod error;
pub mod panels;
pub mod parser;
pub mod ring_buffer;
pub mod series;
pub mod state;
pub mod theme;
pub mod thresholds;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use connection::{ConnectionManager, ConnectionState};
pub use error::{ConfigError, ConnectionError, ParseError};
pub use ring_buffer::RingBuffer;
pub use series::{Reading, SeriesBuffer};
pub use state::BaudRate;
pub use thresholds::{Alert, AlertKind, ThresholdConfig};
