//! Session state and per-iteration logic for sertop.
//!
//! `App` is the context object threaded through the poll loop: it owns
//! the connection, the retained series, the current alert set, and all
//! UI state. One call to [`App::poll_tick`] is one iteration of the
//! read → parse → append → evaluate cycle; rendering reads the fields
//! it leaves behind. Operator actions land between iterations, never
//! mid-iteration.

use std::time::Duration;

use chrono::Local;
use crossterm::event::{KeyCode, KeyModifiers};
use log::{error, info, warn};

use crate::config::Config;
use crate::connection::{ConnectionManager, LineSource, PortOpener};
use crate::parser;
use crate::series::{Reading, SeriesBuffer};
use crate::state::{InputMode, ThresholdField};
use crate::thresholds::{self, Alert};

/// Main application state.
pub struct App {
    /// Effective configuration (CLI over file over defaults).
    pub config: Config,
    /// Serial handle lifecycle.
    pub connection: ConnectionManager,
    /// Retained history, three series in lockstep.
    pub series: SeriesBuffer,
    /// Alerts recomputed on the latest reading each iteration.
    pub alerts: Vec<Alert>,

    /// Total readings appended this session.
    pub readings_total: u64,
    /// Lines dropped by the parser this session.
    pub lines_dropped: u64,
    /// Most recent operator-facing status message.
    pub status: Option<String>,

    // UI state
    pub show_help: bool,
    pub input_mode: InputMode,
    pub input: String,
    pub threshold_field: ThresholdField,
}

impl App {
    /// Session over real serial ports.
    pub fn new(config: Config) -> Self {
        let series = SeriesBuffer::new(config.capacity);
        Self {
            config,
            connection: ConnectionManager::new(),
            series,
            alerts: Vec::new(),
            readings_total: 0,
            lines_dropped: 0,
            status: None,
            show_help: false,
            input_mode: InputMode::None,
            input: String::new(),
            threshold_field: ThresholdField::default(),
        }
    }

    /// Session with an injected connection manager (test seam).
    pub fn with_connection(config: Config, connection: ConnectionManager) -> Self {
        let mut app = Self::new(config);
        app.connection = connection;
        app
    }

    /// Deterministic pre-populated session for render tests. The last
    /// reading breaches `temp_max` so the alert banner has content.
    pub fn new_mock() -> Self {
        let mut app = Self::new(Config::default());
        let now = Local::now();
        for i in 0..60i64 {
            let phase = i as f64 / 8.0;
            let temperature = 24.0 + 4.0 * phase.sin();
            let humidity = 55.0 + 10.0 * phase.cos();
            app.series.push(&Reading {
                received: now - chrono::Duration::seconds(60 - i),
                device_ms: Some(i as u64 * 1000),
                temperature,
                humidity,
            });
            app.readings_total += 1;
        }
        app.series.push(&Reading {
            received: now,
            device_ms: Some(60_000),
            temperature: 36.5,
            humidity: 45.0,
        });
        app.readings_total += 1;
        app.refresh_alerts();
        app
    }

    /// One poll-loop iteration: read a line if connected, parse it,
    /// append in lockstep, and recompute the alert set.
    ///
    /// A read timeout leaves the buffers untouched; a parse failure is
    /// logged and dropped; a read fault has already forced the
    /// connection to `Disconnected` by the time it surfaces here.
    pub fn poll_tick(&mut self) {
        if self.connection.is_connected() {
            match self.connection.read_line() {
                Ok(Some(raw)) => match parser::parse_line(&raw, Local::now()) {
                    Ok(reading) => {
                        self.series.push(&reading);
                        self.readings_total += 1;
                    }
                    Err(e) => {
                        self.lines_dropped += 1;
                        warn!("dropped line {:?}: {e}", String::from_utf8_lossy(&raw));
                    }
                },
                Ok(None) => {} // timeout; absence of data is normal
                Err(e) => {
                    error!("{e}");
                    self.status = Some(format!("Read error: {e}"));
                }
            }
        }
        self.refresh_alerts();
    }

    /// Recompute the alert set from the newest reading and the current
    /// bounds. Ephemeral: nothing is retained across iterations.
    pub fn refresh_alerts(&mut self) {
        self.alerts = match self.series.latest() {
            Some(sample) => thresholds::evaluate_values(
                sample.temperature,
                sample.humidity,
                &self.config.thresholds,
            ),
            None => Vec::new(),
        };
    }

    /// Open the configured port. Errors are surfaced in the status line.
    pub fn connect(&mut self) {
        let port = self.config.port.clone();
        let baud = self.config.baud.as_u32();
        match self.connection.connect(&port, baud) {
            Ok(()) => self.status = Some(format!("Connected to {port}")),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    /// Close the port if open.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
        self.status = Some("Disconnected".to_string());
    }

    /// Empty all three series. Connection state is untouched.
    pub fn clear_data(&mut self) {
        self.series.clear();
        self.refresh_alerts();
        self.status = Some("Data cleared".to_string());
        info!("history cleared");
    }

    /// Final cleanup on session end.
    pub fn shutdown(&mut self) {
        self.connection.shutdown();
    }

    /// Handle keyboard input. Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        // Ctrl+C always quits
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        match self.input_mode {
            InputMode::Port => {
                self.handle_port_input(code);
                return false;
            }
            InputMode::Thresholds => {
                self.handle_threshold_input(code);
                return false;
            }
            InputMode::None => {}
        }

        if code == KeyCode::Esc {
            if self.show_help {
                self.show_help = false;
                return false;
            }
            return true; // Quit
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = !self.show_help,

            KeyCode::Char('c') => self.connect(),
            KeyCode::Char('d') => self.disconnect(),
            KeyCode::Char('x') => self.clear_data(),

            KeyCode::Char('b') => {
                self.config.baud = self.config.baud.next();
                self.status = Some(format!(
                    "Baud rate {} (takes effect on next connect)",
                    self.config.baud
                ));
            }
            KeyCode::Char('p') => {
                self.input_mode = InputMode::Port;
                self.input = self.config.port.clone();
            }
            KeyCode::Char('t') => {
                self.input_mode = InputMode::Thresholds;
                self.threshold_field = ThresholdField::default();
                self.load_threshold_field();
            }

            _ => {}
        }

        false
    }

    fn handle_port_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::None;
                self.input.clear();
            }
            KeyCode::Enter => {
                if !self.input.trim().is_empty() {
                    self.config.port = self.input.trim().to_string();
                    self.status = Some(format!("Port set to {}", self.config.port));
                }
                self.input_mode = InputMode::None;
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_threshold_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::None;
                self.input.clear();
            }
            KeyCode::Enter => {
                self.commit_threshold_field();
                self.input_mode = InputMode::None;
                self.input.clear();
                self.refresh_alerts();
            }
            KeyCode::Tab => {
                self.commit_threshold_field();
                self.threshold_field = self.threshold_field.next();
                self.load_threshold_field();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn load_threshold_field(&mut self) {
        let t = &self.config.thresholds;
        let current = match self.threshold_field {
            ThresholdField::TempMax => t.temp_max,
            ThresholdField::TempMin => t.temp_min,
            ThresholdField::HumMax => t.hum_max,
            ThresholdField::HumMin => t.hum_min,
        };
        self.input = format!("{current}");
    }

    fn commit_threshold_field(&mut self) {
        let Ok(value) = self.input.trim().parse::<f64>() else {
            self.status = Some(format!("Not a number: {:?}", self.input.trim()));
            return;
        };
        let t = &mut self.config.thresholds;
        match self.threshold_field {
            ThresholdField::TempMax => t.temp_max = value,
            ThresholdField::TempMin => t.temp_min = value,
            ThresholdField::HumMax => t.hum_max = value,
            ThresholdField::HumMin => t.hum_min = value,
        }
        if t.inverted() {
            // Accepted as-is; both bounds keep evaluating independently.
            warn!("threshold min >= max: {t:?}");
            self.status = Some("Warning: threshold min >= max".to_string());
        } else {
            self.status = Some(format!("{} = {value}", self.threshold_field.name()));
        }
    }
}

/// Test-only connection manager over a scripted line source.
pub fn scripted_connection(
    lines: Vec<std::io::Result<Option<Vec<u8>>>>,
) -> ConnectionManager {
    struct Scripted(std::collections::VecDeque<std::io::Result<Option<Vec<u8>>>>);
    impl LineSource for Scripted {
        fn read_line(&mut self) -> std::io::Result<Option<Vec<u8>>> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }
    struct Opener(std::sync::Mutex<Option<Vec<std::io::Result<Option<Vec<u8>>>>>>);
    impl PortOpener for Opener {
        fn open(
            &self,
            _port: &str,
            _baud: u32,
        ) -> Result<Box<dyn LineSource>, crate::error::ConnectionError> {
            let lines = self.0.lock().map(|mut g| g.take()).unwrap_or_default();
            Ok(Box::new(Scripted(lines.unwrap_or_default().into())))
        }
    }
    ConnectionManager::with_opener(
        Box::new(Opener(std::sync::Mutex::new(Some(lines)))),
        Duration::ZERO,
    )
}
