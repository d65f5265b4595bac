//! UI state types for sertop.

use serde::{Deserialize, Serialize};

/// Supported baud rates. The device side only speaks this fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    #[default]
    B115200,
}

impl BaudRate {
    /// All supported rates, slowest first.
    pub const ALL: [BaudRate; 5] = [
        Self::B9600,
        Self::B19200,
        Self::B38400,
        Self::B57600,
        Self::B115200,
    ];

    /// The numeric rate.
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::B9600 => 9_600,
            Self::B19200 => 19_200,
            Self::B38400 => 38_400,
            Self::B57600 => 57_600,
            Self::B115200 => 115_200,
        }
    }

    /// Cycle to the next rate, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Self::B9600 => Self::B19200,
            Self::B19200 => Self::B38400,
            Self::B38400 => Self::B57600,
            Self::B57600 => Self::B115200,
            Self::B115200 => Self::B9600,
        }
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .find(|b| b.as_u32() == value)
            .copied()
            .ok_or_else(|| format!("unsupported baud rate {value} (expected one of 9600, 19200, 38400, 57600, 115200)"))
    }
}

impl From<BaudRate> for u32 {
    fn from(value: BaudRate) -> Self {
        value.as_u32()
    }
}

impl std::fmt::Display for BaudRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Which threshold bound the edit overlay is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdField {
    #[default]
    TempMax,
    TempMin,
    HumMax,
    HumMin,
}

impl ThresholdField {
    /// Display name for this field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TempMax => "Max Temperature (°C)",
            Self::TempMin => "Min Temperature (°C)",
            Self::HumMax => "Max Humidity (%)",
            Self::HumMin => "Min Humidity (%)",
        }
    }

    /// Cycle to the next field.
    pub fn next(&self) -> Self {
        match self {
            Self::TempMax => Self::TempMin,
            Self::TempMin => Self::HumMax,
            Self::HumMax => Self::HumMin,
            Self::HumMin => Self::TempMax,
        }
    }
}

/// Active text-input overlay, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// No overlay; keys act on the session.
    #[default]
    None,
    /// Editing the port identifier.
    Port,
    /// Editing one threshold bound at a time.
    Thresholds,
}
