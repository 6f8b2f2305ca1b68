//! Logged food entry model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for caller-built [`LogEntry`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntryValidationError {
    EmptyName,
    InvalidAmount(f64),
}

impl Display for LogEntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "log entry name cannot be empty"),
            Self::InvalidAmount(value) => {
                write!(f, "log entry amount must be a positive number, got {value}")
            }
        }
    }
}

impl Error for LogEntryValidationError {}

/// One eaten item as recorded in a day log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub name: String,
    /// Quantity eaten, expressed in `unit`.
    pub amount: f64,
    pub unit: String,
    pub calories: u32,
}

impl LogEntry {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>, calories: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            calories,
        }
    }

    /// Validates entries that did not come out of the portion resolver.
    pub fn validate(&self) -> Result<(), LogEntryValidationError> {
        if self.name.trim().is_empty() {
            return Err(LogEntryValidationError::EmptyName);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LogEntryValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }
}
