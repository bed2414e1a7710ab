//! # Adapter: logging adapter
//!
//! The application speaks the [`Logger`] trait. A third-party library only
//! offers `record(severity, message)`. [`LoggerAdapter`] bridges the two so
//! the service never knows which library is underneath.

use thiserror::Error;
use tracing::{error, info, warn};

const SHORT_DATA_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Data cannot be empty")]
    EmptyData,
}

// =============================================================================
// Adaptee
// =============================================================================

/// The incompatible interface offered by the third-party library.
#[cfg_attr(test, mockall::automock)]
pub trait ThirdPartyLogger {
    fn record(&self, severity: &str, message: &str);
}

/// `[3rdPartyLogger - WARNING]: message`
pub fn format_record(severity: &str, message: &str) -> String {
    format!("[3rdPartyLogger - {}]: {message}", severity.to_uppercase())
}

#[derive(Debug, Default)]
pub struct VendorLogger;

impl ThirdPartyLogger for VendorLogger {
    fn record(&self, severity: &str, message: &str) {
        let line = format_record(severity, message);
        match severity {
            "error" => error!("{line}"),
            "warning" => warn!("{line}"),
            _ => info!("{line}"),
        }
    }
}

// =============================================================================
// Target and adapter
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait Logger {
    fn log_info(&self, message: &str);
    fn log_warning(&self, message: &str);
    fn log_error(&self, message: &str);
}

pub struct LoggerAdapter<T: ThirdPartyLogger> {
    adaptee: T,
}

impl<T: ThirdPartyLogger> LoggerAdapter<T> {
    pub fn new(adaptee: T) -> Self {
        Self { adaptee }
    }
}

impl<T: ThirdPartyLogger> Logger for LoggerAdapter<T> {
    fn log_info(&self, message: &str) {
        self.adaptee.record("info", message);
    }

    fn log_warning(&self, message: &str) {
        self.adaptee.record("warning", message);
    }

    fn log_error(&self, message: &str) {
        self.adaptee.record("error", message);
    }
}

// =============================================================================
// Client
// =============================================================================

pub struct ApplicationService<L: Logger> {
    logger: L,
}

impl<L: Logger> ApplicationService<L> {
    pub fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Empty data fails; data under five characters succeeds with a warning.
    pub fn perform_operation(&self, data: &str) -> Result<(), OperationError> {
        self.logger
            .log_info(&format!("Starting operation with data: {data}"));

        if data.is_empty() {
            let err = OperationError::EmptyData;
            self.logger.log_error(&format!("Operation failed: {err}"));
            return Err(err);
        }
        if data.chars().count() < SHORT_DATA_CHARS {
            self.logger
                .log_warning(&format!("Data '{data}' is quite short."));
        }

        self.logger.log_info("Operation completed successfully.");
        Ok(())
    }
}
