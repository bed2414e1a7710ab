//! # Template Method: data export
//!
//! [`DataExporter::export_data`] fixes the order of the steps:
//! fetch, format, pre-save hook, save, post-save hook. Exporters only fill in
//! the formatting and saving, and may override the hooks.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRow {
    pub id: u32,
    pub name: String,
    pub email: String,
}

pub fn sample_rows() -> Vec<CustomerRow> {
    vec![
        CustomerRow {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        CustomerRow {
            id: 2,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    ]
}

pub trait DataExporter {
    fn name(&self) -> &'static str;

    /// Shared step. Real exporters would query a database here.
    fn fetch_data(&self) -> Vec<CustomerRow> {
        debug!(exporter = self.name(), "fetching data");
        sample_rows()
    }

    fn format_data(&self, data: &[CustomerRow]) -> Result<String, ExportError>;

    fn pre_save_hook(&self, _formatted: &str) -> Result<(), ExportError> {
        Ok(())
    }

    /// Returns a status message.
    fn save_data(&mut self, formatted: String) -> Result<String, ExportError>;

    fn post_save_hook(&self, _message: &str) {}

    /// The template method. Not meant to be overridden.
    fn export_data(&mut self) -> Result<String, ExportError> {
        let data = self.fetch_data();
        let formatted = self.format_data(&data)?;
        self.pre_save_hook(&formatted)?;
        let message = self.save_data(formatted)?;
        self.post_save_hook(&message);
        Ok(format!("{}: {}", self.name(), message))
    }
}

// =============================================================================
// Concrete exporters
// =============================================================================

#[derive(Debug, Default)]
pub struct CsvExporter {
    saved: Option<String>,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl DataExporter for CsvExporter {
    fn name(&self) -> &'static str {
        "CsvExporter"
    }

    fn format_data(&self, data: &[CustomerRow]) -> Result<String, ExportError> {
        debug!("formatting data into CSV");
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in data {
            writer.serialize(row)?;
        }
        let bytes = writer.into_inner().map_err(|err| err.into_error())?;
        Ok(String::from_utf8(bytes)?.trim_end().to_string())
    }

    fn save_data(&mut self, formatted: String) -> Result<String, ExportError> {
        info!(bytes = formatted.len(), "saving data as CSV");
        self.saved = Some(formatted);
        Ok("Data successfully saved to output.csv".to_string())
    }
}

#[derive(Debug, Default)]
pub struct JsonExporter {
    saved: Option<String>,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }
}

impl DataExporter for JsonExporter {
    fn name(&self) -> &'static str {
        "JsonExporter"
    }

    fn format_data(&self, data: &[CustomerRow]) -> Result<String, ExportError> {
        debug!("formatting data into JSON");
        Ok(serde_json::to_string_pretty(data)?)
    }

    fn pre_save_hook(&self, formatted: &str) -> Result<(), ExportError> {
        serde_json::from_str::<serde_json::Value>(formatted)
            .map_err(|err| ExportError::Validation(format!("invalid JSON: {err}")))?;
        debug!("JSON is valid");
        Ok(())
    }

    fn save_data(&mut self, formatted: String) -> Result<String, ExportError> {
        info!(bytes = formatted.len(), "saving data as JSON");
        self.saved = Some(formatted);
        Ok("Data successfully saved to output.json".to_string())
    }
}
