use thiserror::Error;

pub mod config;
pub mod db;
pub mod radar;
pub mod rates;
pub mod report;
pub mod settings;
pub mod snapshot;

#[cfg(test)]
mod test_util;

pub use report::{build_report, map_record, update, ReportInput};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No exchange rate available for {crypto_code}")]
    MissingRate { crypto_code: String },
    #[error("Settings error: {0}")]
    Settings(#[from] settings::SettingsError),
    #[error("Submission failed: {0}")]
    Submit(#[from] radar::RadarError),
}
