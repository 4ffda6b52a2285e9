use reqwest::StatusCode;
use thiserror::Error;

pub mod client;

pub use client::RadarClient;

#[derive(Debug, Error)]
pub enum RadarError {
    #[error("CoinATMRadar request timed out")]
    Timeout,
    #[error("CoinATMRadar response exceeded {limit} bytes")]
    ResponseTooLarge { limit: usize },
    #[error("CoinATMRadar returned {0}")]
    Status(StatusCode),
    #[error("Reqwest Error: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for RadarError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RadarError::Timeout
        } else {
            RadarError::Http(e)
        }
    }
}
