use crate::rates::RateTable;
use crate::report::ReportInput;
use crate::settings::ScopedConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not parse snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Operator configuration and current rates, as written by the pricing side.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub config: ScopedConfig,
    #[serde(default)]
    pub rates: RateTable,
}

impl Snapshot {
    pub async fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<Snapshot> for ReportInput<ScopedConfig> {
    fn from(snapshot: Snapshot) -> Self {
        ReportInput {
            config: snapshot.config,
            rates: snapshot.rates,
        }
    }
}
