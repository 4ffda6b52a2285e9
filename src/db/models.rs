use chrono::prelude::*;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Device {
    pub device_id: String,
    pub last_online: DateTime<Utc>,
    /// True when the machine checked in within the staleness threshold.
    pub stale: bool,
}
