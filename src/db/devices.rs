use crate::db::models;
use sqlx::{Pool, Postgres};
use std::time::Duration;

// Machines that checked in within this window are flagged `stale`, which reports them online
pub const STALE_INTERVAL: Duration = Duration::from_secs(120);

const REPORTABLE_DEVICES: &str =
    "SELECT device_id, last_online, now() - last_online < make_interval(secs => $1) AS stale
    FROM devices
    WHERE display = TRUE AND paired = TRUE
    ORDER BY created ASC";

pub async fn get_reportable_devices(
    pool: &Pool<Postgres>,
) -> Result<Vec<models::Device>, sqlx::Error> {
    sqlx::query_as::<_, models::Device>(REPORTABLE_DEVICES)
        .bind(STALE_INTERVAL.as_secs_f64())
        .fetch_all(pool)
        .await
}
