use async_trait::async_trait;
use sqlx::{Pool, Postgres};

pub mod devices;
pub mod models;

pub use devices::get_reportable_devices;

/// Anything that can list the machines eligible for reporting.
#[async_trait]
pub trait DeviceSource {
    async fn reportable_devices(&self) -> Result<Vec<models::Device>, sqlx::Error>;
}

#[async_trait]
impl DeviceSource for Pool<Postgres> {
    async fn reportable_devices(&self) -> Result<Vec<models::Device>, sqlx::Error> {
        get_reportable_devices(self).await
    }
}
