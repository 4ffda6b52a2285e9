use super::RadarError;
use crate::config::RadarConfig;
use crate::report::models::FleetReport;
use log::{debug, info, warn};

/// Posts fleet reports to CoinATMRadar. One attempt per call, no retries.
#[derive(Clone)]
pub struct RadarClient {
    http_client: reqwest::Client,
    config: RadarConfig,
}

impl RadarClient {
    #[must_use]
    pub fn new(config: RadarConfig) -> Self {
        RadarClient {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    pub fn operator_id(&self) -> &str {
        &self.config.operator_id
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    pub async fn submit(&self, report: &FleetReport) -> Result<(), RadarError> {
        debug!(
            "Sending report with {} machines to {}",
            report.machines.len(),
            self.config.url
        );

        let mut response = self
            .http_client
            .post(&self.config.url)
            .json(report)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("CoinATMRadar rejected report with status {}", status);
            return Err(RadarError::Status(status));
        }

        let limit = self.config.max_content_length;
        if let Some(length) = response.content_length() {
            if length > limit as u64 {
                return Err(RadarError::ResponseTooLarge { limit });
            }
        }
        let mut received = 0;
        while let Some(chunk) = response.chunk().await? {
            received += chunk.len();
            if received > limit {
                return Err(RadarError::ResponseTooLarge { limit });
            }
        }

        info!(
            "Reported {} machines to CoinATMRadar",
            report.machines.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::serve;
    use axum::body::StreamBody;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn empty_report() -> FleetReport {
        FleetReport {
            operator_id: "op-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2022, 5, 1, 12, 0, 0).unwrap(),
            machines: Vec::new(),
        }
    }

    fn client_for(addr: std::net::SocketAddr) -> RadarClient {
        RadarClient::new(RadarConfig::new("op-1", &format!("http://{}/api", addr)))
    }

    #[tokio::test]
    async fn posts_report_as_json() {
        let seen: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/api",
            post(move |Json(payload): Json<serde_json::Value>| {
                let recorder = recorder.clone();
                async move {
                    *recorder.lock().await = Some(payload);
                    "ok"
                }
            }),
        );
        let client = client_for(serve(app).await);

        client.submit(&empty_report()).await.unwrap();

        let payload = seen.lock().await.take().unwrap();
        assert_eq!(payload["operatorId"], "op-1");
        assert_eq!(payload["timestamp"], "2022-05-01T12:00:00.000Z");
        assert_eq!(payload["machines"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let app = Router::new().route(
            "/api",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let client = client_for(serve(app).await);

        let err = client.submit(&empty_report()).await.unwrap_err();
        assert!(matches!(
            err,
            RadarError::Status(StatusCode::SERVICE_UNAVAILABLE)
        ));
    }

    #[tokio::test]
    async fn oversized_response_is_a_failure() {
        let app = Router::new().route("/api", post(|| async { "x".repeat(5000) }));
        let client = client_for(serve(app).await);

        let err = client.submit(&empty_report()).await.unwrap_err();
        assert!(matches!(err, RadarError::ResponseTooLarge { limit: 2000 }));
    }

    #[tokio::test]
    async fn oversized_chunked_response_is_a_failure() {
        let app = Router::new().route(
            "/api",
            post(|| async {
                let chunks = (0..3).map(|_| Ok::<_, std::io::Error>(vec![b'x'; 1024]));
                StreamBody::new(futures::stream::iter(chunks))
            }),
        );
        let client = client_for(serve(app).await);

        let err = client.submit(&empty_report()).await.unwrap_err();
        assert!(matches!(err, RadarError::ResponseTooLarge { limit: 2000 }));
    }

    #[tokio::test]
    async fn small_chunked_response_is_accepted() {
        let app = Router::new().route(
            "/api",
            post(|| async {
                let chunks = (0..2).map(|_| Ok::<_, std::io::Error>(vec![b'x'; 512]));
                StreamBody::new(futures::stream::iter(chunks))
            }),
        );
        let client = client_for(serve(app).await);

        client.submit(&empty_report()).await.unwrap();
    }

    #[tokio::test]
    async fn response_at_the_limit_is_accepted() {
        let app = Router::new().route("/api", post(|| async { "x".repeat(2000) }));
        let client = client_for(serve(app).await);

        client.submit(&empty_report()).await.unwrap();
    }

    #[tokio::test]
    async fn unresponsive_endpoint_times_out() {
        let app = Router::new().route(
            "/api",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let addr = serve(app).await;
        let mut config = RadarConfig::new("op-1", &format!("http://{}/api", addr));
        config.timeout = Duration::from_millis(200);
        let client = RadarClient::new(config);

        let started = std::time::Instant::now();
        let err = client.submit(&empty_report()).await.unwrap_err();
        assert!(matches!(err, RadarError::Timeout));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).submit(&empty_report()).await.unwrap_err();
        assert!(matches!(err, RadarError::Http(_)));
    }
}
