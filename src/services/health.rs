use crate::{error::ApiResult, models::HealthStatus, transport::ApiClient};

/// Backend liveness probe
#[derive(Clone)]
pub struct HealthService {
    client: ApiClient,
}

impl HealthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> ApiResult<HealthStatus> {
        let status: HealthStatus = self.client.get("/health", vec![]).await?;
        if !status.is_healthy() {
            tracing::warn!(status = %status.status, database = ?status.database, "Backend reports unhealthy");
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, MockTransport};
    use std::{sync::Arc, time::Duration};

    #[tokio::test]
    async fn test_check_reports_unhealthy_database() {
        let mut mock = MockTransport::new();
        mock.expect_execute()
            .withf(|req| req.path == "/health")
            .returning(|_| {
                Ok(HttpResponse::ok(
                    r#"{"status": "unhealthy", "database": "unhealthy", "service": "CineMood API"}"#,
                ))
            });

        let service = HealthService::new(ApiClient::new(Arc::new(mock), Duration::from_secs(30)));
        let status = service.check().await.unwrap();
        assert!(!status.is_healthy());
        assert_eq!(status.database.as_deref(), Some("unhealthy"));
    }
}
