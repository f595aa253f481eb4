//! Application services.
//!
//! Services satisfy use cases and are the only objects exposed to external
//! adapters such as the HTTP layer. This one is the template example:
//! delete or copy it when building a concrete service.

use crate::repository::HealthCheckRepository;
use crate::types::HealthCheck;
use anyhow::Result;
use std::sync::Arc;

/// Handles the healthcheck use case.
pub struct HealthService {
    repo: Arc<dyn HealthCheckRepository>,
}

impl HealthService {
    pub fn new(repo: Arc<dyn HealthCheckRepository>) -> Self {
        Self { repo }
    }

    /// Perform a healthcheck.
    ///
    /// Success proves the service can execute a round trip through its
    /// storage layer.
    pub async fn healthcheck(&self) -> Result<HealthCheck> {
        self.repo.create().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::repository::SqliteHealthCheckRepository;
    use crate::types::HealthStatus;

    #[tokio::test]
    async fn test_healthcheck_delegates_to_repository() {
        let repo = SqliteHealthCheckRepository::new(Database::open_in_memory().unwrap());
        let service = HealthService::new(Arc::new(repo));

        let check = service.healthcheck().await.unwrap();
        assert_eq!(check.status, HealthStatus::Ok);
    }
}
