//! Repositories.
//!
//! Repositories are the only layer that talks to storage. Services depend
//! on the trait, not on the SQLite implementation, so a concrete service
//! can swap the backend without touching its use cases.

use crate::db::Database;
use crate::types::HealthCheck;
use anyhow::Result;
use async_trait::async_trait;

/// Storage seam for healthchecks.
#[async_trait]
pub trait HealthCheckRepository: Send + Sync {
    /// Record a healthcheck and return it as stored.
    async fn create(&self) -> Result<HealthCheck>;
}

/// Healthcheck repository backed by the SQLite database.
pub struct SqliteHealthCheckRepository {
    db: Database,
}

impl SqliteHealthCheckRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthCheckRepository for SqliteHealthCheckRepository {
    async fn create(&self) -> Result<HealthCheck> {
        self.db.insert_healthcheck()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthStatus;

    #[tokio::test]
    async fn test_create_records_ok_status() {
        let repo = SqliteHealthCheckRepository::new(Database::open_in_memory().unwrap());
        let check = repo.create().await.unwrap();
        assert_eq!(check.status, HealthStatus::Ok);
    }
}
