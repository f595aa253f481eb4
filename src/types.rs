//! Domain models for the skeleton service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status recorded by a healthcheck. Only `ok` exists: a check that cannot
/// reach the database never produces a row at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Ok => "ok",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(HealthStatus::Ok),
            _ => None,
        }
    }
}

/// A recorded healthcheck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub id: Uuid,
    pub status: HealthStatus,
    pub created_at: i64,
}
