//! Healthcheck table operations.

use super::{Database, now_ms};
use crate::types::{HealthCheck, HealthStatus};
use anyhow::{Result, anyhow};
use rusqlite::params;
use uuid::Uuid;

impl Database {
    /// Insert a healthcheck row and return it as stored.
    pub fn insert_healthcheck(&self) -> Result<HealthCheck> {
        let id = Uuid::new_v4();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO healthchecks (id, status, created_at) VALUES (?1, ?2, ?3)",
                params![id.to_string(), HealthStatus::Ok.as_str(), now_ms()],
            )?;

            // Read the row back so the caller sees exactly what was stored.
            let (id_raw, status_raw, created_at) = conn.query_row(
                "SELECT id, status, created_at FROM healthchecks WHERE id = ?1",
                params![id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )?;

            let status = HealthStatus::from_str(&status_raw)
                .ok_or_else(|| anyhow!("unknown healthcheck status '{status_raw}'"))?;

            Ok(HealthCheck {
                id: Uuid::parse_str(&id_raw)?,
                status,
                created_at,
            })
        })
    }
}
