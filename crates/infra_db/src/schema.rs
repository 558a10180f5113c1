//! Schema bootstrap
//!
//! The service owns one table. It is created on startup if missing; there is
//! no migration history to replay.

use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

const CREATE_CLAIMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS claims (
        claim_id TEXT PRIMARY KEY,
        member_id TEXT NOT NULL,
        provider_id TEXT NOT NULL,
        diagnosis_code TEXT NOT NULL,
        procedure_code TEXT NOT NULL,
        claim_amount TEXT NOT NULL,
        status TEXT NOT NULL
            CHECK (status IN ('Approved', 'Partial', 'Flagged', 'Rejected')),
        reason TEXT,
        created_at TEXT NOT NULL
    )
"#;

const CREATE_PROCEDURE_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_claims_procedure_code
        ON claims (procedure_code)
"#;

/// Creates the `claims` table and its indexes if they do not exist
///
/// # Errors
///
/// Returns a `DatabaseError` if either statement fails
pub async fn ensure_schema(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::query(CREATE_CLAIMS_TABLE)
        .execute(pool)
        .await
        .map_err(DatabaseError::classify)?;

    sqlx::query(CREATE_PROCEDURE_INDEX)
        .execute(pool)
        .await
        .map_err(DatabaseError::classify)?;

    info!("Database schema ready");
    Ok(())
}
