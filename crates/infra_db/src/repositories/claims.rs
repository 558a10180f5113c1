//! Claims repository implementation
//!
//! This module provides database access for stored claims: the single-row
//! insert done at intake, point lookups by id, and the per-procedure average
//! used by the fraud rule.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Instant;
use tracing::debug;

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_claims::{Claim, ClaimStatus, ClaimStore};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

/// Repository for managing claims data
///
/// Every call checks a connection out of the pool for the duration of the
/// call only. The connection goes back to the pool when it is dropped, on
/// success and on every error path alike.
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: DatabasePool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Inserts a new claim row
    ///
    /// The insert is a single statement, so it is atomic: either the whole
    /// row is written or nothing is.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the claim id already exists
    pub async fn create(&self, claim: &Claim) -> Result<(), DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::classify)?;

        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, member_id, provider_id, diagnosis_code,
                procedure_code, claim_amount, status, reason, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(claim.claim_id().to_string())
        .bind(claim.member_id())
        .bind(claim.provider_id())
        .bind(claim.diagnosis_code())
        .bind(claim.procedure_code())
        .bind(claim.claim_amount().to_string())
        .bind(claim.status().as_str())
        .bind(claim.reason())
        .bind(claim.created_at())
        .execute(&mut *conn)
        .await
        .map_err(DatabaseError::classify)?;

        debug!(claim_id = %claim.claim_id(), "Claim row inserted");
        Ok(())
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Returns
    ///
    /// The claim, or `None` if no row has this id
    pub async fn find_by_id(&self, claim_id: ClaimId) -> Result<Option<Claim>, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::classify)?;

        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT
                claim_id,
                member_id,
                provider_id,
                diagnosis_code,
                procedure_code,
                claim_amount,
                status,
                reason,
                created_at
            FROM claims
            WHERE claim_id = ?
            "#,
        )
        .bind(claim_id.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(DatabaseError::classify)?;

        row.map(ClaimRow::into_claim).transpose()
    }

    /// Retrieves a claim by its identifier, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this id
    pub async fn get_by_id(&self, claim_id: ClaimId) -> Result<Claim, DatabaseError> {
        self.find_by_id(claim_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Average claimed amount over all stored claims for a procedure
    ///
    /// Amounts are summed as exact decimals, not SQLite reals. Returns `None`
    /// when the procedure has no claims yet.
    pub async fn average_amount_for_procedure(
        &self,
        procedure_code: &str,
    ) -> Result<Option<Decimal>, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::classify)?;

        let amounts: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT claim_amount
            FROM claims
            WHERE procedure_code = ?
            "#,
        )
        .bind(procedure_code)
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::classify)?;

        if amounts.is_empty() {
            return Ok(None);
        }

        let mut total = Decimal::ZERO;
        for raw in &amounts {
            let amount: Decimal = raw.parse().map_err(|e| {
                DatabaseError::SerializationError(format!("claim_amount {}: {}", raw, e))
            })?;
            total = total.checked_add(amount).ok_or_else(|| {
                DatabaseError::SerializationError(format!(
                    "total for procedure {} overflows",
                    procedure_code
                ))
            })?;
        }

        Ok(Some(total / Decimal::from(amounts.len())))
    }

    /// Counts stored claims
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::classify)?;

        sqlx::query_scalar("SELECT COUNT(*) FROM claims")
            .fetch_one(&mut *conn)
            .await
            .map_err(DatabaseError::classify)
    }
}

impl DomainPort for ClaimsRepository {}

#[async_trait]
impl ClaimStore for ClaimsRepository {
    async fn insert(&self, claim: &Claim) -> Result<(), PortError> {
        Ok(self.create(claim).await?)
    }

    async fn find_by_id(&self, claim_id: ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(ClaimsRepository::find_by_id(self, claim_id).await?)
    }

    async fn average_amount_for_procedure(
        &self,
        procedure_code: &str,
    ) -> Result<Option<Decimal>, PortError> {
        Ok(ClaimsRepository::average_amount_for_procedure(self, procedure_code).await?)
    }
}

#[async_trait]
impl HealthCheckable for ClaimsRepository {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = sqlx::query("SELECT 1").execute(&self.pool).await;

        let (status, message) = match outcome {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(e.to_string())),
        };

        HealthCheckResult {
            adapter_id: "sqlite-claims".to_string(),
            status,
            latency_ms: started.elapsed().as_millis() as u64,
            message,
            checked_at: Utc::now(),
        }
    }
}

/// Database row for claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: String,
    pub member_id: String,
    pub provider_id: String,
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub claim_amount: String,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClaimRow {
    /// Maps the stored text columns back onto the domain type
    fn into_claim(self) -> Result<Claim, DatabaseError> {
        let claim_id: ClaimId = self.claim_id.parse().map_err(|e| {
            DatabaseError::SerializationError(format!("claim_id {}: {}", self.claim_id, e))
        })?;
        let claim_amount: Decimal = self.claim_amount.parse().map_err(|e| {
            DatabaseError::SerializationError(format!("claim_amount {}: {}", self.claim_amount, e))
        })?;
        let status: ClaimStatus = self
            .status
            .parse()
            .map_err(|e: domain_claims::ClaimError| DatabaseError::SerializationError(e.to_string()))?;

        Ok(Claim::rehydrate(
            claim_id,
            self.member_id,
            self.provider_id,
            self.diagnosis_code,
            self.procedure_code,
            claim_amount,
            status,
            self.reason,
            self.created_at,
        ))
    }
}
