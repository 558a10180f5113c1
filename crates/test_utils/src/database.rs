//! Database Test Utilities
//!
//! Each [`TestDatabase`] is a private in-memory SQLite database with the
//! claims schema applied, so tests never share state.

use rust_decimal::Decimal;

use domain_claims::{BenefitRules, Claim, ClaimSubmission};
use infra_db::{
    create_pool, ensure_schema, ClaimsRepository, DatabaseConfig, DatabaseError, DatabasePool,
};

/// An isolated claims database for one test
#[derive(Debug, Clone)]
pub struct TestDatabase {
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Opens a fresh in-memory database and creates the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or the schema fails
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = create_pool(DatabaseConfig::in_memory()).await?;
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Repository over this database
    pub fn repository(&self) -> ClaimsRepository {
        ClaimsRepository::new(self.pool.clone())
    }

    /// Stores an already adjudicated claim as procedure history
    ///
    /// The claim is adjudicated for an active member with no prior history,
    /// so its status is decided by the benefit limit alone.
    pub async fn seed_claim(&self, submission: ClaimSubmission) -> Result<Claim, DatabaseError> {
        let adjudication =
            BenefitRules::default().adjudicate(submission.claim_amount(), true, None);
        let claim = Claim::new(submission, adjudication);
        self.repository().create(&claim).await?;
        Ok(claim)
    }

    /// Number of stored claims
    pub async fn claim_count(&self) -> Result<i64, DatabaseError> {
        self.repository().count().await
    }

    /// Makes every later claim insert fail while reads keep working
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger cannot be created
    pub async fn reject_inserts(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TRIGGER reject_claim_inserts BEFORE INSERT ON claims
            BEGIN
                SELECT RAISE(ABORT, 'claims storage is read-only');
            END
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;
        Ok(())
    }

    /// Stored average for a procedure
    pub async fn procedure_average(
        &self,
        procedure_code: &str,
    ) -> Result<Option<Decimal>, DatabaseError> {
        self.repository()
            .average_amount_for_procedure(procedure_code)
            .await
    }
}
