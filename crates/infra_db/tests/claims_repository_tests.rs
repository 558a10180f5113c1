//! Repository tests against an in-memory SQLite database

use rust_decimal_macros::dec;

use core_kernel::{ClaimId, HealthCheckable, PortError};
use domain_claims::{BenefitRules, Claim, ClaimStatus, ClaimStore, ClaimSubmission};
use infra_db::{create_pool, ensure_schema, ClaimsRepository, DatabaseConfig, DatabaseError};

async fn repository() -> ClaimsRepository {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool");
    ensure_schema(&pool).await.expect("schema");
    ClaimsRepository::new(pool)
}

fn claim(procedure_code: &str, amount: rust_decimal::Decimal) -> Claim {
    let submission = ClaimSubmission::new("M123", "PR1", "D10", procedure_code, amount).unwrap();
    let adjudication = BenefitRules::default().adjudicate(amount, true, None);
    Claim::new(submission, adjudication)
}

mod schema_tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let repo = repository().await;
        ensure_schema(repo.pool()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_status_check_constraint() {
        let repo = repository().await;
        let result = sqlx::query(
            "INSERT INTO claims VALUES ('x', 'M', 'P', 'D', 'C', '1', 'Pending', NULL, '2024-01-01T00:00:00Z')",
        )
        .execute(repo.pool())
        .await;

        let err = DatabaseError::classify(result.unwrap_err());
        assert!(err.is_constraint_violation());
    }
}

mod insert_and_lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_find() {
        let repo = repository().await;
        let stored = claim("P001", dec!(5000.50));

        repo.create(&stored).await.unwrap();
        let found = repo.find_by_id(stored.claim_id()).await.unwrap().unwrap();

        assert_eq!(found.claim_id(), stored.claim_id());
        assert_eq!(found.status(), ClaimStatus::Approved);
        assert_eq!(found.claim_amount(), dec!(5000.50));
        assert_eq!(found.member_id(), "M123");
        assert_eq!(found.diagnosis_code(), "D10");
        assert_eq!(found.reason(), None);
    }

    #[tokio::test]
    async fn test_reason_is_persisted() {
        let repo = repository().await;
        let submission = ClaimSubmission::new("M999", "PR1", "D10", "P001", dec!(10)).unwrap();
        let adjudication = BenefitRules::default().adjudicate(dec!(10), false, None);
        let rejected = Claim::new(submission, adjudication);

        repo.create(&rejected).await.unwrap();
        let found = repo.get_by_id(rejected.claim_id()).await.unwrap();

        assert_eq!(found.status(), ClaimStatus::Rejected);
        assert_eq!(found.reason(), Some("member inactive"));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = repository().await;
        assert!(repo.find_by_id(ClaimId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repository().await;
        let err = repo.get_by_id(ClaimId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected_and_not_written() {
        let repo = repository().await;
        let stored = claim("P001", dec!(100));

        repo.create(&stored).await.unwrap();
        let err = repo.create(&stored).await.unwrap_err();

        assert!(matches!(err, DatabaseError::DuplicateEntry(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let repo = repository().await;
        let stored = claim("P001", dec!(100));
        repo.create(&stored).await.unwrap();

        let first = repo.get_by_id(stored.claim_id()).await.unwrap();
        let second = repo.get_by_id(stored.claim_id()).await.unwrap();

        assert_eq!(first, second);
    }
}

mod average_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_history_is_none() {
        let repo = repository().await;
        assert_eq!(repo.average_amount_for_procedure("P001").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_average_over_procedure_only() {
        let repo = repository().await;
        repo.create(&claim("P001", dec!(1000))).await.unwrap();
        repo.create(&claim("P001", dec!(3000))).await.unwrap();
        repo.create(&claim("P002", dec!(90000))).await.unwrap();

        let average = repo.average_amount_for_procedure("P001").await.unwrap();
        assert_eq!(average, Some(dec!(2000)));
    }

    #[tokio::test]
    async fn test_average_keeps_cents_exact() {
        let repo = repository().await;
        repo.create(&claim("P001", dec!(4838.15))).await.unwrap();
        repo.create(&claim("P001", dec!(3539.95))).await.unwrap();

        let average = repo.average_amount_for_procedure("P001").await.unwrap();
        assert_eq!(average, Some(dec!(4189.05)));
    }

    #[tokio::test]
    async fn test_average_of_three_cent_amounts() {
        let repo = repository().await;
        repo.create(&claim("P004", dec!(2189.93))).await.unwrap();
        repo.create(&claim("P004", dec!(2931.50))).await.unwrap();
        repo.create(&claim("P004", dec!(7353.11))).await.unwrap();

        let average = repo.average_amount_for_procedure("P004").await.unwrap();
        assert_eq!(average, Some(dec!(4158.18)));
    }
}

mod port_tests {
    use super::*;

    #[tokio::test]
    async fn test_store_port_round_trip() {
        let repo = repository().await;
        let store: &dyn ClaimStore = &repo;
        let stored = claim("P009", dec!(42));

        store.insert(&stored).await.unwrap();

        let found = store.find_by_id(stored.claim_id()).await.unwrap();
        assert_eq!(found.map(|c| c.claim_id()), Some(stored.claim_id()));
    }

    #[tokio::test]
    async fn test_store_port_duplicate_is_conflict() {
        let repo = repository().await;
        let store: &dyn ClaimStore = &repo;
        let stored = claim("P009", dec!(42));

        store.insert(&stored).await.unwrap();
        let err = store.insert(&stored).await.unwrap_err();

        assert!(matches!(err, PortError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_health_check_reports_healthy() {
        let repo = repository().await;
        assert!(repo.health_check().await.is_healthy());
    }

    #[tokio::test]
    async fn test_health_check_after_close_is_unhealthy() {
        let repo = repository().await;
        repo.pool().close().await;
        assert!(!repo.health_check().await.is_healthy());
    }
}
