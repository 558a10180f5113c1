//! HTTP API tests
//!
//! Every test runs the full router against its own in-memory database.

use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_claims::ClaimStatus;
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{
    assert_claim_id, assert_claim_outcome, assert_claim_status, assert_detail_mentions,
    assert_error_kind, ClaimSubmissionBuilder, CodeFixtures, MemberFixtures, TestDatabase,
};

async fn server_with(config: ApiConfig) -> (TestServer, TestDatabase) {
    let db = TestDatabase::new().await.expect("test database");
    let app = create_router(AppState::new(db.pool.clone(), config));
    let server = TestServer::new(app).expect("test server");
    (server, db)
}

async fn server() -> (TestServer, TestDatabase) {
    server_with(ApiConfig::default()).await
}

async fn submit(server: &TestServer, body: &Value) -> Value {
    let response = server.post("/claims").json(body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_active_member_without_history_is_approved() {
        let (server, db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_amount(dec!(5000)).to_json();

        let created = submit(&server, &body).await;

        assert_claim_id(&created);
        assert_claim_outcome(&created, ClaimStatus::Approved, None);
        assert_eq!(db.claim_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_inactive_member_is_rejected() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new()
            .with_member_id(MemberFixtures::inactive())
            .with_amount(dec!(1000))
            .to_json();

        let created = submit(&server, &body).await;

        assert_claim_outcome(&created, ClaimStatus::Rejected, Some("member inactive"));
    }

    #[tokio::test]
    async fn test_amount_over_benefit_limit_is_partial() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_amount(dec!(45000)).to_json();

        let created = submit(&server, &body).await;

        assert_claim_outcome(&created, ClaimStatus::Partial, Some("exceeds benefit limit"));
    }

    #[tokio::test]
    async fn test_amount_at_benefit_limit_is_approved() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_amount(dec!(40000)).to_json();

        let created = submit(&server, &body).await;

        assert_claim_status(&created, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_amount_above_twice_average_is_flagged() {
        let (server, db) = server().await;
        for amount in [dec!(1000), dec!(3000)] {
            db.seed_claim(
                ClaimSubmissionBuilder::new()
                    .with_procedure_code(CodeFixtures::procedure())
                    .with_amount(amount)
                    .build()
                    .unwrap(),
            )
            .await
            .unwrap();
        }
        assert_eq!(
            db.procedure_average(CodeFixtures::procedure()).await.unwrap(),
            Some(dec!(2000))
        );

        let body = ClaimSubmissionBuilder::new()
            .with_procedure_code(CodeFixtures::procedure())
            .with_amount(dec!(5000))
            .to_json();
        let created = submit(&server, &body).await;

        assert_claim_outcome(
            &created,
            ClaimStatus::Flagged,
            Some("amount exceeds 2x historical average - possible fraud"),
        );
    }

    #[tokio::test]
    async fn test_amount_exactly_twice_average_is_not_flagged() {
        let (server, db) = server().await;
        db.seed_claim(ClaimSubmissionBuilder::new().with_amount(dec!(2000)).build().unwrap())
            .await
            .unwrap();

        let body = ClaimSubmissionBuilder::new().with_amount(dec!(4000)).to_json();
        let created = submit(&server, &body).await;

        assert_claim_status(&created, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_cent_average_doubled_exactly_is_not_flagged() {
        let (server, db) = server().await;
        for amount in [dec!(4838.15), dec!(3539.95)] {
            db.seed_claim(ClaimSubmissionBuilder::new().with_amount(amount).build().unwrap())
                .await
                .unwrap();
        }
        assert_eq!(
            db.procedure_average(CodeFixtures::procedure()).await.unwrap(),
            Some(dec!(4189.05))
        );

        let body = ClaimSubmissionBuilder::new().with_amount(dec!(8378.10)).to_json();
        let created = submit(&server, &body).await;

        assert_claim_outcome(&created, ClaimStatus::Approved, None);
    }

    #[tokio::test]
    async fn test_history_of_other_procedures_is_ignored() {
        let (server, db) = server().await;
        db.seed_claim(
            ClaimSubmissionBuilder::new()
                .with_procedure_code(CodeFixtures::other_procedure())
                .with_amount(dec!(10))
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let body = ClaimSubmissionBuilder::new().with_amount(dec!(5000)).to_json();
        let created = submit(&server, &body).await;

        assert_claim_status(&created, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_codes_are_normalized_before_lookup() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new()
            .with_member_id("  m123 ")
            .with_procedure_code("p001")
            .to_json();

        let created = submit(&server, &body).await;
        assert_claim_status(&created, ClaimStatus::Approved);

        let claim_id = assert_claim_id(&created);
        let fetched = server.get(&format!("/claims/{}", claim_id)).await.json::<Value>();
        assert_eq!(fetched["member_id"], "M123");
        assert_eq!(fetched["procedure_code"], "P001");
    }

    #[tokio::test]
    async fn test_configured_rules_apply() {
        let config = ApiConfig {
            benefit_limit: dec!(1000),
            active_members: vec!["A1".to_string()],
            ..ApiConfig::default()
        };
        let (server, _db) = server_with(config).await;

        let body = ClaimSubmissionBuilder::new()
            .with_member_id("A1")
            .with_amount(dec!(1500))
            .to_json();
        let created = submit(&server, &body).await;
        assert_claim_status(&created, ClaimStatus::Partial);

        let body = ClaimSubmissionBuilder::new().to_json();
        let created = submit(&server, &body).await;
        assert_claim_status(&created, ClaimStatus::Rejected);
    }
}

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_field_is_unprocessable() {
        let (server, db) = server().await;
        let mut body = ClaimSubmissionBuilder::new().to_json();
        body.as_object_mut().unwrap().remove("procedure_code");

        let response = server.post("/claims").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error = response.json::<Value>();
        assert_error_kind(&error, "validation_error");
        assert_detail_mentions(&error, "procedure_code");
        assert_eq!(db.claim_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_wrong_type_is_unprocessable() {
        let (server, _db) = server().await;
        let mut body = ClaimSubmissionBuilder::new().to_json();
        body["claim_amount"] = json!(["5000"]);

        let response = server.post("/claims").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_error_kind(&response.json::<Value>(), "validation_error");
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_unprocessable() {
        let (server, db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_amount(dec!(-5)).to_json();

        let response = server.post("/claims").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error = response.json::<Value>();
        assert_error_kind(&error, "validation_error");
        assert_detail_mentions(&error, "claim_amount");
        assert_eq!(db.claim_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_identifier_is_unprocessable() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_provider_id("   ").to_json();

        let response = server.post("/claims").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_detail_mentions(&response.json::<Value>(), "provider_id");
    }

    #[tokio::test]
    async fn test_overlong_code_is_unprocessable() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new()
            .with_diagnosis_code("D".repeat(33))
            .to_json();

        let response = server.post("/claims").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_detail_mentions(&response.json::<Value>(), "diagnosis_code");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _db) = server().await;

        let response = server
            .post("/claims")
            .text("{\"member_id\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_kind(&response.json::<Value>(), "bad_request");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let (server, _db) = server().await;

        let response = server.post("/claims").text("member_id=M123").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_kind(&response.json::<Value>(), "bad_request");
    }
}

mod storage_failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_closed_database_is_server_error() {
        let (server, db) = server().await;
        db.pool.close().await;

        let response = server
            .post("/claims")
            .json(&ClaimSubmissionBuilder::new().to_json())
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let error = response.json::<Value>();
        assert_error_kind(&error, "database_error");
        assert_eq!(error["message"], "Could not process claim");
        assert!(error.get("claim_id").is_none());
    }

    #[tokio::test]
    async fn test_failed_insert_writes_nothing() {
        let (server, db) = server().await;
        db.seed_claim(ClaimSubmissionBuilder::new().build().unwrap())
            .await
            .unwrap();
        db.reject_inserts().await.unwrap();

        let response = server
            .post("/claims")
            .json(&ClaimSubmissionBuilder::new().to_json())
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_kind(&response.json::<Value>(), "database_error");
        assert_eq!(db.claim_count().await.unwrap(), 1);
    }
}

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_matches_submission() {
        let (server, _db) = server().await;
        let body = ClaimSubmissionBuilder::new().with_amount(dec!(45000)).to_json();
        let created = submit(&server, &body).await;
        let claim_id = assert_claim_id(&created);

        let response = server.get(&format!("/claims/{}", claim_id)).await;

        response.assert_status_ok();
        let fetched = response.json::<Value>();
        assert_eq!(fetched["claim_id"], created["claim_id"]);
        assert_eq!(fetched["status"], created["status"]);
        assert_eq!(fetched["reason"], created["reason"]);
        assert_eq!(fetched["claim_amount"], json!(45000.0));
        assert!(fetched["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_identical() {
        let (server, _db) = server().await;
        let created = submit(&server, &ClaimSubmissionBuilder::new().to_json()).await;
        let path = format!("/claims/{}", assert_claim_id(&created));

        let first = server.get(&path).await.json::<Value>();
        let second = server.get(&path).await.json::<Value>();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_bare_uuid_is_accepted() {
        let (server, _db) = server().await;
        let created = submit(&server, &ClaimSubmissionBuilder::new().to_json()).await;
        let claim_id = assert_claim_id(&created);

        let response = server.get(&format!("/claims/{}", claim_id.as_uuid())).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["claim_id"], created["claim_id"]);
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        let (server, _db) = server().await;

        let response = server.get("/claims/UNKNOWN").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let error = response.json::<Value>();
        assert_error_kind(&error, "not_found");
        assert_eq!(error["message"], "Claim UNKNOWN not found");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (server, _db) = server().await;
        let claim_id = core_kernel::ClaimId::new();

        let response = server.get(&format!("/claims/{}", claim_id)).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>()["message"],
            format!("Claim {} not found", claim_id)
        );
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (server, _db) = server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_with_open_database() {
        let (server, _db) = server().await;

        let response = server.get("/health/ready").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ready");
    }

    #[tokio::test]
    async fn test_readiness_with_closed_database() {
        let (server, db) = server().await;
        db.pool.close().await;

        let response = server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["status"], "unavailable");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (server, _db) = server().await;

        let response = server.get("/health").await;

        assert!(response.headers().contains_key("x-request-id"));
    }
}
