//! HTTP API Layer
//!
//! This crate provides the REST API of the claims intake service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Claim submission, claim lookup and health checks
//! - **Middleware**: Request ids and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use core_kernel::HealthCheckable;
use domain_claims::ClaimService;
use infra_db::{ClaimsRepository, DatabasePool, StaticMemberDirectory};

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimService,
    pub storage_health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the claim service to the SQLite store and the configured
    /// member directory
    pub fn new(pool: DatabasePool, config: ApiConfig) -> Self {
        let repository = Arc::new(ClaimsRepository::new(pool));
        let members = StaticMemberDirectory::new(&config.active_members);
        if members.is_empty() {
            warn!("No active members configured, every claim will be rejected");
        } else {
            info!(active_members = members.len(), "Member directory loaded");
        }
        let members = Arc::new(members);
        let claims = ClaimService::new(members, repository.clone(), config.benefit_rules());

        Self {
            claims,
            storage_health: repository,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared handler state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/claims", post(claims::submit_claim))
        .route("/claims/:claim_id", get(claims::get_claim))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging_middleware)),
        )
        .with_state(state)
}
