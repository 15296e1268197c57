//! HTTP API Layer
//!
//! This crate exposes the insurance quoting service over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: List, quote and buy endpoints plus health checks
//! - **Middleware**: Bearer-token authentication, audit logging
//! - **DTOs**: camelCase request/response bodies
//! - **Error Handling**: Consistent JSON error responses
//!
//! # Routes
//!
//! ```text
//! GET  /health            public liveness
//! GET  /health/ready      public readiness (queue health)
//! GET  /insurance         caller's policies
//! POST /insurance         buy a policy, empty 200 response
//! GET  /insurance/quote   ?insuranceType=House|Boat|Health
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{build_service, create_router};
//!
//! let (service, _consumer) = build_service(&config)?;
//! let app = create_router(service, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::CoreError;
use domain_insurance::{
    channel_queue, AzureQueueNotifier, InMemoryPolicyStore, InsuranceService, PolicyNotifier,
    QueueConsumer, RandomQuoteCalculator,
};

use crate::config::{ApiConfig, QueueSettings};
use crate::middleware::{audit_middleware, auth_middleware};
use crate::handlers::{health, insurance};

/// Messages the in-process queue holds before purchases wait on it
const IN_PROCESS_QUEUE_CAPACITY: usize = 256;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: InsuranceService,
    pub config: ApiConfig,
}

/// Wires the insurance service described by `config`
///
/// # Returns
///
/// The service, plus the consumer end of the queue when the in-process queue
/// is selected; the caller is responsible for draining it
///
/// # Errors
///
/// Returns a configuration error if the queue URL is unusable
pub fn build_service(config: &ApiConfig) -> Result<(InsuranceService, Option<QueueConsumer>), CoreError> {
    let store = if config.seed_demo_data {
        InMemoryPolicyStore::with_seed_data()
    } else {
        InMemoryPolicyStore::new()
    };
    let service = InsuranceService::new(Arc::new(store), Arc::new(RandomQuoteCalculator::new()));

    match config.queue_settings() {
        QueueSettings::Disabled => Ok((service, None)),
        QueueSettings::InProcess => {
            let (notifier, consumer) = channel_queue(IN_PROCESS_QUEUE_CAPACITY);
            let notifier: Arc<dyn PolicyNotifier> = Arc::new(notifier);
            Ok((service.with_notifier(notifier), Some(consumer)))
        }
        QueueSettings::Azure(azure) => {
            let notifier: Arc<dyn PolicyNotifier> = Arc::new(AzureQueueNotifier::new(azure)?);
            Ok((service.with_notifier(notifier), None))
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Insurance service the handlers call
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(service: InsuranceService, config: ApiConfig) -> Router {
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Insurance routes
    let insurance_routes = Router::new()
        .route(
            "/insurance",
            get(insurance::list_insurances).post(insurance::buy_insurance),
        )
        .route("/insurance/quote", get(insurance::calculate_quote))
        .route_layer(axum_middleware::from_fn(audit_middleware))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .merge(public_routes)
        .merge(insurance_routes)
        .layer(middleware)
        .with_state(state)
}
