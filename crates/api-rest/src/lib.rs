//! # API REST
//!
//! REST and push-channel API for the doctor dashboard.
//!
//! Handles:
//! - HTTP endpoints with axum, one per gateway operation
//! - The `/ws` WebSocket push channel
//! - The telephony tool-call envelope on mutating endpoints
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON errors, CORS, request tracing, panic recovery)
//!
//! Uses `dash-core` for state and mutation logic and `api-shared` for wire types.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod invocation;
pub mod ws;

use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use dash_core::Gateway;
use std::any::Any;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_doctors,
        handlers::create_doctor,
        handlers::delete_doctor,
        handlers::highlight_doctor,
        handlers::unhighlight_doctor,
        handlers::navigate,
        handlers::set_month,
        handlers::list_visit_stats,
        handlers::visits_for_month,
        handlers::visit_trends,
        handlers::visit_months,
        handlers::relationship_flows,
        handlers::view_relationship,
        handlers::close_relationship,
        handlers::list_reviews,
        handlers::reviews_for_doctor,
        handlers::create_review,
        handlers::delete_review,
        handlers::list_medical_info,
        handlers::create_medical_info,
        handlers::medical_info_for_doctor,
        handlers::delete_medical_info,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ResultRes,
        api_shared::ErrorRes,
        api_shared::Doctor,
        api_shared::VisitStat,
        api_shared::Review,
        api_shared::MedicalInfo,
        api_shared::MedicalInfoType,
        api_shared::Severity,
        api_shared::MedicalMetadata,
        api_shared::QuarterlyVisits,
        api_shared::MonthlyVisits,
        api_shared::RelationshipFlow,
        api_shared::RelationshipView,
        api_shared::CreateDoctorReq,
        api_shared::DoctorIdReq,
        api_shared::NavigateReq,
        api_shared::SetMonthReq,
        api_shared::ViewRelationshipReq,
        api_shared::CreateReviewReq,
        api_shared::NewMedicalInfo,
        api_shared::ToolCallResults,
        api_shared::ToolCallResult,
    ))
)]
pub struct ApiDoc;

/// Builds the dashboard router.
///
/// With `cors_any_origin` unset, browsers are only allowed in from `http://localhost:<port>`
/// origins using GET, POST and DELETE.
pub fn router(state: AppState, cors_any_origin: bool) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/doctors",
            get(handlers::list_doctors).post(handlers::create_doctor),
        )
        .route("/api/doctors/delete", post(handlers::delete_doctor))
        .route("/api/doctors/highlight", post(handlers::highlight_doctor))
        .route("/api/doctors/unhighlight", post(handlers::unhighlight_doctor))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/visits/month", post(handlers::set_month))
        .route("/api/visits/stats", get(handlers::list_visit_stats))
        .route("/api/visits/stats/:month", get(handlers::visits_for_month))
        .route("/api/visits/trends", get(handlers::visit_trends))
        .route("/api/visits/months", get(handlers::visit_months))
        .route("/api/relationships", get(handlers::relationship_flows))
        .route("/api/viewRelationship", post(handlers::view_relationship))
        .route("/api/closeRelationship", post(handlers::close_relationship))
        .route(
            "/api/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        // GET takes a doctor id, DELETE a review id.
        .route(
            "/api/reviews/:id",
            get(handlers::reviews_for_doctor).delete(handlers::delete_review),
        )
        .route(
            "/api/medical-info",
            get(handlers::list_medical_info).post(handlers::create_medical_info),
        )
        .route(
            "/api/medical-info/doctor/:doctor_id",
            get(handlers::medical_info_for_doctor),
        )
        .route(
            "/api/medical-info/:id",
            delete(handlers::delete_medical_info),
        )
        .route("/ws", get(ws::ws_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    with_layers(routes, cors_any_origin)
}

/// Wraps `routes` in CORS, request tracing and panic recovery.
fn with_layers(routes: Router, cors_any_origin: bool) -> Router {
    routes
        .layer(cors_layer(cors_any_origin))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn cors_layer(any_origin: bool) -> CorsLayer {
    if any_origin {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().is_ok_and(is_localhost_origin)
        }))
}

/// Whether `origin` is `http://localhost:<port>`.
pub fn is_localhost_origin(origin: &str) -> bool {
    origin
        .strip_prefix("http://localhost:")
        .is_some_and(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("request handler panicked: {}", detail);
    ApiError::internal().into_response()
}
