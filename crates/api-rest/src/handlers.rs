//! REST handlers.
//!
//! Each handler is a thin shell around one [`Gateway`](dash_core::Gateway) operation: extract,
//! call, reply. Mutating endpoints accept either a plain JSON body or the telephony tool-call
//! envelope (see [`Invoked`]).

use crate::error::ApiError;
use crate::invocation::{Invoked, Reply};
use crate::AppState;
use api_shared::{
    CreateDoctorReq, CreateReviewReq, Doctor, DoctorIdReq, ErrorRes, HealthRes, HealthService,
    MedicalInfo, MonthlyVisits, NavigateReq, NewMedicalInfo, OneOrMany, QuarterlyVisits,
    RelationshipFlow, ResultRes, Review, SetMonthReq, ViewRelationshipReq, VisitStat,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

// ----------------------------------------------------------------------------
// Doctors
// ----------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/doctors",
    responses(
        (status = 200, description = "All doctors", body = [Doctor])
    )
)]
/// List all doctors
#[axum::debug_handler]
pub async fn list_doctors(State(state): State<AppState>) -> Json<Vec<Doctor>> {
    Json(state.gateway.list_doctors())
}

#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = CreateDoctorReq,
    responses(
        (status = 201, description = "Doctor created", body = Doctor),
        (status = 400, description = "Name or specialty missing", body = ErrorRes)
    )
)]
/// Create a doctor
///
/// `lastVisited` defaults to the time of the request. Every subscriber receives the updated
/// `doctors:list`.
///
/// # Errors
/// Returns `400 Bad Request` if `name` or `specialty` is missing or blank.
#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<AppState>,
    req: Invoked<CreateDoctorReq>,
) -> Result<Reply, ApiError> {
    let doctor = state.gateway.create_doctor(req.args)?;
    let spoken = format!("Created new doctor: {}", doctor.name);
    Ok(Reply::new(StatusCode::CREATED, req.tool_call_id, &doctor)?.spoken(spoken))
}

#[utoipa::path(
    post,
    path = "/api/doctors/delete",
    request_body = DoctorIdReq,
    responses(
        (status = 200, description = "Doctor deleted", body = ResultRes),
        (status = 400, description = "Doctor ID missing", body = ErrorRes),
        (status = 404, description = "No doctor with that ID", body = ErrorRes)
    )
)]
/// Delete a doctor by id
///
/// # Errors
/// Returns `400 Bad Request` if `id` is missing and `404 Not Found` if no doctor has it. In both
/// cases nothing is broadcast.
#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<AppState>,
    req: Invoked<DoctorIdReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.delete_doctor(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

#[utoipa::path(
    post,
    path = "/api/doctors/highlight",
    request_body = DoctorIdReq,
    responses(
        (status = 200, description = "Highlight broadcast", body = ResultRes),
        (status = 400, description = "Doctor ID missing", body = ErrorRes)
    )
)]
/// Highlight a doctor on every connected dashboard
#[axum::debug_handler]
pub async fn highlight_doctor(
    State(state): State<AppState>,
    req: Invoked<DoctorIdReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.highlight_doctor(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

#[utoipa::path(
    post,
    path = "/api/doctors/unhighlight",
    request_body = DoctorIdReq,
    responses(
        (status = 200, description = "Unhighlight broadcast", body = ResultRes),
        (status = 400, description = "Doctor ID missing", body = ErrorRes)
    )
)]
/// Clear a doctor highlight on every connected dashboard
#[axum::debug_handler]
pub async fn unhighlight_doctor(
    State(state): State<AppState>,
    req: Invoked<DoctorIdReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.unhighlight_doctor(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

// ----------------------------------------------------------------------------
// Navigation and visit statistics
// ----------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/navigate",
    request_body = NavigateReq,
    responses(
        (status = 200, description = "Navigation broadcast", body = ResultRes),
        (status = 400, description = "Tab missing", body = ErrorRes)
    )
)]
/// Switch the dashboard tab
#[axum::debug_handler]
pub async fn navigate(
    State(state): State<AppState>,
    req: Invoked<NavigateReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.navigate(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

#[utoipa::path(
    post,
    path = "/api/visits/month",
    request_body = SetMonthReq,
    responses(
        (status = 200, description = "Month selection broadcast", body = ResultRes),
        (status = 400, description = "Month missing", body = ErrorRes)
    )
)]
/// Select the month shown in the visits view
#[axum::debug_handler]
pub async fn set_month(
    State(state): State<AppState>,
    req: Invoked<SetMonthReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.set_month(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

#[utoipa::path(
    get,
    path = "/api/visits/stats",
    responses(
        (status = 200, description = "Monthly visit statistics", body = [VisitStat])
    )
)]
/// List the stored monthly visit statistics
#[axum::debug_handler]
pub async fn list_visit_stats(State(state): State<AppState>) -> Json<Vec<VisitStat>> {
    Json(state.gateway.list_visit_stats())
}

#[utoipa::path(
    get,
    path = "/api/visits/stats/{month}",
    params(("month" = String, Path, description = "Month label, e.g. 2023-04")),
    responses(
        (status = 200, description = "Visits per family member in the month", body = [MonthlyVisits])
    )
)]
/// Visits per family member for one month
///
/// An unknown month yields an empty list.
#[axum::debug_handler]
pub async fn visits_for_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> Json<Vec<MonthlyVisits>> {
    Json(state.gateway.visits_for_month(&month))
}

#[utoipa::path(
    get,
    path = "/api/visits/trends",
    responses(
        (status = 200, description = "Visits per quarter and family member", body = [QuarterlyVisits]),
        (status = 500, description = "Stored statistics contain an invalid month", body = ErrorRes)
    )
)]
/// Quarterly visit trends
#[axum::debug_handler]
pub async fn visit_trends(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuarterlyVisits>>, ApiError> {
    Ok(Json(state.gateway.visit_trends()?))
}

#[utoipa::path(
    get,
    path = "/api/visits/months",
    responses(
        (status = 200, description = "Distinct month labels, ascending", body = [String])
    )
)]
/// Months that have visit statistics
#[axum::debug_handler]
pub async fn visit_months(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.gateway.visit_months())
}

#[utoipa::path(
    get,
    path = "/api/relationships",
    responses(
        (status = 200, description = "Total visits per family member and doctor", body = [RelationshipFlow])
    )
)]
/// Family member → doctor visit flows
#[axum::debug_handler]
pub async fn relationship_flows(State(state): State<AppState>) -> Json<Vec<RelationshipFlow>> {
    Json(state.gateway.relationship_flows())
}

#[utoipa::path(
    post,
    path = "/api/viewRelationship",
    request_body = ViewRelationshipReq,
    responses(
        (status = 200, description = "Relationship view broadcast", body = ResultRes),
        (status = 400, description = "doctorId or familyMember missing", body = ErrorRes)
    )
)]
/// Open the relationship view for a family member and doctor
#[axum::debug_handler]
pub async fn view_relationship(
    State(state): State<AppState>,
    req: Invoked<ViewRelationshipReq>,
) -> Result<Reply, ApiError> {
    let res = state.gateway.view_relationship(req.args)?;
    Ok(Reply::message(req.tool_call_id, res))
}

#[utoipa::path(
    post,
    path = "/api/closeRelationship",
    responses(
        (status = 200, description = "Close broadcast", body = ResultRes)
    )
)]
/// Close the relationship view
///
/// Takes no arguments; a body is only read for its tool call id.
#[axum::debug_handler]
pub async fn close_relationship(
    State(state): State<AppState>,
    req: Option<Invoked<Value>>,
) -> Reply {
    let res = state.gateway.close_relationship();
    Reply::message(req.and_then(|r| r.tool_call_id), res)
}

// ----------------------------------------------------------------------------
// Reviews
// ----------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses(
        (status = 200, description = "All reviews", body = [Review])
    )
)]
/// List all reviews
#[axum::debug_handler]
pub async fn list_reviews(State(state): State<AppState>) -> Json<Vec<Review>> {
    Json(state.gateway.list_reviews())
}

#[utoipa::path(
    get,
    path = "/api/reviews/{doctorId}",
    params(("doctorId" = String, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Reviews of the doctor", body = [Review])
    )
)]
/// List the reviews of one doctor
#[axum::debug_handler]
pub async fn reviews_for_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Json<Vec<Review>> {
    Json(state.gateway.reviews_for_doctor(&doctor_id))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewReq,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Required fields missing", body = ErrorRes)
    )
)]
/// Create a review
///
/// Ratings outside 1 to 5 are clamped. Every subscriber receives the updated `reviews:list`.
///
/// # Errors
/// Returns `400 Bad Request` naming every missing field.
#[axum::debug_handler]
pub async fn create_review(
    State(state): State<AppState>,
    req: Invoked<CreateReviewReq>,
) -> Result<Reply, ApiError> {
    let review = state.gateway.create_review(req.args)?;
    let spoken = format!(
        "Added a {} star review for doctor {}",
        review.rating, review.doctor_id
    );
    Ok(Reply::new(StatusCode::CREATED, req.tool_call_id, &review)?.spoken(spoken))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{reviewId}",
    params(("reviewId" = String, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Review deleted", body = ResultRes),
        (status = 404, description = "No review with that ID", body = ErrorRes)
    )
)]
/// Delete a review by id
#[axum::debug_handler]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<ResultRes>, ApiError> {
    Ok(Json(state.gateway.delete_review(&review_id)?))
}

// ----------------------------------------------------------------------------
// Medical info
// ----------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/medical-info",
    responses(
        (status = 200, description = "All medical info", body = [MedicalInfo])
    )
)]
/// List all medical info
#[axum::debug_handler]
pub async fn list_medical_info(State(state): State<AppState>) -> Json<Vec<MedicalInfo>> {
    Json(state.gateway.list_medical_info())
}

#[utoipa::path(
    post,
    path = "/api/medical-info",
    request_body(content = [NewMedicalInfo], description = "One record or an array of records"),
    responses(
        (status = 201, description = "Records stored", body = [MedicalInfo]),
        (status = 400, description = "Malformed record or empty array", body = ErrorRes)
    )
)]
/// Store one or many medical-info records
///
/// Subscribers receive the new records as `doctor:medical-info`, then the full `medical:list`.
#[axum::debug_handler]
pub async fn create_medical_info(
    State(state): State<AppState>,
    req: Invoked<OneOrMany<NewMedicalInfo>>,
) -> Result<Reply, ApiError> {
    let created = state.gateway.create_medical_info(req.args)?;
    let spoken = format!("Sent {} medical info record(s)", created.len());
    Ok(Reply::new(StatusCode::CREATED, req.tool_call_id, &created)?.spoken(spoken))
}

#[utoipa::path(
    get,
    path = "/api/medical-info/doctor/{doctorId}",
    params(("doctorId" = String, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Medical info from the doctor", body = [MedicalInfo])
    )
)]
/// List the medical info attached to one doctor
#[axum::debug_handler]
pub async fn medical_info_for_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
) -> Json<Vec<MedicalInfo>> {
    Json(state.gateway.medical_info_for_doctor(&doctor_id))
}

#[utoipa::path(
    delete,
    path = "/api/medical-info/{id}",
    params(("id" = String, Path, description = "Medical info identifier")),
    responses(
        (status = 200, description = "Medical info deleted", body = ResultRes),
        (status = 404, description = "No medical info with that ID", body = ErrorRes)
    )
)]
/// Delete a medical-info record by id
#[axum::debug_handler]
pub async fn delete_medical_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResultRes>, ApiError> {
    Ok(Json(state.gateway.delete_medical_info(&id)?))
}
