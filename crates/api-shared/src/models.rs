//! Wire models for the dashboard API.
//!
//! These types are shared by the REST handlers, the push channel and the core store. They
//! serialise to camelCase JSON, which is the shape the dashboard UI consumes.
//!
//! Request types keep every field optional so that presence checks happen in the gateway
//! (and produce a client error) rather than failing inside the JSON extractor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// ============================================================================
// Stored records
// ============================================================================

/// A doctor shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    /// Millisecond timestamp identifier assigned at creation.
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub last_visited: DateTime<Utc>,
}

/// Visit count for one family member with one doctor in one month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitStat {
    /// Doctor reference. Not checked against the doctor collection.
    pub doctor_id: String,
    pub visit_count: u32,
    /// Month label in `YYYY-MM` form.
    pub date: String,
    pub family_member: String,
}

/// A patient review of a doctor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub doctor_id: String,
    /// Star rating, always within `1..=5`.
    pub rating: u8,
    pub comment: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Kind of medical information pushed to the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MedicalInfoType {
    Article,
    Medication,
    Warning,
    Recommendation,
}

/// Severity attached to warnings and recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Structured details for medications (dosage, frequency, duration, side effects) and
/// articles (URL, source, tags).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// A stored medical-info entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MedicalInfoType,
    pub title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub doctor_id: String,
    pub doctor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MedicalMetadata>,
}

// ============================================================================
// Derived views
// ============================================================================

/// Visits summed per quarter and family member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyVisits {
    /// Quarter label such as `Q1 2023`.
    pub quarter: String,
    pub family_member: String,
    pub visit_count: u32,
}

/// Visits of one family member in a single month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVisits {
    pub family_member: String,
    pub visit_count: u32,
}

/// Total visits between a family member and a doctor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipFlow {
    pub family_member: String,
    pub doctor_id: String,
    pub visit_count: u32,
}

/// Payload of the `relationships:view` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipView {
    pub doctor_id: String,
    pub family_member: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /api/doctors`.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Defaults to the time of the request. `lastVisisted` is accepted for older
    /// telephony clients.
    #[serde(default, alias = "lastVisisted")]
    pub last_visited: Option<DateTime<Utc>>,
}

/// Body carrying a single record identifier (delete, highlight, unhighlight).
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct DoctorIdReq {
    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<String>,
}

/// Body of `POST /api/navigate`.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NavigateReq {
    #[serde(default)]
    pub tab: Option<String>,
}

/// Body of `POST /api/visits/month`.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct SetMonthReq {
    #[serde(default)]
    pub month: Option<String>,
}

/// Body of `POST /api/viewRelationship`.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewRelationshipReq {
    #[serde(default, deserialize_with = "loose_id")]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub family_member: Option<String>,
}

/// Body of `POST /api/reviews` and of the `reviews:add` socket message.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewReq {
    #[serde(default, deserialize_with = "loose_id")]
    pub doctor_id: Option<String>,
    /// Out-of-range values are clamped into `1..=5`.
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
}

/// One incoming medical-info record. `id` and `timestamp` are filled in when absent.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalInfo {
    #[serde(default, deserialize_with = "loose_id")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: MedicalInfoType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "loose_id")]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub metadata: Option<MedicalMetadata>,
}

/// A request body that may be a single object or an array of objects.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalises both shapes into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Confirmation reply for mutations that do not return a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResultRes {
    pub result: String,
}

impl ResultRes {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
        }
    }
}

/// Error body returned with every 4xx/5xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Accepts identifiers sent either as JSON strings or as numbers.
fn loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(
        Option::<LooseId>::deserialize(deserializer)?.map(|id| match id {
            LooseId::Text(text) => text,
            LooseId::Int(n) => n.to_string(),
            LooseId::Float(n) => n.to_string(),
        }),
    )
}
