//! Push-channel messages.
//!
//! Every frame on the socket is a JSON object `{ "event": <name>, "data": <payload> }`.
//! List events carry the whole collection; targeted events carry a single value.

use crate::models::{
    CreateReviewReq, Doctor, MedicalInfo, NewMedicalInfo, OneOrMany, RelationshipView, Review,
};
use serde::{Deserialize, Serialize};

/// Messages pushed from the server to every subscriber.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "doctors:list")]
    DoctorsList(Vec<Doctor>),
    #[serde(rename = "reviews:list")]
    ReviewsList(Vec<Review>),
    #[serde(rename = "medical:list")]
    MedicalList(Vec<MedicalInfo>),
    /// Only the records added by one create request.
    #[serde(rename = "doctor:medical-info")]
    MedicalInfoAdded(Vec<MedicalInfo>),
    #[serde(rename = "doctor:highlight")]
    DoctorHighlighted(String),
    #[serde(rename = "doctor:unhighlight")]
    DoctorUnhighlighted(String),
    #[serde(rename = "navigation:change")]
    NavigationChanged(String),
    #[serde(rename = "visits:setMonth")]
    MonthSelected(String),
    #[serde(rename = "relationships:view")]
    RelationshipViewed(RelationshipView),
    #[serde(rename = "relationships:close")]
    RelationshipClosed,
}

impl ServerEvent {
    /// Wire name of the event, used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::DoctorsList(_) => "doctors:list",
            ServerEvent::ReviewsList(_) => "reviews:list",
            ServerEvent::MedicalList(_) => "medical:list",
            ServerEvent::MedicalInfoAdded(_) => "doctor:medical-info",
            ServerEvent::DoctorHighlighted(_) => "doctor:highlight",
            ServerEvent::DoctorUnhighlighted(_) => "doctor:unhighlight",
            ServerEvent::NavigationChanged(_) => "navigation:change",
            ServerEvent::MonthSelected(_) => "visits:setMonth",
            ServerEvent::RelationshipViewed(_) => "relationships:view",
            ServerEvent::RelationshipClosed => "relationships:close",
        }
    }

    /// Whether the event carries a full collection snapshot.
    pub fn is_snapshot(&self) -> bool {
        matches!(
            self,
            ServerEvent::DoctorsList(_) | ServerEvent::ReviewsList(_) | ServerEvent::MedicalList(_)
        )
    }
}

/// Messages a connected client may send over the socket.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "reviews:add")]
    AddReview(CreateReviewReq),
    #[serde(rename = "doctor:medical-info")]
    AddMedicalInfo(OneOrMany<NewMedicalInfo>),
}
