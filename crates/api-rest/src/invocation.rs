//! Request bodies that may arrive in the telephony tool-call envelope, and replies that are
//! wrapped back into it.

use crate::error::ApiError;
use api_shared::{Invocation, ResultRes, ToolCallResults};
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// JSON body extractor that unwraps `message.toolCalls[0].function.arguments` when present.
///
/// Malformed JSON and argument shapes that do not fit `T` are rejected with a 400.
pub struct Invoked<T> {
    pub tool_call_id: Option<String>,
    pub args: T,
}

#[async_trait]
impl<S, T> FromRequest<S> for Invoked<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        let invocation =
            Invocation::from_body(body).map_err(|e| ApiError::bad_request(e.to_string()))?;
        let args = serde_json::from_value(invocation.arguments)
            .map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))?;

        Ok(Self {
            tool_call_id: invocation.tool_call_id,
            args,
        })
    }
}

/// A successful reply.
///
/// Plain requests get `body` as JSON. Tool-call requests get
/// `{ "results": [ { "toolCallId", "result" } ] }` where `result` is a short message for the
/// voice assistant, or the body itself when no message was set.
pub struct Reply {
    status: StatusCode,
    tool_call_id: Option<String>,
    body: Value,
    spoken: Option<String>,
}

impl Reply {
    pub fn new<T: Serialize>(
        status: StatusCode,
        tool_call_id: Option<String>,
        body: &T,
    ) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| {
            tracing::error!("failed to serialise reply: {}", e);
            ApiError::internal()
        })?;
        Ok(Self {
            status,
            tool_call_id,
            body,
            spoken: None,
        })
    }

    /// `200 { "result": message }`; the message itself is what a tool call hears back.
    pub fn message(tool_call_id: Option<String>, res: ResultRes) -> Self {
        let spoken = res.result.clone();
        Self {
            status: StatusCode::OK,
            tool_call_id,
            body: serde_json::json!({ "result": res.result }),
            spoken: Some(spoken),
        }
    }

    pub fn spoken(mut self, message: impl Into<String>) -> Self {
        self.spoken = Some(message.into());
        self
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.tool_call_id {
            Some(id) => {
                let result = self.spoken.map(Value::String).unwrap_or(self.body);
                (self.status, Json(ToolCallResults::single(id, result))).into_response()
            }
            None => (self.status, Json(self.body)).into_response(),
        }
    }
}
