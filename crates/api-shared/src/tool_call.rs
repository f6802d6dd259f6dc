//! Telephony tool-call adapter.
//!
//! Voice assistants call the dashboard endpoints with a wrapped body:
//!
//! ```json
//! { "message": { "toolCalls": [ { "id": "call_1", "function": { "arguments": { "tab": "statistics" } } } ] } }
//! ```
//!
//! and expect the reply wrapped as `{ "results": [ { "toolCallId": "call_1", "result": ... } ] }`.
//! Plain JSON bodies pass through untouched. The adapter only unwraps and re-wraps; the
//! endpoints themselves never see the telephony shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Errors raised while unwrapping a tool-call body.
#[derive(Debug, thiserror::Error)]
pub enum ToolCallError {
    #[error("tool call arguments are not valid JSON: {0}")]
    InvalidArguments(#[from] serde_json::Error),
}

/// Arguments of a request, with the tool call id when the body was a telephony envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub tool_call_id: Option<String>,
    pub arguments: Value,
}

impl Invocation {
    /// Unwraps `message.toolCalls[0]` when present, otherwise treats the body as the arguments.
    ///
    /// Arguments may be an object or a JSON-encoded string.
    ///
    /// # Errors
    ///
    /// Returns [`ToolCallError::InvalidArguments`] if string arguments are not valid JSON.
    pub fn from_body(body: Value) -> Result<Self, ToolCallError> {
        if body.pointer("/message/toolCalls/0").is_none() {
            return Ok(Self {
                tool_call_id: None,
                arguments: body,
            });
        }
        let tool_call = &body["message"]["toolCalls"][0];

        let tool_call_id = tool_call.get("id").map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        let arguments = match tool_call.pointer("/function/arguments") {
            Some(Value::String(raw)) => serde_json::from_str(raw)?,
            Some(value) => value.clone(),
            None => Value::Object(Default::default()),
        };

        Ok(Self {
            tool_call_id,
            arguments,
        })
    }
}

/// One entry of a telephony reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub tool_call_id: String,
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Telephony reply envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToolCallResults {
    pub results: Vec<ToolCallResult>,
}

impl ToolCallResults {
    /// Wraps a canonical reply for the given tool call.
    pub fn single(tool_call_id: impl Into<String>, result: Value) -> Self {
        Self {
            results: vec![ToolCallResult {
                tool_call_id: tool_call_id.into(),
                result,
            }],
        }
    }
}
