use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Standard JSON response structure for all tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallJsonResponse {
    pub status:  ResponseStatus,
    pub message: String,
    pub tool:    String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result:  Option<Value>,
}

impl ToolCallJsonResponse {
    /// Convert to JSON string with error-stack context
    /// Uses `PrettyCompactFormatter` for readable structure with compact arrays
    pub fn to_json(&self) -> Result<String> {
        use error_stack::ResultExt;
        use json_pretty_compact::PrettyCompactFormatter;
        use serde_json::Serializer;

        let mut buf = Vec::new();
        let formatter = PrettyCompactFormatter::new();
        let mut ser = Serializer::with_formatter(&mut buf, formatter);

        self.serialize(&mut ser)
            .change_context(Error::General("Failed to serialize JSON response".to_string()))?;

        String::from_utf8(buf).change_context(Error::General(
            "Failed to convert JSON bytes to string".to_string(),
        ))
    }

    /// Convert to JSON string with fallback on error
    pub fn to_json_fallback(&self) -> String {
        self.to_json().unwrap_or_else(|_| {
            r#"{"status":"error","message":"Failed to serialize response"}"#.to_string()
        })
    }

    /// Failures are reported inside the text body; the call itself always succeeds
    pub fn to_call_tool_result(&self) -> CallToolResult {
        CallToolResult::success(vec![Content::text(self.to_json_fallback())])
    }
}

/// Response status types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}
