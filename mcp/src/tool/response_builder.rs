use serde::Serialize;
use serde_json::Value;

use super::json_response::{ResponseStatus, ToolCallJsonResponse};
use super::tool_name::ToolName;

/// Builder for constructing JSON responses
#[derive(Clone)]
pub struct ResponseBuilder {
    status:  ResponseStatus,
    message: String,
    tool:    ToolName,
    result:  Option<Value>,
}

impl ResponseBuilder {
    pub const fn success(tool: ToolName) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: String::new(),
            tool,
            result: None,
        }
    }

    /// Error response pre-filled with the tool's failure message
    pub fn error(tool: ToolName) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: tool.failure_message().to_string(),
            tool,
            result: None,
        }
    }

    /// Pick success or error from the outcome of a console operation
    pub fn from_outcome(tool: ToolName, succeeded: bool) -> Self {
        if succeeded {
            Self::success(tool)
        } else {
            Self::error(tool)
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a serializable result; serialization failures are logged and the result omitted
    pub fn result(mut self, result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => self.result = Some(value),
            Err(e) => tracing::warn!("Failed to serialize result for {}: {e}", self.tool),
        }
        self
    }

    pub fn build(self) -> ToolCallJsonResponse {
        ToolCallJsonResponse {
            status:  self.status,
            message: self.message,
            tool:    self.tool.to_string(),
            result:  self.result,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_uses_failure_message() {
        let response = ResponseBuilder::from_outcome(ToolName::ExecuteCommand, false).build();
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "Command execution failed");
        assert_eq!(response.tool, "execute_command");
        assert!(response.result.is_none());
    }

    #[test]
    fn success_carries_result() {
        let response = ResponseBuilder::success(ToolName::GetPlayers)
            .message("2 players online")
            .result(json!({"players": ["A", "B"], "count": 2}))
            .build();

        let value: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "success",
                "message": "2 players online",
                "tool": "get_players",
                "result": {"players": ["A", "B"], "count": 2}
            })
        );
    }

    #[test]
    fn failures_are_not_protocol_errors() {
        let result = ResponseBuilder::error(ToolName::SetWeather)
            .build()
            .to_call_tool_result();
        assert_ne!(result.is_error, Some(true));
    }
}
