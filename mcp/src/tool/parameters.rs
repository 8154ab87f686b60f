//! Parameter definitions for our MCP tools

use schemars::JsonSchema;
use serde::Deserialize;

use crate::mcsm::DEFAULT_OUTPUT_SIZE;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteCommandParams {
    /// Console command to run, sent verbatim (e.g. `/say hello`)
    pub command: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetWeatherParams {
    /// One of: clear, rain, thunder
    pub weather: String,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetConsoleOutputParams {
    /// Amount of console output to return (default: 500)
    #[serde(default)]
    pub size: Option<u32>,
}

impl GetConsoleOutputParams {
    pub fn size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_OUTPUT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn console_output_size_defaults() {
        let params: GetConsoleOutputParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.size(), DEFAULT_OUTPUT_SIZE);

        let params: GetConsoleOutputParams = serde_json::from_value(json!({"size": 0})).unwrap();
        assert_eq!(params.size(), 0);
    }

    #[test]
    fn weather_accepts_any_string_for_later_validation() {
        let params: SetWeatherParams = serde_json::from_value(json!({"weather": "storm"})).unwrap();
        assert_eq!(params.weather, "storm");
    }
}
