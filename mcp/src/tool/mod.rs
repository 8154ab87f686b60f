mod json_response;
mod parameters;
mod response_builder;
mod tool_name;

#[cfg(test)]
pub use json_response::ResponseStatus;
pub use json_response::ToolCallJsonResponse;
pub use parameters::{ExecuteCommandParams, GetConsoleOutputParams, SetWeatherParams};
pub use response_builder::ResponseBuilder;
pub use tool_name::ToolName;
