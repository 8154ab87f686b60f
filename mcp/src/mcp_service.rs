use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde_json::json;

use crate::mcsm::{self, ConsoleApi, ServerStatus, Weather};
use crate::tool::{
    ExecuteCommandParams, GetConsoleOutputParams, ResponseBuilder, SetWeatherParams,
    ToolCallJsonResponse, ToolName,
};

const SERVER_INSTRUCTIONS: &str = "Tools for a Minecraft server managed by MCSManager. \
    Use get_server_status or get_players to see who is online, execute_command to run \
    console commands, set_weather to change the weather and get_console_output to read \
    recent console output.";

/// MCP service exposing console tools for one MCSManager instance.
///
/// Every tool reports failures inside its text result; none of them surface
/// console or network problems as protocol errors.
#[derive(Clone)]
pub struct McpService {
    console:     Arc<dyn ConsoleApi>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl McpService {
    pub fn new(console: Arc<dyn ConsoleApi>) -> Self {
        Self {
            console,
            tool_router: Self::tool_router(),
        }
    }

    /// Execute a console command on the server instance (for example `/say hello`).
    /// Reports whether MCSManager accepted the command.
    #[tool(name = "execute_command")]
    async fn execute_command(
        &self,
        Parameters(params): Parameters<ExecuteCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.run_command(&params.command).await.to_call_tool_result())
    }

    /// List the players currently online. Runs `/list`, waits one second and parses the
    /// console output; the list is empty when the answer cannot be read.
    #[tool(name = "get_players")]
    async fn get_players(&self) -> Result<CallToolResult, McpError> {
        Ok(self.list_players().await.to_call_tool_result())
    }

    /// Get the number of online players, their names and whether the status could be
    /// determined (`online` or `error`).
    #[tool(name = "get_server_status")]
    async fn get_server_status(&self) -> Result<CallToolResult, McpError> {
        Ok(self.server_status().await.to_call_tool_result())
    }

    /// Set the in-game weather. Accepted values: clear, rain, thunder.
    #[tool(name = "set_weather")]
    async fn set_weather(
        &self,
        Parameters(params): Parameters<SetWeatherParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.change_weather(&params.weather).await.to_call_tool_result())
    }

    /// Read the most recent console output. `size` limits how much is returned (default 500).
    #[tool(name = "get_console_output")]
    async fn get_console_output(
        &self,
        Parameters(params): Parameters<GetConsoleOutputParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.console_output(params.size()).await.to_call_tool_result())
    }
}

// Tool bodies, kept free of rmcp wrappers
impl McpService {
    async fn run_command(&self, command: &str) -> ToolCallJsonResponse {
        if command.trim().is_empty() {
            return ResponseBuilder::error(ToolName::ExecuteCommand)
                .message("Command must not be empty")
                .build();
        }

        let accepted = self.console.execute_server_command(command).await;
        let builder = ResponseBuilder::from_outcome(ToolName::ExecuteCommand, accepted);
        if accepted {
            builder.message(format!("Executed command: {command}")).build()
        } else {
            builder.build()
        }
    }

    async fn list_players(&self) -> ToolCallJsonResponse {
        let players = mcsm::get_players(self.console.as_ref()).await;
        ResponseBuilder::success(ToolName::GetPlayers)
            .message(format!("{} player(s) online", players.len()))
            .result(json!({ "count": players.len(), "players": players }))
            .build()
    }

    async fn server_status(&self) -> ToolCallJsonResponse {
        let status: ServerStatus = mcsm::get_server_status(self.console.as_ref()).await;
        match status.status {
            mcsm::ServerState::Online => ResponseBuilder::success(ToolName::GetServerStatus)
                .message(format!(
                    "Server online with {} player(s)",
                    status.online_players
                ))
                .result(status)
                .build(),
            mcsm::ServerState::Error => ResponseBuilder::error(ToolName::GetServerStatus)
                .result(status)
                .build(),
        }
    }

    async fn change_weather(&self, weather: &str) -> ToolCallJsonResponse {
        if let Err(report) = Weather::parse(weather) {
            return ResponseBuilder::error(ToolName::SetWeather)
                .message(report.current_context().to_string())
                .build();
        }

        let changed = mcsm::set_weather(self.console.as_ref(), weather).await;
        let builder = ResponseBuilder::from_outcome(ToolName::SetWeather, changed);
        if changed {
            builder.message(format!("Weather set to {weather}")).build()
        } else {
            builder.build()
        }
    }

    async fn console_output(&self, size: u32) -> ToolCallJsonResponse {
        let output = self.console.get_output(size).await;
        let message = if output.is_empty() {
            "No console output available".to_string()
        } else {
            format!("Read {} characters of console output", output.chars().count())
        };

        ResponseBuilder::success(ToolName::GetConsoleOutput)
            .message(message)
            .result(json!({ "output": output }))
            .build()
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for McpService {
    #[allow(
        clippy::field_reassign_with_default,
        reason = "ServerInfo is built from its default so new protocol fields keep their defaults"
    )]
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(SERVER_INSTRUCTIONS.to_string());
        info
    }
}
