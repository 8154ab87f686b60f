//! Tool names for the MCSManager MCP server

use strum::{Display, EnumIter, IntoStaticStr};

/// Tool names enum with automatic `snake_case` serialization
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    /// `execute_command` - Run an arbitrary console command
    ExecuteCommand,
    /// `get_players` - List online players
    GetPlayers,
    /// `get_server_status` - Player count, names and health
    GetServerStatus,
    /// `set_weather` - Change the in-game weather
    SetWeather,
    /// `get_console_output` - Read the console log tail
    GetConsoleOutput,
}

impl ToolName {
    /// Message reported when the tool's console operation did not succeed
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::ExecuteCommand => "Command execution failed",
            Self::GetPlayers => "Failed to get the player list",
            Self::GetServerStatus => "Failed to get the server status",
            Self::SetWeather => "Failed to set the weather",
            Self::GetConsoleOutput => "Failed to read console output",
        }
    }
}
