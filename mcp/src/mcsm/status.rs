//! Server status derived from the current player list

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::Serialize;
use tracing::error;

use super::console::ConsoleApi;
use super::players::get_players;

/// Whether the status could be aggregated at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    Online,
    Error,
}

/// Snapshot built fresh on every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub online_players: usize,
    pub player_names:   Vec<String>,
    pub status:         ServerState,
}

impl ServerStatus {
    pub fn online(player_names: Vec<String>) -> Self {
        Self {
            online_players: player_names.len(),
            player_names,
            status: ServerState::Online,
        }
    }

    pub const fn error() -> Self {
        Self {
            online_players: 0,
            player_names:   Vec::new(),
            status:         ServerState::Error,
        }
    }
}

/// Aggregate the player list into a status record.
///
/// Zero players is still `online`; `error` is reserved for a lookup that unwound.
pub async fn get_server_status<C>(console: &C) -> ServerStatus
where
    C: ConsoleApi + ?Sized,
{
    match AssertUnwindSafe(get_players(console)).catch_unwind().await {
        Ok(players) => ServerStatus::online(players),
        Err(_) => {
            error!("Player lookup aborted unexpectedly; reporting error status");
            ServerStatus::error()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::mcsm::test_support::ScriptedConsole;

    #[tokio::test(start_paused = true)]
    async fn online_status_counts_players() {
        let console =
            ScriptedConsole::new(true, "There are 2 of a max of 20 players online: A, B\r\n");

        let status = get_server_status(&console).await;

        assert_eq!(status.status, ServerState::Online);
        assert_eq!(status.online_players, status.player_names.len());
        assert_eq!(status.player_names, vec!["A", "B"]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_players_is_still_online() {
        let console = ScriptedConsole::new(false, "");

        let status = get_server_status(&console).await;

        assert_eq!(status, ServerStatus::online(Vec::new()));
        assert_eq!(status.online_players, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unwinding_lookup_reports_error() {
        let console = ScriptedConsole::panicking();

        let status = get_server_status(&console).await;

        assert_eq!(status, ServerStatus::error());
        assert!(status.player_names.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_queries_are_structurally_equal() {
        let console =
            ScriptedConsole::new(true, "There are 1 of a max of 20 players online: chaofanx\r\n");

        let first = get_server_status(&console).await;
        let second = get_server_status(&console).await;

        assert_eq!(first, second);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(ServerStatus::online(vec!["A".to_string()])).unwrap();
        assert_eq!(
            value,
            json!({"onlinePlayers": 1, "playerNames": ["A"], "status": "online"})
        );
        assert_eq!(
            serde_json::to_value(ServerStatus::error()).unwrap(),
            json!({"onlinePlayers": 0, "playerNames": [], "status": "error"})
        );
    }
}
