//! Player list extraction from console output
//!
//! The server is asked to print its player list with `/list`, then the console
//! tail is read back and the line
//! `There are <n> of a max of <m> players online: <names>\r\n` is parsed.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::console::ConsoleApi;
use super::constants::{DEFAULT_OUTPUT_SIZE, LIST_COMMAND, LIST_OUTPUT_DELAY};

/// `None` only if the literal below were invalid
static PLAYER_LIST_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"There are ([0-9]+) of a max of ([0-9]+) players online: ([^\r\n]*)\r\n").ok()
});

/// Outcome of scanning console text for the player list line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerListParse {
    Matched {
        /// Player count reported by the server
        count: u32,
        /// Server capacity
        max:   u32,
        /// Names in order of appearance; may disagree with `count`
        names: Vec<String>,
    },
    NoMatch,
}

impl PlayerListParse {
    /// The player names, trusting the split names over the reported count
    pub fn into_players(self) -> Vec<String> {
        match self {
            Self::Matched { count: 0, .. } | Self::NoMatch => Vec::new(),
            Self::Matched { names, .. } => names,
        }
    }
}

/// Find the first player list line anywhere in `output`
pub fn parse_player_list(output: &str) -> PlayerListParse {
    let Some(captures) = PLAYER_LIST_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(output))
    else {
        return PlayerListParse::NoMatch;
    };

    // Digit runs too long for u32 still mean "some players"
    let count = captures[1].parse().unwrap_or(u32::MAX);
    let max = captures[2].parse().unwrap_or(u32::MAX);
    let names = captures[3]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect();

    PlayerListParse::Matched { count, max, names }
}

/// Ask the server for its player list and read the answer back from the console.
///
/// Returns an empty list when the command is rejected, nothing was read, or the
/// console did not contain a player list line.
pub async fn get_players<C>(console: &C) -> Vec<String>
where
    C: ConsoleApi + ?Sized,
{
    if !console.execute_server_command(LIST_COMMAND).await {
        return Vec::new();
    }

    // The panel processes console input asynchronously
    debug!("Waiting {LIST_OUTPUT_DELAY:?} for '{LIST_COMMAND}' output");
    tokio::time::sleep(LIST_OUTPUT_DELAY).await;

    let output = console.get_output(DEFAULT_OUTPUT_SIZE).await;
    if output.is_empty() {
        return Vec::new();
    }

    let parsed = parse_player_list(&output);
    match &parsed {
        PlayerListParse::Matched { count, max, .. } => {
            debug!("Server reports {count} of {max} players online");
        }
        PlayerListParse::NoMatch => warn!("No player list line found in console output"),
    }
    parsed.into_players()
}
