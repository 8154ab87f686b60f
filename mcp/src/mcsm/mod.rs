// MCSManager protected-instance API: HTTP transport, console access and the
// player/status/weather operations built on top of it

mod console;
mod constants;
mod http_client;
mod players;
mod status;
mod weather;

#[cfg(test)]
pub(crate) mod test_support;

pub use console::ConsoleApi;
pub use constants::DEFAULT_OUTPUT_SIZE;
pub use http_client::McsmHttpClient;
pub use players::get_players;
pub use status::{ServerState, ServerStatus, get_server_status};
pub use weather::{Weather, set_weather};
