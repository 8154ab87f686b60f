use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::warn;

use super::console::ConsoleApi;
use super::constants::WEATHER_COMMAND;
use crate::error::{Error, Result};

/// Weather values accepted by the `/weather` console command
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Thunder,
}

impl Weather {
    /// Parse a weather name exactly as the console expects it
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| {
            error_stack::Report::new(Error::invalid(
                "weather",
                format!("'{value}'. Valid values are: {}", Self::valid_values()),
            ))
        })
    }

    pub fn valid_values() -> String {
        Self::iter()
            .map(|weather| weather.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn command(self) -> String {
        format!("{WEATHER_COMMAND} {self}")
    }
}

/// Validate `weather` and send `/weather <weather>`; invalid values never reach the server
pub async fn set_weather<C>(console: &C, weather: &str) -> bool
where
    C: ConsoleApi + ?Sized,
{
    match Weather::parse(weather) {
        Ok(weather) => console.execute_server_command(&weather.command()).await,
        Err(report) => {
            warn!("Rejected weather change: {report:?}");
            false
        }
    }
}
