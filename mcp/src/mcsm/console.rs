//! Console access for an MCSManager instance
//!
//! `ConsoleApi` is the seam the player list, status and weather operations are
//! written against. The HTTP implementation never fails outward: every error is
//! logged and reduced to `false` or an empty string.

use async_trait::async_trait;
use error_stack::Report;
use serde_json::Value;
use tracing::{debug, warn};

use super::constants::{
    COMMAND_ENDPOINT, OUTPUT_LOG_ENDPOINT, QUERY_COMMAND, QUERY_SIZE, RESPONSE_DATA,
    RESPONSE_STATUS, STATUS_OK,
};
use super::http_client::McsmHttpClient;
use crate::error::{Error, Result};

/// Console operations of a managed game server
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Send `command` to the server console; `true` only when the panel confirms it
    async fn execute_server_command(&self, command: &str) -> bool;

    /// Read up to `size` units of recent console output; empty on any failure
    async fn get_output(&self, size: u32) -> String;
}

/// Verify the panel's own `{"status": "200"}` envelope
pub fn check_envelope(body: &Value) -> Result<()> {
    match body.get(RESPONSE_STATUS) {
        Some(Value::String(status)) if status == STATUS_OK => Ok(()),
        other => Err(Report::new(Error::ApplicationStatus {
            status: other.map(ToString::to_string),
        })),
    }
}

fn log_failure(operation: &str, report: &Report<Error>) {
    let error = report.current_context();
    if error.is_timeout() {
        warn!("{operation} timed out: {report:?}");
    } else if error.is_network() {
        warn!("{operation} could not reach MCSManager: {report:?}");
    } else {
        warn!("{operation} was rejected by MCSManager: {report:?}");
    }
}

impl McsmHttpClient {
    async fn send_command(&self, command: &str) -> Result<()> {
        let body = self
            .request(COMMAND_ENDPOINT, &[(QUERY_COMMAND, Some(command.to_string()))])
            .await?;
        check_envelope(&body).map_err(|report| report.attach(format!("Command: {command}")))
    }

    async fn fetch_output(&self, size: u32) -> Result<String> {
        let body = self
            .request(OUTPUT_LOG_ENDPOINT, &[(QUERY_SIZE, Some(size.to_string()))])
            .await?;
        check_envelope(&body)?;

        Ok(body
            .get(RESPONSE_DATA)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[async_trait]
impl ConsoleApi for McsmHttpClient {
    async fn execute_server_command(&self, command: &str) -> bool {
        match self.send_command(command).await {
            Ok(()) => {
                debug!("Console command accepted: {command}");
                true
            }
            Err(report) => {
                log_failure(&format!("Console command '{command}'"), &report);
                false
            }
        }
    }

    async fn get_output(&self, size: u32) -> String {
        self.fetch_output(size).await.unwrap_or_else(|report| {
            log_failure("Console output fetch", &report);
            String::new()
        })
    }
}
