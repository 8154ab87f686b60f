//! Constants for the MCSManager protected-instance API

use std::time::Duration;

// ============================================================================
// ENDPOINTS
// ============================================================================

/// Sends a console command to the instance
pub const COMMAND_ENDPOINT: &str = "/api/protected_instance/command";

/// Returns the tail of the instance console log
pub const OUTPUT_LOG_ENDPOINT: &str = "/api/protected_instance/outputlog";

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

pub const QUERY_API_KEY: &str = "apikey";
pub const QUERY_UUID: &str = "uuid";
pub const QUERY_DAEMON_ID: &str = "daemonId";
pub const QUERY_COMMAND: &str = "command";
pub const QUERY_SIZE: &str = "size";

// ============================================================================
// RESPONSE ENVELOPE
// ============================================================================

pub const RESPONSE_STATUS: &str = "status";
pub const RESPONSE_DATA: &str = "data";

/// Application-level success marker; compared as a string, not a number
pub const STATUS_OK: &str = "200";

// ============================================================================
// TIMING AND SIZES
// ============================================================================

/// Hard per-request budget
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait between issuing `/list` and reading the console back
pub const LIST_OUTPUT_DELAY: Duration = Duration::from_millis(1000);

pub const DEFAULT_OUTPUT_SIZE: u32 = 500;

// ============================================================================
// CONSOLE COMMANDS
// ============================================================================

pub const LIST_COMMAND: &str = "/list";
pub const WEATHER_COMMAND: &str = "/weather";
