// Trace logging for the server; stdout is reserved for the MCP transport

mod lazy_file_writer;
mod tracing;

pub use self::tracing::TracingLevel;
