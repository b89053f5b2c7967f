//! Entry output
//!
//! - `config` - output configuration
//! - `streaming` - plain text lines, optionally colored
//! - `json` - newline-delimited JSON

mod config;
mod json;
mod streaming;

pub use config::OutputConfig;
pub use json::JsonFormatter;
pub use streaming::StreamingFormatter;
