//! Output callback used by the walker

use std::path::Path;

use crate::entry::EntryDescriptor;
use crate::error::{Error, Result, report};

/// Callback for streaming output: receives each visited entry as soon as it
/// is resolved.
pub trait StreamingOutput {
    /// Emit one entry. Any error returned here ends the walk.
    fn output_entry(&mut self, path: &Path, entry: &EntryDescriptor) -> Result<()>;

    /// Called for every recoverable error. The default prints it to stderr.
    fn report_error(&mut self, error: &Error) {
        report(error);
    }

    /// Called once after the last entry, including when the walk stops early.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
