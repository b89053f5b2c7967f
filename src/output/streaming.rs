//! Streaming output formatter
//!
//! `StreamingFormatter` writes one line per entry as the walker reports it:
//! the enabled metadata fields followed by the path, colored by entry kind
//! when color is on.

use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use termcolor::{BufferedStandardStream, Color, ColorSpec, WriteColor};

use crate::entry::{EntryDescriptor, EntryKind};
use crate::error::Result;
use crate::format::format_fields;
use crate::identity::{NameLookup, SystemNames};
use crate::options::DisplayOptions;
use crate::tree::StreamingOutput;

use super::config::OutputConfig;

/// Color used for the path column, if any.
fn path_color(kind: EntryKind) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    match kind {
        EntryKind::Dir => spec.set_fg(Some(Color::Blue)).set_bold(true),
        EntryKind::Symlink => spec.set_fg(Some(Color::Cyan)),
        EntryKind::Fifo | EntryKind::Socket => spec.set_fg(Some(Color::Magenta)),
        EntryKind::BlockDevice | EntryKind::CharDevice => {
            spec.set_fg(Some(Color::Yellow)).set_bold(true)
        }
        EntryKind::File | EntryKind::Unknown => return None,
    };
    Some(spec)
}

/// Line-oriented text output. Implements `StreamingOutput` for use with
/// `BreadthFirstWalker`.
pub struct StreamingFormatter<W: WriteColor> {
    options: DisplayOptions,
    names: Box<dyn NameLookup>,
    out: W,
}

impl StreamingFormatter<BufferedStandardStream> {
    /// Formatter writing to stdout with system name lookup.
    pub fn stdout(options: DisplayOptions, config: OutputConfig) -> Self {
        Self::new(
            options,
            Box::new(SystemNames::new()),
            BufferedStandardStream::stdout(config.color_choice()),
        )
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn new(options: DisplayOptions, names: Box<dyn NameLookup>, out: W) -> Self {
        Self {
            options,
            names,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, fields: &str, path: &Path, kind: EntryKind) -> std::io::Result<()> {
        write!(self.out, "{}", fields)?;
        // Raw bytes: a name that is not UTF-8 must still print as itself
        let raw = path.as_os_str().as_bytes();
        match path_color(kind) {
            Some(spec) => {
                self.out.set_color(&spec)?;
                self.out.write_all(raw)?;
                self.out.reset()?;
            }
            None => self.out.write_all(raw)?,
        }
        writeln!(self.out)
    }
}

impl<W: WriteColor> StreamingOutput for StreamingFormatter<W> {
    fn output_entry(&mut self, path: &Path, entry: &EntryDescriptor) -> Result<()> {
        let fields = format_fields(entry, &self.options, self.names.as_ref())?;
        self.write_line(&fields, path, entry.kind)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
