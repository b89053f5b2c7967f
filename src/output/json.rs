//! JSON lines output
//!
//! One object per entry, written as soon as the entry is visited. Fields that
//! are not enabled are left out of the object.

use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use serde::Serialize;

use crate::entry::{EntryDescriptor, EntryKind};
use crate::error::Result;
use crate::format::{format_size, format_timestamp, group_name, owner_name, permission_string};
use crate::identity::{NameLookup, SystemNames};
use crate::options::DisplayOptions;
use crate::tree::StreamingOutput;

/// Serialized shape of one entry.
#[derive(Debug, Serialize)]
struct JsonEntry {
    path: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

/// Writes entries as newline-delimited JSON objects.
pub struct JsonFormatter<W: Write> {
    options: DisplayOptions,
    names: Box<dyn NameLookup>,
    out: W,
}

impl JsonFormatter<BufWriter<Stdout>> {
    pub fn stdout(options: DisplayOptions) -> Self {
        Self::new(
            options,
            Box::new(SystemNames::new()),
            BufWriter::new(io::stdout()),
        )
    }
}

impl<W: Write> JsonFormatter<W> {
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

    fn to_json(&self, path: &Path, entry: &EntryDescriptor) -> Result<JsonEntry> {
        let options = &self.options;
        let names = self.names.as_ref();

        let owner = if options.show_owner {
            Some(owner_name(entry.uid, options, names)?)
        } else {
            None
        };
        let group = if options.show_group {
            Some(group_name(entry.gid, options, names)?)
        } else {
            None
        };

        Ok(JsonEntry {
            // JSON strings are UTF-8; names that are not get replacement chars
            path: path.to_string_lossy().to_string(),
            kind: options.show_filetype.then_some(entry.kind),
            permissions: options
                .show_permissions
                .then(|| permission_string(entry.mode)),
            links: options.show_link_count.then_some(entry.nlink),
            owner,
            group,
            size_bytes: options.show_bytes.then_some(entry.size),
            size_human: options
                .show_bytes
                .then(|| format_size(entry.size).trim_start().to_string()),
            modified: options.show_mtime.then(|| format_timestamp(entry.mtime)),
        })
    }
}

impl<W: Write> StreamingOutput for JsonFormatter<W> {
    fn output_entry(&mut self, path: &Path, entry: &EntryDescriptor) -> Result<()> {
        let record = self.to_json(path, entry)?;
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
