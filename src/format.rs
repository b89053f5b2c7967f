//! Rendering of entry metadata into text fields
//!
//! Every function here builds a fresh `String`; nothing is shared between
//! calls. Field order is fixed: type glyph, permissions, link count, owner,
//! group, size, modification date, then the path.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::entry::EntryDescriptor;
use crate::error::{Error, Result};
use crate::identity::NameLookup;
use crate::options::DisplayOptions;

/// Unit letters by number of 1024 divisions. The fifth slot is only reached
/// for sizes beyond the gibibyte range.
const SIZE_UNITS: [char; 5] = ['b', 'K', 'M', 'G', '?'];

const NAME_WIDTH: usize = 10;

/// Scale `bytes` down by 1024 while it exceeds 1024, at most four times.
pub fn scale_size(bytes: u64) -> (u64, char) {
    let mut value = bytes;
    let mut unit = 0;
    while value > 1024 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024;
        unit += 1;
    }
    (value, SIZE_UNITS[unit])
}

/// Size column: plain bytes right-justified to 6, scaled values to 5 plus
/// the unit letter.
pub fn format_size(bytes: u64) -> String {
    match scale_size(bytes) {
        (value, 'b') => format!("{:>6}", value),
        (value, unit) => format!("{:>5}{}", value, unit),
    }
}

/// `rwxrwxrwx` string for the owner/group/other bits of `mode`.
pub fn permission_string(mode: u32) -> String {
    const BITS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];

    BITS.iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

/// `Mon DD, YYYY` in the local time zone.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(&Local).format("%b %d, %Y").to_string(),
        None => secs.to_string(),
    }
}

pub(crate) fn owner_name(
    uid: u32,
    options: &DisplayOptions,
    names: &dyn NameLookup,
) -> Result<String> {
    match names.user_name(uid) {
        Some(name) => Ok(name),
        None if options.numeric_ids_fallback => Ok(uid.to_string()),
        None => Err(Error::UnknownUser(uid)),
    }
}

pub(crate) fn group_name(
    gid: u32,
    options: &DisplayOptions,
    names: &dyn NameLookup,
) -> Result<String> {
    match names.group_name(gid) {
        Some(name) => Ok(name),
        None if options.numeric_ids_fallback => Ok(gid.to_string()),
        None => Err(Error::UnknownGroup(gid)),
    }
}

/// Render every enabled field that precedes the path, each followed by a
/// separating space.
///
/// The type glyph sits directly against the permission string when both are
/// shown, as `ls -l` prints it.
pub fn format_fields(
    entry: &EntryDescriptor,
    options: &DisplayOptions,
    names: &dyn NameLookup,
) -> Result<String> {
    let mut line = String::new();

    if options.show_filetype {
        // ls -l convention: no space between the glyph and the permission string
        line.push(entry.kind.glyph());
        if !options.show_permissions {
            line.push(' ');
        }
    }

    if options.show_permissions {
        line.push_str(&permission_string(entry.mode));
        line.push(' ');
    }

    if options.show_link_count {
        line.push_str(&format!("{} ", entry.nlink));
    }

    if options.show_owner {
        let name = owner_name(entry.uid, options, names)?;
        line.push_str(&format!("{:<width$} ", name, width = NAME_WIDTH));
    }

    if options.show_group {
        let name = group_name(entry.gid, options, names)?;
        line.push_str(&format!("{:<width$} ", name, width = NAME_WIDTH));
    }

    if options.show_bytes {
        line.push_str(&format_size(entry.size));
        line.push(' ');
    }

    if options.show_mtime {
        line.push_str(&format_timestamp(entry.mtime));
        line.push(' ');
    }

    Ok(line)
}

/// Full output line for one entry, without the trailing newline.
///
/// For display only: a path that is not valid UTF-8 is rendered lossily.
/// `StreamingFormatter` writes the path bytes itself and only uses
/// `format_fields`.
pub fn format_entry(
    path: &Path,
    entry: &EntryDescriptor,
    options: &DisplayOptions,
    names: &dyn NameLookup,
) -> Result<String> {
    let mut line = format_fields(entry, options, names)?;
    line.push_str(&path.to_string_lossy());
    Ok(line)
}
