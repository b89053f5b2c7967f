//! Entry resolution: turning a path into the metadata we display

use std::fs;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// Kind of filesystem object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Socket,
    Fifo,
    BlockDevice,
    CharDevice,
    Unknown,
}

impl EntryKind {
    pub fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_socket() {
            EntryKind::Socket
        } else if file_type.is_fifo() {
            EntryKind::Fifo
        } else if file_type.is_block_device() {
            EntryKind::BlockDevice
        } else if file_type.is_char_device() {
            EntryKind::CharDevice
        } else {
            EntryKind::Unknown
        }
    }

    /// Single-character glyph shown in the type column.
    pub fn glyph(self) -> char {
        match self {
            EntryKind::File => '-',
            EntryKind::Dir => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::Socket => 's',
            EntryKind::Fifo => '|',
            EntryKind::BlockDevice => 'b',
            EntryKind::CharDevice => 'c',
            EntryKind::Unknown => '?',
        }
    }
}

/// Snapshot of an entry's metadata. Produced per lookup and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    pub kind: EntryKind,
    /// Raw `st_mode`; only the permission bits are rendered
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Modification time in seconds since the Unix epoch
    pub mtime: i64,
    pub dev: u64,
    pub ino: u64,
}

impl EntryDescriptor {
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        Self {
            kind: EntryKind::from_file_type(metadata.file_type()),
            mode: metadata.mode(),
            nlink: metadata.nlink(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
            mtime: metadata.mtime(),
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// `(device, inode)` pair identifying the underlying object.
    pub fn identity(&self) -> (u64, u64) {
        (self.dev, self.ino)
    }
}

/// Stat `path`, following symlinks only when `follow_symlinks` is set.
///
/// With links followed a dangling link is an error; without, the link itself
/// is described.
pub fn resolve(path: &Path, follow_symlinks: bool) -> Result<EntryDescriptor> {
    let metadata = if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };

    metadata
        .map(|m| EntryDescriptor::from_metadata(&m))
        .map_err(|source| Error::Resolve {
            path: path.to_path_buf(),
            source,
        })
}

/// Pick the traversal root and make sure it is a directory.
///
/// Without an explicit argument the current directory is used as-is. An
/// explicit argument is resolved under the same symlink policy as every
/// other entry, so a link to a directory is only accepted with `-L`.
pub fn resolve_root(arg: Option<&Path>, follow_symlinks: bool) -> Result<PathBuf> {
    let Some(path) = arg else {
        return std::env::current_dir().map_err(Error::CurrentDir);
    };

    let entry = resolve(path, follow_symlinks)?;
    if !entry.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}
