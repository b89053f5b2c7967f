//! Test utilities: temporary directory trees and in-memory collaborators.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::entry::{EntryDescriptor, EntryKind};
use crate::error::{Error, Result};
use crate::identity::NameLookup;
use crate::tree::StreamingOutput;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an (empty) directory and its parents.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` pointing to `target`.
    ///
    /// `target` is stored as given, so relative targets resolve against the
    /// link's own directory.
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        if let Some(parent) = link_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        symlink(target, &link_path).expect("Failed to create symlink");
        link_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Name lookup backed by fixed tables; every other id is unknown.
#[derive(Debug, Default, Clone)]
pub struct FixedNames {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl FixedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, uid: u32, name: &str) -> Self {
        self.users.insert(uid, name.to_string());
        self
    }

    pub fn group(mut self, gid: u32, name: &str) -> Self {
        self.groups.insert(gid, name.to_string());
        self
    }
}

impl NameLookup for FixedNames {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.users.get(&uid).cloned()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.groups.get(&gid).cloned()
    }
}

/// Descriptor with fixed values: mode 755, one link, uid 1000, gid 100,
/// 2048 bytes.
pub fn sample_descriptor(kind: EntryKind) -> EntryDescriptor {
    EntryDescriptor {
        kind,
        mode: 0o755,
        nlink: 1,
        uid: 1000,
        gid: 100,
        size: 2048,
        mtime: 1_700_000_000,
        dev: 1,
        ino: 1,
    }
}

/// Output that records everything it is given.
#[derive(Debug, Default)]
pub struct CollectingOutput {
    pub paths: Vec<PathBuf>,
    pub entries: Vec<EntryDescriptor>,
    /// Messages of reported recoverable errors
    pub errors: Vec<String>,
    pub finished: bool,
    fail_after: Option<usize>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` entries, then fail every further one with a broken
    /// pipe, the way a closed stdout would.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }
}

impl StreamingOutput for CollectingOutput {
    fn output_entry(&mut self, path: &Path, entry: &EntryDescriptor) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.paths.len() >= n) {
            return Err(Error::Output(std::io::ErrorKind::BrokenPipe.into()));
        }
        self.paths.push(path.to_path_buf());
        self.entries.push(entry.clone());
        Ok(())
    }

    fn report_error(&mut self, error: &Error) {
        self.errors.push(error.to_string());
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
