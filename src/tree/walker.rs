//! BreadthFirstWalker - level-order traversal driven by a FIFO queue

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::entry::{EntryDescriptor, resolve};
use crate::error::{Error, Result};

use super::config::WalkerConfig;
use super::queue::TraversalQueue;
use super::streaming::StreamingOutput;

/// Counters collected over one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Entries handed to the output, root included
    pub entries: usize,
    /// Directories successfully opened and listed
    pub dirs_expanded: usize,
    /// Directories that could not be opened
    pub dirs_failed: usize,
    /// Recoverable errors reported
    pub errors: usize,
}

/// Result of expanding a single directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandOutcome {
    Expanded,
    Failed,
}

/// Names starting with '.' are skipped, which also covers "." and "..".
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// Whether a listed entry should be queued for expansion.
///
/// `via_link` is true when the directory entry itself is a symbolic link.
/// Such directories are only entered when links are followed.
pub fn should_descend(entry: &EntryDescriptor, via_link: bool, follow_symlinks: bool) -> bool {
    entry.is_dir() && (!via_link || follow_symlinks)
}

/// Walker that prints a directory tree one level at a time.
pub struct BreadthFirstWalker {
    config: WalkerConfig,
}

impl BreadthFirstWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Print `root`, then every entry below it in breadth-first order.
    ///
    /// Failing to resolve the root is returned as an error. Below the root,
    /// recoverable errors go to [`StreamingOutput::report_error`] and the
    /// walk continues; fatal ones stop it. `output.finish()` runs in both
    /// cases so that everything printed so far is flushed.
    pub fn walk<O: StreamingOutput>(&self, root: &Path, output: &mut O) -> Result<WalkSummary> {
        let result = Traversal::new(&self.config, output).run(root);
        let finished = output.finish();
        let summary = result?;
        finished?;
        Ok(summary)
    }
}

/// State for one run: the queue is seeded once and drained once.
struct Traversal<'a, O: StreamingOutput> {
    config: &'a WalkerConfig,
    output: &'a mut O,
    queue: TraversalQueue,
    visited: Option<HashSet<(u64, u64)>>,
    summary: WalkSummary,
}

impl<'a, O: StreamingOutput> Traversal<'a, O> {
    fn new(config: &'a WalkerConfig, output: &'a mut O) -> Self {
        Self {
            config,
            output,
            queue: TraversalQueue::new(),
            visited: config.cycle_guard.then(HashSet::new),
            summary: WalkSummary::default(),
        }
    }

    fn run(mut self, root: &Path) -> Result<WalkSummary> {
        let root_entry = resolve(root, self.config.follow_symlinks)?;
        self.output.output_entry(root, &root_entry)?;
        self.summary.entries += 1;

        self.first_visit(&root_entry);
        self.queue.enqueue(root.to_path_buf());

        while let Some(dir) = self.queue.dequeue() {
            if self.expand(&dir)? == ExpandOutcome::Failed {
                self.summary.dirs_failed += 1;
            }
        }

        Ok(self.summary)
    }

    /// List the immediate children of `dir` and queue the eligible ones.
    fn expand(&mut self, dir: &Path) -> Result<ExpandOutcome> {
        // Dropped on every return path, which closes the directory handle
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(source) => {
                self.report(Error::OpenDir {
                    path: dir.to_path_buf(),
                    source,
                });
                return Ok(ExpandOutcome::Failed);
            }
        };
        self.summary.dirs_expanded += 1;

        for dir_entry in entries {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(source) => {
                    self.report(Error::ReadEntry {
                        path: dir.to_path_buf(),
                        source,
                    });
                    continue;
                }
            };

            let name = dir_entry.file_name();
            if is_hidden(&name) {
                continue;
            }

            let path = dir.join(&name);
            let entry = match resolve(&path, self.config.follow_symlinks) {
                Ok(entry) => entry,
                Err(e) => {
                    self.report(e);
                    continue;
                }
            };

            self.output.output_entry(&path, &entry)?;
            self.summary.entries += 1;

            let via_link = dir_entry.file_type().is_ok_and(|t| t.is_symlink());
            if should_descend(&entry, via_link, self.config.follow_symlinks)
                && self.first_visit(&entry)
            {
                self.queue.enqueue(path);
            }
        }

        Ok(ExpandOutcome::Expanded)
    }

    /// Record `entry` as visited; false if the cycle guard has seen it.
    fn first_visit(&mut self, entry: &EntryDescriptor) -> bool {
        match self.visited.as_mut() {
            Some(seen) => seen.insert(entry.identity()),
            None => true,
        }
    }

    fn report(&mut self, error: Error) {
        self.summary.errors += 1;
        self.output.report_error(&error);
    }
}
