//! bftree - list a directory tree breadth-first with ls-style metadata

pub mod entry;
pub mod error;
pub mod format;
pub mod identity;
pub mod options;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use entry::{EntryDescriptor, EntryKind, resolve, resolve_root};
pub use error::{Error, Result};
pub use format::{format_entry, format_fields, format_size, format_timestamp, permission_string};
pub use identity::{NameLookup, SystemNames};
pub use options::DisplayOptions;
pub use output::{JsonFormatter, OutputConfig, StreamingFormatter};
pub use tree::{BreadthFirstWalker, StreamingOutput, TraversalQueue, WalkSummary, WalkerConfig};
