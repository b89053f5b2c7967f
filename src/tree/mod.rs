//! Breadth-first directory traversal
//!
//! - `queue` - FIFO of directories waiting to be expanded
//! - `walker` - `BreadthFirstWalker`, the expander and driver
//! - `streaming` - `StreamingOutput`, the callback entries are emitted through
//! - `config` - traversal settings

mod config;
mod queue;
mod streaming;
mod walker;

pub use config::WalkerConfig;
pub use queue::TraversalQueue;
pub use streaming::StreamingOutput;
pub use walker::{BreadthFirstWalker, ExpandOutcome, WalkSummary, is_hidden, should_descend};
