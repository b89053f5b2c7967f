//! Configuration for the breadth-first walker

use crate::options::DisplayOptions;

/// Configuration for traversal behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Resolve entries through symbolic links and descend into linked
    /// directories
    pub follow_symlinks: bool,
    /// Never enqueue the same (device, inode) directory twice. Off by
    /// default, in which case a symlink cycle under `-L` is walked until the
    /// filesystem refuses the path.
    pub cycle_guard: bool,
}

impl WalkerConfig {
    pub fn from_options(options: &DisplayOptions) -> Self {
        Self {
            follow_symlinks: options.follow_symlinks,
            cycle_guard: false,
        }
    }

    pub fn with_cycle_guard(mut self, enabled: bool) -> Self {
        self.cycle_guard = enabled;
        self
    }
}
