//! Display options decided once at startup

/// Which metadata fields to print, and how entries are resolved.
///
/// Built from command-line flags before the traversal starts and only read
/// afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Resolve symbolic links to their targets (`-L`)
    pub follow_symlinks: bool,
    /// Size with unit suffix (`-s`)
    pub show_bytes: bool,
    /// Type glyph (`-t`)
    pub show_filetype: bool,
    /// `rwxrwxrwx` permission string (`-p`)
    pub show_permissions: bool,
    /// Hard link count (`-i`)
    pub show_link_count: bool,
    /// Owner name (`-u`)
    pub show_owner: bool,
    /// Group name (`-g`)
    pub show_group: bool,
    /// Modification date (`-d`)
    pub show_mtime: bool,
    /// Print raw ids instead of failing when a uid/gid has no name
    pub numeric_ids_fallback: bool,
}

impl DisplayOptions {
    /// Only the path is printed.
    pub fn path_only() -> Self {
        Self::default()
    }

    /// The `-l` field set: type, permissions, links, owner, group and size.
    pub fn long() -> Self {
        Self::default().with_long_fields()
    }

    /// Enable every field `-l` stands for, keeping the other flags as they are.
    pub fn with_long_fields(mut self) -> Self {
        self.show_filetype = true;
        self.show_permissions = true;
        self.show_link_count = true;
        self.show_owner = true;
        self.show_group = true;
        self.show_bytes = true;
        self
    }

    pub fn following_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Whether any field besides the path is enabled.
    pub fn has_fields(&self) -> bool {
        self.show_filetype
            || self.show_permissions
            || self.show_link_count
            || self.show_owner
            || self.show_group
            || self.show_bytes
            || self.show_mtime
    }
}
