//! Output configuration types

use termcolor::ColorChoice;

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// `use_color` is decided up front from the terminal and environment,
    /// so it maps straight to `Always`.
    pub fn color_choice(&self) -> ColorChoice {
        if self.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_color: true }
    }
}
