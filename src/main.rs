//! CLI entry point for bftree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use bftree::error::report;
use bftree::{
    BreadthFirstWalker, DisplayOptions, Error, JsonFormatter, OutputConfig, StreamingFormatter,
    WalkerConfig, resolve_root,
};
use clap::{Parser, ValueEnum};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bftree")]
#[command(about = "List a directory tree breadth-first, with ls-style metadata")]
#[command(override_usage = "bftree [-h] [-L -d -g -i -p -s -t -u | -l] [dirname]")]
#[command(version)]
struct Args {
    /// Directory to list (defaults to the current directory)
    dirname: Option<PathBuf>,

    /// Follow symbolic links
    #[arg(short = 'L', long = "follow")]
    follow: bool,

    /// Show the time of last modification
    #[arg(short = 'd', long = "date")]
    date: bool,

    /// Show the file type
    #[arg(short = 't', long = "type")]
    file_type: bool,

    /// Show permission bits
    #[arg(short = 'p', long = "permissions")]
    permissions: bool,

    /// Show the number of hard links
    #[arg(short = 'i', long = "links")]
    links: bool,

    /// Show the owner name
    #[arg(short = 'u', long = "owner")]
    owner: bool,

    /// Show the group name
    #[arg(short = 'g', long = "group")]
    group: bool,

    /// Show the file size
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Same as -tpiugs
    #[arg(short = 'l', long = "long")]
    long: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Print one JSON object per entry instead of text lines
    #[arg(long = "json")]
    json: bool,

    /// Do not descend into a directory that was already queued
    /// (guards against symlink loops with -L)
    #[arg(long = "cycle-guard")]
    cycle_guard: bool,

    /// Print numeric ids for owners/groups with no name instead of failing
    #[arg(long = "numeric-ids-fallback")]
    numeric_ids_fallback: bool,
}

impl Args {
    fn display_options(&self) -> DisplayOptions {
        let options = DisplayOptions {
            follow_symlinks: self.follow,
            show_bytes: self.size,
            show_filetype: self.file_type,
            show_permissions: self.permissions,
            show_link_count: self.links,
            show_owner: self.owner,
            show_group: self.group,
            show_mtime: self.date,
            numeric_ids_fallback: self.numeric_ids_fallback,
        };
        if self.long {
            options.with_long_fields()
        } else {
            options
        }
    }
}

fn fail(error: &Error) -> ! {
    report(error);
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    let options = args.display_options();

    let root = resolve_root(args.dirname.as_deref(), options.follow_symlinks)
        .unwrap_or_else(|e| fail(&e));

    let walker = BreadthFirstWalker::new(
        WalkerConfig::from_options(&options).with_cycle_guard(args.cycle_guard),
    );

    let result = if args.json {
        let mut formatter = JsonFormatter::stdout(options);
        walker.walk(&root, &mut formatter)
    } else {
        let output_config = OutputConfig {
            use_color: should_use_color(args.color),
        };
        let mut formatter = StreamingFormatter::stdout(options, output_config);
        walker.walk(&root, &mut formatter)
    };

    if let Err(e) = result {
        fail(&e);
    }
}
