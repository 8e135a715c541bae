use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browser application used when `--browser` is not given.
pub const DEFAULT_BROWSER: &str = "Google Chrome";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Open pull requests awaiting your review as browser tabs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "review-tabs",
    about = "Open pull requests awaiting your review as browser tabs",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log the tabs that would be opened instead of opening them
    #[arg(long)]
    pub dry_run: bool,

    /// Browser application that receives the tabs
    #[arg(long, default_value = DEFAULT_BROWSER)]
    pub browser: String,

    /// Directory holding config.json, notified.json and logs/ (default: ~/.review-tabs)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file path (default: <data-dir>/logs/review-tabs.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Out-of-band commands that act on stored state and skip the review pass.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop opening tabs until `resume`
    Pause,
    /// Start opening tabs again
    Resume,
    /// Show whether runs are paused
    Status,
    /// Show how many PRs were surfaced and from which repositories
    Stats,
}

impl Settings {
    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
