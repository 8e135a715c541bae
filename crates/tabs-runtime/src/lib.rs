//! Runtime layer for review-tabs.
//!
//! Adapters for the external collaborators (`gh`, `open`, `osascript`), the
//! single-pass run orchestrator and the out-of-band command dispatcher.

pub mod commands;
pub mod error;
pub mod notifier;
pub mod orchestrator;
pub mod pr_source;
mod process;
pub mod tab_launcher;
