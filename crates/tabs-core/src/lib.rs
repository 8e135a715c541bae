//! Core types for review-tabs: the persisted configuration, the notification
//! ledger and its statistics, pull request records, storage paths and the
//! command-line settings.

pub mod config;
pub mod error;
pub mod ledger;
pub mod paths;
pub mod pull_request;
pub mod settings;
pub mod stats;
pub mod time_utils;

pub use error::{Result, TabsError};
