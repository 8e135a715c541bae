//! Persisted configuration record.
//!
//! Stored as a camelCase JSON object in `<data_dir>/config.json`. Reading never
//! fails: a missing or unparseable file yields [`Configuration::default`], and
//! any field absent from the file takes its default value.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TabsError};

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const DEFAULT_MAX_TABS_TO_OPEN: i64 = 5;
pub const DEFAULT_NOTIFIED_RETENTION_DAYS: i64 = 7;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Durable settings shared by every invocation.
///
/// Numeric fields are signed and unvalidated so that whatever the user wrote
/// survives a load/save cycle; consumers decide how to treat odd values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Upper bound on tabs opened in a single run.
    pub max_tabs_to_open: i64,
    /// When set, runs stop before touching the ledger or fetching PRs.
    pub paused: bool,
    /// Ask the PR source to leave out draft pull requests.
    pub exclude_draft: bool,
    /// Ledger entries older than this many days are pruned.
    pub notified_retention_days: i64,
    /// Show a desktop notification after tabs were opened.
    pub enable_notification: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_tabs_to_open: DEFAULT_MAX_TABS_TO_OPEN,
            paused: false,
            exclude_draft: true,
            notified_retention_days: DEFAULT_NOTIFIED_RETENTION_DAYS,
            enable_notification: true,
        }
    }
}

impl Configuration {
    /// Load the configuration from `path`.
    ///
    /// Returns `Default` when the file is absent or is not a JSON object.
    /// Otherwise each field is taken from the file when it has the right type
    /// and from the defaults when it is missing or mistyped.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(&content) else {
            return Self::default();
        };

        let mut config = Self::default();
        merge_field(&fields, "maxTabsToOpen", &mut config.max_tabs_to_open);
        merge_field(&fields, "paused", &mut config.paused);
        merge_field(&fields, "excludeDraft", &mut config.exclude_draft);
        merge_field(&fields, "notifiedRetentionDays", &mut config.notified_retention_days);
        merge_field(&fields, "enableNotification", &mut config.enable_notification);
        config
    }

    /// Atomically write the full record to `path`, creating parent
    /// directories if needed. Prior contents are replaced, not merged.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, &json)
    }

    /// Number of tabs a run may open; non-positive values open nothing.
    pub fn tab_budget(&self) -> usize {
        usize::try_from(self.max_tabs_to_open).unwrap_or(0)
    }
}

/// Overwrite `slot` with `fields[name]` if present and of the right type.
fn merge_field<T: DeserializeOwned>(fields: &Map<String, Value>, name: &str, slot: &mut T) {
    let Some(value) = fields.get(name) else {
        return;
    };
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(e) => tracing::warn!(field = name, error = %e, "ignoring invalid config value"),
    }
}

/// Write `contents` to a sibling temp file and rename it over `path`.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| TabsError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
