use std::path::{Path, PathBuf};

/// Name of the per-user data directory under `$HOME`.
pub const DATA_DIR_NAME: &str = ".review-tabs";

/// Storage locations for one invocation.
///
/// Every component receives this explicitly instead of reaching for a global
/// path, so tests can point the whole program at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub ledger_file: PathBuf,
    pub log_file: PathBuf,
}

impl AppPaths {
    /// Lay out the standard files under `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            config_file: data_dir.join("config.json"),
            ledger_file: data_dir.join("notified.json"),
            log_file: data_dir.join("logs").join("review-tabs.log"),
        }
    }

    /// `~/.review-tabs/`, or `./.review-tabs/` when no home directory is known.
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME)
    }

    /// Paths rooted at `data_dir` when given, else at [`Self::default_data_dir`].
    pub fn resolve(data_dir: Option<&Path>) -> Self {
        match data_dir {
            Some(dir) => Self::in_dir(dir),
            None => Self::in_dir(&Self::default_data_dir()),
        }
    }

    /// Replace the log file location, keeping everything else.
    pub fn with_log_file(mut self, log_file: Option<&Path>) -> Self {
        if let Some(path) = log_file {
            self.log_file = path.to_path_buf();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_layout() {
        let paths = AppPaths::in_dir(Path::new("/tmp/rt"));
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/rt"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/rt/config.json"));
        assert_eq!(paths.ledger_file, PathBuf::from("/tmp/rt/notified.json"));
        assert_eq!(paths.log_file, PathBuf::from("/tmp/rt/logs/review-tabs.log"));
    }

    #[test]
    fn test_resolve_with_override() {
        let paths = AppPaths::resolve(Some(Path::new("/custom")));
        assert_eq!(paths.config_file, PathBuf::from("/custom/config.json"));
    }

    #[test]
    fn test_resolve_default_ends_with_data_dir_name() {
        let paths = AppPaths::resolve(None);
        assert!(paths.data_dir.ends_with(DATA_DIR_NAME));
    }

    #[test]
    fn test_with_log_file_override() {
        let paths = AppPaths::in_dir(Path::new("/tmp/rt"))
            .with_log_file(Some(Path::new("/var/log/tabs.log")));
        assert_eq!(paths.log_file, PathBuf::from("/var/log/tabs.log"));
        assert_eq!(paths.ledger_file, PathBuf::from("/tmp/rt/notified.json"));

        let unchanged = AppPaths::in_dir(Path::new("/tmp/rt")).with_log_file(None);
        assert_eq!(unchanged.log_file, PathBuf::from("/tmp/rt/logs/review-tabs.log"));
    }
}
