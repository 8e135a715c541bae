use tabs_core::settings::DEFAULT_BROWSER;

use crate::error::CommandError;
use crate::process;

/// Opens a URL as a browser tab.
#[allow(async_fn_in_trait)]
pub trait TabLauncher {
    async fn open(&self, url: &str) -> Result<(), CommandError>;
}

/// [`TabLauncher`] that runs `open -a <browser> <url>`.
///
/// In dry-run mode nothing is executed; the URL is logged and the open is
/// reported as successful.
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
    program: String,
    browser: String,
    dry_run: bool,
}

impl BrowserLauncher {
    pub fn new(browser: impl Into<String>, dry_run: bool) -> Self {
        Self::with_program("open", browser, dry_run)
    }

    /// Same as [`BrowserLauncher::new`] with an explicit launcher executable.
    pub fn with_program(
        program: impl Into<String>,
        browser: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            program: program.into(),
            browser: browser.into(),
            dry_run,
        }
    }
}

impl Default for BrowserLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_BROWSER, false)
    }
}

impl TabLauncher for BrowserLauncher {
    async fn open(&self, url: &str) -> Result<(), CommandError> {
        if self.dry_run {
            tracing::info!("[DRY RUN] Would open: {}", url);
            return Ok(());
        }

        process::run(&self.program, ["-a", self.browser.as_str(), url], None).await?;
        tracing::debug!(browser = %self.browser, url, "tab opened");
        Ok(())
    }
}
