use crate::error::CommandError;
use crate::process;

/// Sound played with every notification.
pub const NOTIFICATION_SOUND: &str = "Glass";

/// Shows a titled desktop notification.
#[allow(async_fn_in_trait)]
pub trait DesktopNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), CommandError>;
}

/// [`DesktopNotifier`] that asks `osascript` to `display notification`.
#[derive(Debug, Clone)]
pub struct OsascriptNotifier {
    program: String,
}

impl Default for OsascriptNotifier {
    fn default() -> Self {
        Self::with_program("osascript")
    }
}

impl OsascriptNotifier {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DesktopNotifier for OsascriptNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), CommandError> {
        let script = notification_script(title, message);
        process::run(&self.program, ["-e", script.as_str()], None).await?;
        Ok(())
    }
}

/// AppleScript source for a notification with sound.
pub fn notification_script(title: &str, message: &str) -> String {
    format!(
        "display notification \"{}\" with title \"{}\" sound name \"{}\"",
        escape_applescript(message),
        escape_applescript(title),
        NOTIFICATION_SOUND
    )
}

/// Escape `s` for use inside an AppleScript string literal.
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
