use anyhow::{Context, Result};
use std::process::Command;

/// Ask the user to rate the app via an AppleScript dialog.
///
/// The "Not Now" button is wired as the cancel button, so osascript exits
/// non-zero when the user declines and zero when they accept.
pub fn request_rating_prompt() -> Result<bool> {
    let script = "display dialog \
        \"Enjoying Fitlock? A rating helps other people find it.\" \
        with title \"Rate Fitlock\" \
        buttons {\"Not Now\", \"Rate Fitlock\"} \
        default button \"Rate Fitlock\" \
        cancel button \"Not Now\"";

    let output = Command::new("osascript")
        .arg("-e")
        .arg(script)
        .output()
        .context("Failed to run osascript")?;

    Ok(output.status.success())
}
