use anyhow::Result;
use std::process::Command;

/// Ask the user to rate the app using whatever dialog tool is installed.
///
/// Tries tools in order of preference; the first one that actually runs
/// decides the answer. A missing binary moves on to the next candidate, a
/// "no" from the user does not.
pub fn request_rating_prompt() -> Result<bool> {
    const MESSAGE: &str = "Enjoying Fitlock? A rating helps other people find it.";

    // 1. zenity (GNOME and friends)
    if let Ok(answer) = try_question(
        "zenity",
        &["--question", "--title", "Rate Fitlock", "--text", MESSAGE],
    ) {
        return Ok(answer);
    }

    // 2. kdialog (KDE)
    if let Ok(answer) = try_question("kdialog", &["--title", "Rate Fitlock", "--yesno", MESSAGE]) {
        return Ok(answer);
    }

    // 3. xmessage (bare X fallback)
    if let Ok(answer) = try_question(
        "xmessage",
        &["-buttons", "Rate:0,Not now:1", "-center", MESSAGE],
    ) {
        return Ok(answer);
    }

    anyhow::bail!("No supported dialog tool found on this Linux system")
}

/// Run a yes/no dialog command. Err means the tool could not be run at all;
/// Ok carries the user's answer (exit status zero means yes).
fn try_question(cmd: &str, args: &[&str]) -> Result<bool> {
    let output = Command::new(cmd).args(args).output()?;
    Ok(output.status.success())
}
