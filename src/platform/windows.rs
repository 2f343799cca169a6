use anyhow::Result;
use tracing::warn;

/// Rating prompts are not wired up on Windows yet; decline on the user's
/// behalf rather than failing the caller.
pub fn request_rating_prompt() -> Result<bool> {
    warn!("Rating prompts are not supported on Windows yet");
    Ok(false)
}
