use anyhow::Result;
use chrono::Duration;
use std::path::PathBuf;

use fitlock::config;

/// Initialize logging
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

/// Resolve the config file path, honoring a --config override.
pub fn resolve_config_path(overridden: Option<PathBuf>) -> Result<PathBuf> {
    match overridden {
        Some(path) => Ok(path),
        None => config::default_config_path(),
    }
}

/// Format duration for display
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_buckets() {
        assert_eq!(format_duration(Duration::seconds(45)), "45s");
        assert_eq!(format_duration(Duration::seconds(90)), "1m");
        assert_eq!(format_duration(Duration::seconds(7200)), "2h");
        assert_eq!(format_duration(Duration::seconds(200_000)), "2d");
    }

    #[test]
    fn test_resolve_config_path_prefers_override() {
        let path = resolve_config_path(Some(PathBuf::from("/tmp/custom.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.yaml"));
    }
}
