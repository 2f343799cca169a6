use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{debug, warn};

use fitlock::config::{self, AppConfig, EXAMPLE_CONFIG};
use fitlock::gate::{self, GateDecision};
use fitlock::platform;
use fitlock::state::{self, Snapshot};
use fitlock::unlock::{REASON_WORKOUT_COMPLETED, SessionPhase};

use crate::commands::utils::{format_duration, resolve_config_path};

/// Write an example configuration file
pub fn init(output: Option<PathBuf>, force: bool) -> Result<()> {
    let output_path = output.unwrap_or_else(|| {
        config::default_config_path().unwrap_or_else(|_| PathBuf::from("fitlock-config.yaml"))
    });

    // Check if file exists
    if output_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {}\nUse --force to overwrite",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        platform::common::ensure_directory_exists(parent)?;
    }

    // Write example config
    std::fs::write(&output_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", output_path.display()))?;

    println!("✓ Created configuration file: {}", output_path.display());
    println!("\nEdit this file to tune unlock lengths and the poll cadence.");
    println!("Then record your first workout: fitlock session grant");

    Ok(())
}

/// Show the shield gate decision and session state
pub fn status() -> Result<()> {
    let snapshot_path = state::default_snapshot_path()?;
    let snapshot = state::load_snapshot(&snapshot_path)?.unwrap_or_default();
    let tracker = snapshot.rehydrate();
    let now = Utc::now();

    println!("\n=== Fitlock Status ===\n");

    match gate::evaluate(&tracker, now) {
        GateDecision::Allow { remaining_seconds } => {
            println!(
                "Shield gate: OPEN ({} left)",
                format_duration(chrono::Duration::seconds(remaining_seconds))
            );
        }
        GateDecision::Block => {
            println!("Shield gate: BLOCKING");
        }
    }
    println!();

    match tracker.current_session() {
        Some(session) => {
            let phase = match tracker.phase(now) {
                SessionPhase::Active => "active",
                SessionPhase::Expired => "expired",
                SessionPhase::Empty => "none",
            };
            println!("Session:");
            println!("  Id:      {}", session.id());
            println!("  Reason:  {}", session.reason());
            println!(
                "  Started: {}",
                session.start_time().format("%Y-%m-%d %H:%M:%S %Z")
            );
            println!(
                "  Ends:    {}",
                session.end_time().format("%Y-%m-%d %H:%M:%S %Z")
            );
            println!("  State:   {}", phase);
        }
        None => {
            println!("No session recorded");
        }
    }

    println!();
    println!("Workouts completed: {}", snapshot.workouts_completed);

    Ok(())
}

/// Record a completed workout and start an unlock session
pub fn grant(
    config_path: Option<PathBuf>,
    minutes: Option<u32>,
    reason: Option<String>,
) -> Result<()> {
    let config = config::load_or_default(&resolve_config_path(config_path)?)?;

    let snapshot_path = state::default_snapshot_path()?;
    let mut snapshot = state::load_snapshot(&snapshot_path)?.unwrap_or_default();
    let mut tracker = snapshot.rehydrate();

    let now = Utc::now();
    let minutes = minutes.unwrap_or(config.unlock.default_unlock_minutes);
    let reason = reason.unwrap_or_else(|| REASON_WORKOUT_COMPLETED.to_string());

    // A new grant replaces whatever session was there before.
    tracker.record_unlock_start((minutes as i64) * 60, &reason, now);
    snapshot.workouts_completed += 1;
    snapshot.capture(&tracker);

    maybe_request_rating(&config, &mut snapshot, now);

    // Save state
    state::save_snapshot(&snapshot_path, &snapshot)?;

    let session = tracker
        .current_session()
        .context("Session missing after grant")?;
    println!("✓ Unlock session started: {} minutes ({})", minutes, reason);
    println!("  Ends at: {}", session.end_time().format("%H:%M:%S"));
    println!("  Workouts completed: {}", snapshot.workouts_completed);

    Ok(())
}

/// Add time to the current session
pub fn extend(config_path: Option<PathBuf>, minutes: Option<u32>) -> Result<()> {
    let config = config::load_or_default(&resolve_config_path(config_path)?)?;

    let snapshot_path = state::default_snapshot_path()?;
    let mut snapshot = state::load_snapshot(&snapshot_path)?.unwrap_or_default();
    let mut tracker = snapshot.rehydrate();

    if tracker.current_session().is_none() {
        println!("No session to extend. Record a workout first: fitlock session grant");
        return Ok(());
    }

    let now = Utc::now();
    let minutes = minutes.unwrap_or(config.unlock.extend_minutes);
    tracker.extend_session((minutes as i64) * 60, now);
    snapshot.capture(&tracker);

    // Save state
    state::save_snapshot(&snapshot_path, &snapshot)?;

    println!(
        "✓ Extended session by {} minutes ({} left)",
        minutes,
        format_duration(chrono::Duration::seconds(tracker.remaining_seconds(now)))
    );

    Ok(())
}

/// Drop the current session
pub fn clear() -> Result<()> {
    let snapshot_path = state::default_snapshot_path()?;
    let mut snapshot = state::load_snapshot(&snapshot_path)?.unwrap_or_default();
    let mut tracker = snapshot.rehydrate();

    tracker.clear_session();
    snapshot.capture(&tracker);

    // Save state
    state::save_snapshot(&snapshot_path, &snapshot)?;

    println!("✓ Session cleared. The shield is back in force.");

    Ok(())
}

/// Offer the rating prompt once the workout count crosses the threshold.
///
/// The prompt is shown at most once per device; any answer records it as
/// shown. A dialog failure only logs, so a display problem never loses the
/// session that was just granted.
fn maybe_request_rating(config: &AppConfig, snapshot: &mut Snapshot, now: DateTime<Utc>) {
    if !config.rating.enabled || snapshot.rating_prompted_at.is_some() {
        return;
    }
    if snapshot.workouts_completed < config.rating.prompt_after_workouts {
        return;
    }

    match platform::request_rating_prompt() {
        Ok(true) => {
            println!("  Thanks for rating Fitlock!");
            snapshot.rating_prompted_at = Some(now);
        }
        Ok(false) => {
            debug!("Rating prompt declined");
            snapshot.rating_prompted_at = Some(now);
        }
        Err(e) => {
            warn!("Could not show rating prompt: {:#}", e);
        }
    }
}
