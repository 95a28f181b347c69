//! Replay a recorded raw event stream and print snapshots.

use std::path::PathBuf;
use std::time::Duration;

use motionflow_common::config::AppConfig;
use motionflow_common::error::PermissionCategory;
use motionflow_model::Snapshot;
use motionflow_platform_core::{PermissionAuthority, ScriptedPermissions};
use motionflow_tracker::backends::{ReplayScreen, ReplaySource};
use motionflow_tracker::SensorTracker;

use super::ScreenArgs;

pub async fn run(
    config: &AppConfig,
    path: PathBuf,
    screen: ScreenArgs,
    gated: bool,
    deny: Vec<PermissionCategory>,
) -> anyhow::Result<()> {
    let mut source = ReplaySource::open(&path)?;
    let screen = source.follow_screen(screen.to_screen(&config.screen));
    let poll_interval = Duration::from_millis(config.replay.poll_interval_ms);

    let tracker = SensorTracker::new(source, screen).with_poll_interval(poll_interval);
    let print = |snapshot: Snapshot| match snapshot.to_json_line() {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "Failed to serialize snapshot"),
    };

    let delivered = if gated || !deny.is_empty() {
        let permissions = deny
            .into_iter()
            .fold(ScriptedPermissions::granting(), ScriptedPermissions::deny);
        drive(tracker.with_permissions(permissions), print).await?
    } else {
        drive(tracker, print).await?
    };

    tracing::info!(path = %path.display(), snapshots = delivered, "Replay finished");
    Ok(())
}

/// Run one full init/listen/remove cycle over the recording.
async fn drive<P, F>(
    mut tracker: SensorTracker<ReplaySource, ReplayScreen, P>,
    emit: F,
) -> anyhow::Result<usize>
where
    P: PermissionAuthority,
    F: FnMut(Snapshot) + 'static,
{
    tracker
        .init()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize sensors: {e}"))?;

    tracker.listen(emit)?;
    let delivered = tracker.pump()?;
    tracker.remove_listeners();
    Ok(delivered)
}
