//! Development reload
//!
//! Opt-in watcher that restarts the server process when watched files
//! change, so `boxforge serve --dev-reload` picks up a rebuilt binary or
//! edited assets without a manual restart. On Unix the restart `exec`s the
//! current executable with the original arguments; elsewhere the process
//! exits and relies on an outer supervisor.

use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;

/// Quiet period after the first event; editors and builds touch files in
/// bursts.
const DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("cannot determine the running executable: {0}")]
    Executable(#[from] std::io::Error),
}

/// Watched when the configuration names nothing: the server binary itself
pub fn default_watch_paths() -> Result<Vec<PathBuf>, ReloadError> {
    Ok(vec![std::env::current_exe()?])
}

/// Start the reload watcher over `paths` on a background thread.
///
/// Returns once the watcher is installed; the thread owns it from there.
pub fn spawn_reload(paths: Vec<PathBuf>) -> Result<(), ReloadError> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(
        move |result: Result<Event, notify::Error>| match result {
            Ok(event) => {
                if is_mutation(&event.kind) {
                    let _ = tx.send(());
                }
            }
            Err(e) => tracing::warn!("watch error: {}", e),
        },
    )?;
    for path in &paths {
        watcher.watch(path, RecursiveMode::Recursive)?;
        tracing::info!(path = %path.display(), "watching for changes");
    }

    std::thread::spawn(move || {
        // the watcher must stay alive as long as the thread runs
        let _watcher = watcher;
        while rx.recv().is_ok() {
            std::thread::sleep(DEBOUNCE);
            while rx.try_recv().is_ok() {}
            tracing::info!("watched files changed, restarting");
            restart();
        }
    });
    Ok(())
}

fn is_mutation(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Replace the process with a fresh copy of itself
#[cfg(unix)]
fn restart() {
    use std::os::unix::process::CommandExt;

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            tracing::error!("restart failed, cannot find executable: {}", e);
            return;
        }
    };
    let args: Vec<String> = std::env::args().skip(1).collect();
    // exec only returns on failure
    let err = std::process::Command::new(exe).args(args).exec();
    tracing::error!("restart failed: {}", err);
}

#[cfg(not(unix))]
fn restart() {
    tracing::warn!("no exec on this platform, exiting for the supervisor to restart");
    std::process::exit(0);
}
