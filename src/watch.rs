use std::io::Write;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{EventKind, RecursiveMode, Watcher};

/// Call `render` now and again after every burst of changes to `snapshot`.
///
/// Watches the parent directory, so a file replaced by rename is seen too.
/// A render failure (e.g. a half-written file) is reported and the loop
/// keeps going.
pub fn run(snapshot: &Path, interval: u64, render: &dyn Fn() -> Result<()>) -> Result<()> {
    let interval = Duration::from_secs(interval);
    let snapshot = snapshot
        .canonicalize()
        .with_context(|| format!("Cannot watch {}", snapshot.display()))?;
    let dir = snapshot
        .parent()
        .context("Snapshot path has no parent directory")?
        .to_path_buf();
    let file_name = snapshot.file_name().map(|n| n.to_os_string());

    redraw(render)?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let touches_snapshot = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            match event.kind {
                EventKind::Create(_) | EventKind::Modify(_) if touches_snapshot => {
                    let _ = tx.send(());
                }
                _ => {}
            }
        }
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    tracing::debug!(path = %snapshot.display(), "watching snapshot");

    // Event loop with debounce
    while let Ok(()) = rx.recv() {
        let deadline = Instant::now() + interval;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match rx.recv_timeout(remaining) {
                Ok(()) => continue,
                Err(mpsc::RecvTimeoutError::Timeout) => break,
                Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }

        redraw(render)?;
    }

    Ok(())
}

fn redraw(render: &dyn Fn() -> Result<()>) -> Result<()> {
    // Clear screen and move cursor to top-left
    print!("\x1b[2J\x1b[H");
    std::io::stdout().flush()?;

    if let Err(e) = render() {
        eprintln!("petlovers: {e:#}");
    }
    Ok(())
}
