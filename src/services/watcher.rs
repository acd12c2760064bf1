use crate::config::constants::language_for_extension;
use crate::errors::{EnhancerError, EnhancerResult};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File-system events the watch pipeline cares about. Creation maps to the
/// debounce-bypassing path (editors that save via rename land here too);
/// plain modifications go through the quiet period.
#[derive(Debug)]
pub enum WatchEvent {
    Created(PathBuf),
    Modified(PathBuf),
}

/// Wires a notify watcher to a tokio channel. The returned watcher must stay
/// alive for events to keep flowing.
pub fn watch_path(
    path: &Path,
    sender: mpsc::UnboundedSender<WatchEvent>,
) -> EnhancerResult<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |result: Result<Event, notify::Error>| {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                log::warn!("⚠️ watch error: {}", e);
                return;
            }
        };

        let kind = match event.kind {
            EventKind::Create(_) => Some(true),
            EventKind::Modify(_) => Some(false),
            _ => None,
        };
        let Some(created) = kind else {
            return;
        };

        for path in event.paths {
            if !is_watchable(&path) {
                continue;
            }
            let message = if created {
                WatchEvent::Created(path)
            } else {
                WatchEvent::Modified(path)
            };
            // Receiver gone means the watch loop is shutting down.
            let _ = sender.send(message);
        }
    })
    .map_err(|e| EnhancerError::system("creating file watcher", &e.to_string()))?;

    watcher
        .watch(path, RecursiveMode::Recursive)
        .map_err(|e| EnhancerError::system("watching path", &e.to_string()))?;

    Ok(watcher)
}

fn is_watchable(path: &Path) -> bool {
    path.extension()
        .map(|e| language_for_extension(&e.to_string_lossy()).is_some())
        .unwrap_or(false)
}
