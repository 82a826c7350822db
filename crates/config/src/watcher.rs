use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watches a config file for changes and sends a notification on every write.
///
/// The parent directory is watched rather than the file itself, so a config
/// file created later inside an existing directory (or replaced by an
/// editor's atomic rename) is still picked up. A directory that does not
/// exist at startup is not watched; the receiver then closes.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use sysmon_config::ConfigWatcher;
/// let (_, mut rx) = ConfigWatcher::spawn("/home/user/.config/sysmon/sysmon.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed, reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };

    if !dir.exists() {
        info!(
            "Config directory '{}' does not exist; live reload disabled",
            dir.display()
        );
        return;
    }

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) if touches(&e, &path) => {
                // Coalesce bursts: the channel holds one pending reload.
                if tx.try_send(()).is_err() && tx.is_closed() {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// Whether `event` is a write/create that concerns `path`.
fn touches(event: &notify::Event, path: &Path) -> bool {
    use notify::EventKind::*;
    matches!(event.kind, Modify(_) | Create(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == path.file_name())
}
