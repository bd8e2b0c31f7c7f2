//! Page configuration file watcher.
//!
//! Forwards the raw document on every content change; parsing happens in
//! the [`ConfigStore`](crate::config::ConfigStore), so a broken edit keeps
//! the active configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Watches one page configuration file.
pub struct PageConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<String>,
}

impl PageConfigWatcher {
    /// Returns the watcher and the receiving end for raw documents.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Watching stops when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;
        let watched = path.clone();
        let mut forwarder = ChangeForwarder::new(path, update_tx);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| forwarder.handle(res),
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&watched, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %watched.display(), "Watching page configuration");
        Ok(watcher)
    }
}

/// Reads the file after each event and forwards content that changed.
struct ChangeForwarder {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<String>,
    last_sent: Option<String>,
}

impl ChangeForwarder {
    fn new(path: PathBuf, update_tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            path,
            update_tx,
            last_sent: None,
        }
    }

    fn handle(&mut self, res: notify::Result<Event>) {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "Page configuration watch failed");
                return;
            }
        };
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return;
        }

        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                self.forward(raw);
            }
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Page configuration unreadable, keeping active one"
            ),
        }
    }

    /// Editors often emit several events per save; identical content is sent once.
    fn forward(&mut self, raw: String) -> bool {
        if self.last_sent.as_deref() == Some(raw.as_str()) {
            return false;
        }
        tracing::debug!(
            path = %self.path.display(),
            bytes = raw.len(),
            "Page configuration changed"
        );
        if self.update_tx.send(raw.clone()).is_err() {
            return false;
        }
        self.last_sent = Some(raw);
        true
    }
}
