//! Background persistence.
//!
//! Each [`Command`] issued by the UI runs as its own task on the tokio
//! runtime and reports back over an [`mpsc`] channel that the main loop
//! drains every tick.
//!
//! ## For contributors
//!
//! Commands are deliberately independent: there is no queue and no ordering
//! between two commands in flight.  Two saves of the same tag race and the
//! later-completing one wins.  If strict ordering is ever needed, funnel
//! commands through a single task reading from a channel instead of spawning
//! per command.

use std::sync::mpsc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::feed::FeedRecord;
use crate::repository::FeedRepository;

/// A persistence request from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save(FeedRecord),
    Remove(FeedRecord),
    ClearAll,
}

impl Command {
    fn describe(&self) -> String {
        match self {
            Command::Save(feed) => format!("save \"{}\"", feed.tag),
            Command::Remove(feed) => format!("remove \"{}\"", feed.tag),
            Command::ClearAll => "clear all feeds".to_string(),
        }
    }
}

/// Messages sent from worker tasks to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMsg {
    /// The command completed and is durable.
    Done(Command),
    /// The command failed with this error description.
    Failed(Command, String),
}

/// Handle the UI uses to fire off commands.
#[derive(Clone)]
pub struct Worker {
    runtime: Handle,
    repo: FeedRepository,
    tx: mpsc::Sender<WorkerMsg>,
}

/// Create a worker bound to `runtime`.
///
/// Returns the worker and the receiver that the main loop should drain on
/// every tick.
pub fn spawn(runtime: Handle, repo: FeedRepository) -> (Worker, mpsc::Receiver<WorkerMsg>) {
    let (tx, rx) = mpsc::channel();
    (Worker { runtime, repo, tx }, rx)
}

impl Worker {
    /// Run `command` in the background.  Returns immediately.
    ///
    /// The handle is only needed to wait for in-flight writes at shutdown.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let repo = self.repo.clone();
        let tx = self.tx.clone();

        self.runtime.spawn(async move {
            let result = match &command {
                Command::Save(feed) => repo.set_feed(feed).await,
                Command::Remove(feed) => repo.remove_feed(feed).await,
                Command::ClearAll => repo.clear_all_feeds().await,
            };

            let msg = match result {
                Ok(()) => {
                    info!(command = %command.describe(), "command completed");
                    WorkerMsg::Done(command)
                }
                Err(e) => {
                    warn!(command = %command.describe(), error = %e, "command failed");
                    WorkerMsg::Failed(command, e.to_string())
                }
            };
            // If the receiver is gone the UI has exited; nothing to report to.
            let _ = tx.send(msg);
        })
    }
}

impl WorkerMsg {
    /// One-line status text for the UI.
    pub fn status(&self) -> String {
        match self {
            WorkerMsg::Done(Command::Save(feed)) => format!("Saved \"{}\"", feed.tag),
            WorkerMsg::Done(Command::Remove(feed)) => format!("Removed \"{}\"", feed.tag),
            WorkerMsg::Done(Command::ClearAll) => "Cleared all feeds".to_string(),
            WorkerMsg::Failed(command, e) => format!("Could not {}: {e}", command.describe()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::store::{KeyValueStore, MemoryStore, StoreError, StoreResult};

    /// A store whose every operation fails.
    struct BrokenStore;

    fn broken() -> StoreError {
        StoreError::Io {
            path: "/unavailable".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
        }
    }

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn read(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(broken())
        }
        async fn write(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(broken())
        }
        async fn delete(&self, _key: &str) -> StoreResult<()> {
            Err(broken())
        }
        async fn read_all(&self) -> StoreResult<Vec<(String, String)>> {
            Err(broken())
        }
        async fn clear(&self) -> StoreResult<()> {
            Err(broken())
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn save_reports_done_and_persists() {
        let rt = runtime();
        let repo = FeedRepository::new(Arc::new(MemoryStore::new()));
        let (worker, rx) = spawn(rt.handle().clone(), repo.clone());

        let feed = FeedRecord::new("Tech", "cnn_tech.rss");
        worker.dispatch(Command::Save(feed.clone()));

        let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(msg, WorkerMsg::Done(Command::Save(feed)));
        assert_eq!(
            rt.block_on(repo.get_feed("Tech")).unwrap().as_deref(),
            Some("cnn_tech.rss")
        );
    }

    #[test]
    fn store_failure_is_reported() {
        let rt = runtime();
        let repo = FeedRepository::new(Arc::new(BrokenStore));
        let (worker, rx) = spawn(rt.handle().clone(), repo);

        worker.dispatch(Command::ClearAll);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerMsg::Failed(Command::ClearAll, e) => assert!(e.contains("disk gone")),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn status_text_names_the_tag() {
        let feed = FeedRecord::new("World", "cnn_world.rss");
        assert_eq!(
            WorkerMsg::Done(Command::Remove(feed.clone())).status(),
            "Removed \"World\""
        );
        assert_eq!(
            WorkerMsg::Failed(Command::Save(feed), "boom".into()).status(),
            "Could not save \"World\": boom"
        );
    }
}
