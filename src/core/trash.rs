//! Background trash operations
//!
//! Moving an item to the trash is slow and may block on the desktop
//! environment, so each item is handed to a small Tokio runtime and the phase
//! that submitted it does not wait. Results arrive later through a
//! [`TrashEvent`] callback.
//!
//! [`TrashQueue::settle`] blocks until every submitted item has resolved. Phase
//! completion never calls it; the CLI and the tests do.

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Recoverable deletion primitive
pub trait Trash: Send + Sync {
    /// Move one file or directory (recursively) to the trash
    fn move_to_trash(&self, path: &Path) -> Result<()>;
}

/// Outcome of one trash operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrashEvent {
    Moved(PathBuf),
    Failed { path: PathBuf, message: String },
}

pub type TrashCallback = Arc<dyn Fn(TrashEvent) + Send + Sync>;

/// Runs trash operations off the calling thread
pub struct TrashQueue {
    trash: Arc<dyn Trash>,
    pending: Mutex<Vec<JoinHandle<()>>>,
    runtime: tokio::runtime::Runtime,
}

impl TrashQueue {
    pub fn new(trash: Arc<dyn Trash>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(4)
            .thread_name("trash-worker")
            .build()?;

        Ok(Self {
            trash,
            pending: Mutex::new(Vec::new()),
            runtime,
        })
    }

    /// Schedule `path` for the trash and return immediately
    pub fn submit(&self, path: PathBuf, on_event: TrashCallback) {
        log::debug!("Queueing for trash: {}", path.display());
        let trash = Arc::clone(&self.trash);

        let handle = self.runtime.spawn_blocking(move || {
            let event = match trash.move_to_trash(&path) {
                Ok(()) => TrashEvent::Moved(path),
                Err(e) => TrashEvent::Failed {
                    path,
                    message: e.to_string(),
                },
            };
            on_event(event);
        });

        let mut pending = self.pending.lock();
        pending.retain(|handle| !handle.is_finished());
        pending.push(handle);
    }

    /// Number of submitted operations that have not finished yet
    pub fn pending(&self) -> usize {
        let mut pending = self.pending.lock();
        pending.retain(|handle| !handle.is_finished());
        pending.len()
    }

    /// Block until every submitted operation has resolved
    pub fn settle(&self) {
        loop {
            let handles: Vec<_> = std::mem::take(&mut *self.pending.lock());
            if handles.is_empty() {
                return;
            }

            self.runtime.block_on(async {
                for handle in handles {
                    if let Err(e) = handle.await {
                        log::error!("Trash task did not complete: {}", e);
                    }
                }
            });
        }
    }
}
