//! Write-behind key-value gateway with a single writer thread.
//!
//! # Responsibility
//! - Make `set`/`remove` fire-and-forget for UI-facing callers.
//! - Apply queued writes to the wrapped gateway strictly in enqueue order.
//!
//! # Invariants
//! - Exactly one worker writes to the wrapped gateway, so a later snapshot
//!   can never be overtaken by an earlier one.
//! - `get` waits for pending writes first and never observes a stale value.
//! - Dropping the queue drains pending writes before the worker exits.

use super::kv_repo::{KeyValueStore, StorageError, StorageResult};
use log::{error, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

const WRITER_THREAD_NAME: &str = "gameforge-kv-writer";

enum WriteCommand {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(Sender<()>),
}

/// Fire-and-forget wrapper around another [`KeyValueStore`].
pub struct QueuedKeyValueStore<S: KeyValueStore + Send + Sync + 'static> {
    inner: Arc<S>,
    sender: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
    last_error: Arc<Mutex<Option<StorageError>>>,
}

impl<S: KeyValueStore + Send + Sync + 'static> QueuedKeyValueStore<S> {
    /// Starts the writer thread for `inner`.
    pub fn new(inner: S) -> StorageResult<Self> {
        let inner = Arc::new(inner);
        let last_error = Arc::new(Mutex::new(None));
        let (sender, receiver) = mpsc::channel();

        let worker_inner = Arc::clone(&inner);
        let worker_errors = Arc::clone(&last_error);
        let worker = thread::Builder::new()
            .name(WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(worker_inner, receiver, worker_errors))
            .map_err(|err| {
                error!(
                    "event=kv_writer_start module=repo status=error error={}",
                    err
                );
                StorageError::Unavailable(format!("failed to start writer thread: {err}"))
            })?;

        Ok(Self {
            inner,
            sender: Some(sender),
            worker: Some(worker),
            last_error,
        })
    }

    /// Blocks until every write enqueued before this call has been applied.
    pub fn flush(&self) -> StorageResult<()> {
        let (done_tx, done_rx) = mpsc::channel();
        self.send(WriteCommand::Flush(done_tx))?;
        done_rx.recv().map_err(|_| StorageError::WorkerStopped)
    }

    /// Returns and clears the most recent background write failure.
    pub fn take_last_error(&self) -> Option<StorageError> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    /// Wrapped gateway. Reads through it skip the pending-write barrier.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn send(&self, command: WriteCommand) -> StorageResult<()> {
        self.sender
            .as_ref()
            .ok_or(StorageError::WorkerStopped)?
            .send(command)
            .map_err(|_| StorageError::WorkerStopped)
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> KeyValueStore for QueuedKeyValueStore<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.flush()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.send(WriteCommand::Set {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.send(WriteCommand::Remove {
            key: key.to_string(),
        })
    }
}

impl<S: KeyValueStore + Send + Sync + 'static> Drop for QueuedKeyValueStore<S> {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop after the backlog drains.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=kv_writer_stop module=repo status=error error_code=worker_panicked");
            }
        }
    }
}

fn run_writer<S: KeyValueStore>(
    inner: Arc<S>,
    receiver: Receiver<WriteCommand>,
    last_error: Arc<Mutex<Option<StorageError>>>,
) {
    for command in receiver {
        let (op, result) = match command {
            WriteCommand::Set { key, value } => ("set", inner.set(&key, &value)),
            WriteCommand::Remove { key } => ("remove", inner.remove(&key)),
            WriteCommand::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };

        if let Err(err) = result {
            warn!(
                "event=kv_write module=repo status=error op={} error={}",
                op, err
            );
            *last_error
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueuedKeyValueStore;
    use crate::repo::kv_repo::{KeyValueStore, StorageError, StorageResult};
    use crate::repo::memory_kv::MemoryKeyValueStore;

    struct RejectingStore;

    impl KeyValueStore for RejectingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn writes_apply_in_enqueue_order() {
        let queue = QueuedKeyValueStore::new(MemoryKeyValueStore::new()).unwrap();
        for index in 0..100 {
            queue.set("snapshot", &index.to_string()).unwrap();
        }
        assert_eq!(queue.get("snapshot").unwrap().as_deref(), Some("99"));
    }

    #[test]
    fn remove_is_queued_after_set() {
        let queue = QueuedKeyValueStore::new(MemoryKeyValueStore::new()).unwrap();
        queue.set("k", "v").unwrap();
        queue.remove("k").unwrap();
        queue.flush().unwrap();
        assert_eq!(queue.inner().get("k").unwrap(), None);
    }

    #[test]
    fn background_failures_are_recorded_not_returned() {
        let queue = QueuedKeyValueStore::new(RejectingStore).unwrap();
        queue.set("k", "v").expect("enqueue never fails while worker runs");
        queue.flush().unwrap();

        let err = queue.take_last_error().expect("failure should be recorded");
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(queue.take_last_error().is_none());
    }
}
