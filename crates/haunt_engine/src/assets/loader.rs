//! Background asset loading
//!
//! [`spawn_load`] reads a file on its own thread and streams [`LoadEvent`]s
//! back over a channel. The owner drains them with [`PendingLoad::poll`]
//! between frames, so completion is never observed in the middle of one.
//! Loads cannot be cancelled and have no timeout.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::assets::{Asset, AssetError};

const CHUNK_SIZE: usize = 64 * 1024;

/// Progress and completion notifications for one load
#[derive(Debug)]
pub enum LoadEvent<T> {
    /// Bytes read so far
    Progress {
        /// Bytes read
        loaded: u64,
        /// File size when known
        total: Option<u64>,
    },
    /// The asset decoded successfully
    Loaded(T),
    /// The load failed; no further events follow
    Failed(AssetError),
}

/// Receiving end of an in-flight load
pub struct PendingLoad<T> {
    path: PathBuf,
    receiver: Receiver<LoadEvent<T>>,
    finished: bool,
}

impl<T> PendingLoad<T> {
    /// Create a pending load fed by the returned sender
    pub fn channel(path: impl Into<PathBuf>) -> (Sender<LoadEvent<T>>, Self) {
        let (sender, receiver) = mpsc::channel();
        let pending = Self {
            path: path.into(),
            receiver,
            finished: false,
        };
        (sender, pending)
    }

    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a terminal event has been delivered
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drain every event that has arrived, without blocking
    ///
    /// If the loading side disappears without a terminal event, a
    /// [`LoadEvent::Failed`] is synthesized. Nothing is returned after the
    /// terminal event.
    pub fn poll(&mut self) -> Vec<LoadEvent<T>> {
        let mut events = Vec::new();
        while !self.finished {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.finished = matches!(event, LoadEvent::Loaded(_) | LoadEvent::Failed(_));
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.finished = true;
                    events.push(LoadEvent::Failed(AssetError::LoadFailed(format!(
                        "Loader for {} stopped without a result",
                        self.path.display()
                    ))));
                }
            }
        }
        events
    }
}

/// Start loading `path` on a background thread
pub fn spawn_load<T: Asset>(path: impl Into<PathBuf>) -> PendingLoad<T> {
    let (sender, pending) = PendingLoad::channel(path);
    let path = pending.path.clone();

    let spawned = thread::Builder::new()
        .name(format!("load:{}", path.display()))
        .spawn({
            let sender = sender.clone();
            move || {
                let event = match read_with_progress(&path, &sender) {
                    Ok(bytes) => match T::from_bytes(&bytes) {
                        Ok(asset) => LoadEvent::Loaded(asset),
                        Err(e) => LoadEvent::Failed(e),
                    },
                    Err(e) => LoadEvent::Failed(e),
                };
                // The receiver may already be gone; nobody is left to tell.
                let _ = sender.send(event);
            }
        });

    if let Err(e) = spawned {
        log::error!("Could not start loader thread: {}", e);
        let _ = sender.send(LoadEvent::Failed(AssetError::IoError(e)));
    }

    pending
}

fn read_with_progress<T>(path: &Path, sender: &Sender<LoadEvent<T>>) -> Result<Vec<u8>, AssetError> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
        _ => AssetError::IoError(e),
    })?;
    let total = file.metadata().ok().map(|m| m.len());

    let mut bytes = Vec::with_capacity(total.unwrap_or(0) as usize);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        let _ = sender.send(LoadEvent::Progress { loaded: bytes.len() as u64, total });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct Blob(Vec<u8>);

    impl Asset for Blob {
        fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
            if bytes.is_empty() {
                return Err(AssetError::InvalidData("empty".to_string()));
            }
            Ok(Blob(bytes.to_vec()))
        }
    }

    fn wait_for_terminal<T>(pending: &mut PendingLoad<T>) -> Vec<LoadEvent<T>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while !pending.is_finished() && Instant::now() < deadline {
            events.extend(pending.poll());
            thread::sleep(Duration::from_millis(1));
        }
        events
    }

    #[test]
    fn test_manual_channel_delivers_in_order() {
        let (sender, mut pending) = PendingLoad::<u32>::channel("clip.ogg");
        assert!(pending.poll().is_empty());

        sender.send(LoadEvent::Progress { loaded: 10, total: Some(20) }).unwrap();
        sender.send(LoadEvent::Loaded(7)).unwrap();
        let events = pending.poll();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], LoadEvent::Loaded(7)));
        assert!(pending.is_finished());
        assert!(pending.poll().is_empty());
    }

    #[test]
    fn test_dropped_sender_reports_failure() {
        let (sender, mut pending) = PendingLoad::<u32>::channel("clip.ogg");
        drop(sender);
        let events = pending.poll();
        assert!(matches!(events.as_slice(), [LoadEvent::Failed(_)]));
    }

    #[test]
    fn test_missing_file_fails_in_background() {
        let mut pending = spawn_load::<Blob>("no/such/file.bin");
        let events = wait_for_terminal(&mut pending);
        assert!(matches!(events.last(), Some(LoadEvent::Failed(AssetError::NotFound(_)))));
    }

    #[test]
    fn test_existing_file_loads_with_progress() {
        let path = std::env::temp_dir().join("haunt_engine_loader_test.bin");
        std::fs::write(&path, vec![1u8; 1000]).unwrap();

        let mut pending = spawn_load::<Blob>(path.clone());
        let events = wait_for_terminal(&mut pending);
        assert!(events.iter().any(|e| matches!(e, LoadEvent::Progress { loaded: 1000, total: Some(1000) })));
        match events.last() {
            Some(LoadEvent::Loaded(blob)) => assert_eq!(blob.0.len(), 1000),
            other => panic!("unexpected terminal event: {:?}", other.map(|_| ())),
        }

        std::fs::remove_file(&path).unwrap();
    }
}
