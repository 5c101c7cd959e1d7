//! Export worker
//!
//! PNG encoding and file writes run on a dedicated thread so the UI loop
//! never blocks on disk. A single thread keeps exports in request order.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::export::{save_surface, FileSink};
use crate::render::RasterSurface;

/// Messages sent from main thread to the worker
#[derive(Debug)]
pub enum WorkerMessage {
    /// Encode `surface` and save it as `file_name`
    Export {
        surface: RasterSurface,
        file_name: String,
    },
    /// Shutdown signal
    Shutdown,
}

/// Responses sent from the worker to main thread
#[derive(Debug)]
pub enum WorkerResponse {
    ExportComplete { path: PathBuf, write_time: u64 },
    Error(String),
}

/// Handle to the worker thread and its channels
pub struct WorkerHandle {
    pub request_tx: Sender<WorkerMessage>,
    pub response_rx: Receiver<WorkerResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Stop the worker after it drains queued jobs
    pub fn shutdown(mut self) {
        let _ = self.request_tx.send(WorkerMessage::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Spawn the export worker writing through `sink`
pub fn spawn_worker(sink: Box<dyn FileSink>) -> std::io::Result<WorkerHandle> {
    let (request_tx, request_rx) = unbounded::<WorkerMessage>();
    let (response_tx, response_rx) = unbounded::<WorkerResponse>();

    let thread = thread::Builder::new()
        .name("export-worker".to_string())
        .spawn(move || worker_loop(sink, request_rx, response_tx))?;

    Ok(WorkerHandle {
        request_tx,
        response_rx,
        thread: Some(thread),
    })
}

/// Main worker loop - processes messages until shutdown
fn worker_loop(
    mut sink: Box<dyn FileSink>,
    rx: Receiver<WorkerMessage>,
    tx: Sender<WorkerResponse>,
) {
    while let Ok(msg) = rx.recv() {
        match msg {
            WorkerMessage::Shutdown => break,

            WorkerMessage::Export { surface, file_name } => {
                let start = Instant::now();

                let response = match save_surface(sink.as_mut(), &surface, &file_name) {
                    Ok(path) => {
                        log::info!("exported {}", path.display());
                        WorkerResponse::ExportComplete {
                            path,
                            write_time: start.elapsed().as_millis() as u64,
                        }
                    }
                    Err(e) => {
                        log::warn!("export of {} failed: {}", file_name, e);
                        WorkerResponse::Error(e.to_string())
                    }
                };

                let _ = tx.send(response);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{DirectorySink, ExportError};
    use crate::render::render;
    use crate::settings::Settings;
    use std::time::Duration;

    struct FailingSink;

    impl FileSink for FailingSink {
        fn save(&mut self, file_name: &str, _bytes: &[u8]) -> Result<PathBuf, ExportError> {
            Err(ExportError::Write {
                path: PathBuf::from(file_name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn test_spawn_and_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let workers = spawn_worker(Box::new(DirectorySink::new(tmp.path()))).unwrap();
        workers.shutdown();
    }

    #[test]
    fn test_export_request() {
        let tmp = tempfile::tempdir().unwrap();
        let workers = spawn_worker(Box::new(DirectorySink::new(tmp.path()))).unwrap();
        let surface = render("worker", &Settings::default()).unwrap().unwrap();

        workers
            .request_tx
            .send(WorkerMessage::Export {
                surface,
                file_name: "mr-qr-42.png".to_string(),
            })
            .unwrap();

        let response = workers
            .response_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap();

        match response {
            WorkerResponse::ExportComplete { path, .. } => {
                assert_eq!(path, tmp.path().join("mr-qr-42.png"));
                let decoded = image::open(&path).unwrap();
                assert_eq!(decoded.width(), 256);
            }
            WorkerResponse::Error(e) => panic!("Unexpected error: {}", e),
        }

        workers.shutdown();
    }

    #[test]
    fn test_export_failure_reported() {
        let workers = spawn_worker(Box::new(FailingSink)).unwrap();
        let surface = render("worker", &Settings::default()).unwrap().unwrap();

        workers
            .request_tx
            .send(WorkerMessage::Export {
                surface,
                file_name: "mr-qr-1.png".to_string(),
            })
            .unwrap();

        let response = workers
            .response_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(response, WorkerResponse::Error(ref e) if e.contains("denied")));

        workers.shutdown();
    }
}
