//! Asynchronous comment sources.
//!
//! A `CommentSource` accepts fetch tickets and later yields their results.
//! The session controller never blocks on a fetch; it polls the source
//! from its own event loop and checks each result for staleness.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use super::{ingest, CommentProvider, TimeComment};

/// Identifies one fetch issued by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Video the comments were requested for
    pub video_id: String,
    /// Session generation at the time of the request
    pub generation: u64,
}

/// A completed fetch. Failures arrive as an empty comment list.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub ticket: FetchTicket,
    pub comments: Vec<TimeComment>,
}

/// Where the session controller sends fetch requests.
pub trait CommentSource {
    /// Start fetching comments for `ticket.video_id`.
    fn request(&mut self, ticket: FetchTicket);

    /// Return every fetch that has completed since the last poll.
    fn poll(&mut self) -> Vec<FetchResult>;
}

/// Runs a `CommentProvider` on a background thread.
///
/// Requests are served one at a time in the order they were made. The
/// worker validates the records before handing them back, and exits once
/// the source is dropped.
pub struct ThreadedSource {
    request_tx: Option<Sender<FetchTicket>>,
    result_rx: Receiver<FetchResult>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ThreadedSource {
    /// Spawn the worker thread for `provider`.
    pub fn spawn<P>(provider: P) -> Self
    where
        P: CommentProvider + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<FetchTicket>();
        let (result_tx, result_rx) = mpsc::channel::<FetchResult>();

        let handle = thread::spawn(move || {
            while let Ok(ticket) = request_rx.recv() {
                let comments = match provider.fetch(&ticket.video_id) {
                    Ok(raw) => ingest(raw),
                    Err(e) => {
                        tracing::warn!(
                            provider = provider.name(),
                            video_id = %ticket.video_id,
                            error = %e,
                            "comment fetch failed"
                        );
                        Vec::new()
                    }
                };
                // Session side may already be gone
                if result_tx.send(FetchResult { ticket, comments }).is_err() {
                    break;
                }
            }
        });

        Self {
            request_tx: Some(request_tx),
            result_rx,
            handle: Some(handle),
        }
    }

    /// Block up to `timeout` for the next completed fetch.
    pub fn wait(&mut self, timeout: Duration) -> Option<FetchResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }
}

impl CommentSource for ThreadedSource {
    fn request(&mut self, ticket: FetchTicket) {
        let sent = self
            .request_tx
            .as_ref()
            .map(|tx| tx.send(ticket).is_ok())
            .unwrap_or(false);
        if !sent {
            tracing::warn!("comment fetch worker is gone; request dropped");
        }
    }

    fn poll(&mut self) -> Vec<FetchResult> {
        self.result_rx.try_iter().collect()
    }
}

impl Drop for ThreadedSource {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
