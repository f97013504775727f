//! Cooperative cancellation, built on `tokio::sync::watch`
//! rather than `tokio-util::CancellationToken` — that crate never appears in
//! this workspace's dependencies, and a `watch<bool>` gives the same "cheap to poll,
//! cheap to clone, wakes every holder" shape without adding a dependency.

use evidentia_crypto::pow::MiningCancellation;
use tokio::sync::watch;

/// The cancel-side handle. Dropping it without calling `cancel()` leaves
/// every outstanding `CancellationToken` reporting "not cancelled" forever,
/// same as an unfired `tokio_util` token.
#[derive(Debug)]
pub struct CancellationSource {
    tx: watch::Sender<bool>,
}

/// The check-side handle, cloned and handed to mining, validation, and
/// resolution loops. Cheap to clone; every clone observes the same flag.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    rx: watch::Receiver<bool>,
}

impl CancellationSource {
    pub fn new() -> (Self, CancellationToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancellationToken { rx })
    }

    /// Signal cancellation to every `CancellationToken` cloned from this
    /// source. Idempotent.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// A token that never cancels, for callers that do not need the
    /// cancellation path (tests, one-shot tools).
    pub fn never() -> Self {
        CancellationSource::new().1
    }
}

impl MiningCancellation for CancellationToken {
    fn keep_going(&self) -> bool {
        !self.is_cancelled()
    }
}
