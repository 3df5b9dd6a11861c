//! Pushes every new leaderboard snapshot to all connected displays.
//!
//! A snapshot is serialized once and shared with every subscriber through a
//! broadcast channel, so each subscriber receives the snapshots in the order
//! they were published. A subscriber that falls more than the channel
//! capacity behind skips the oldest snapshots; every snapshot is a full
//! replacement of the previous one, so it only ever misses stale state.

use {
    std::{fmt, sync::Arc},
    tokio::sync::broadcast::{self, error::RecvError},
};

pub struct Fanout {
    sender: broadcast::Sender<Arc<str>>,
    current: Option<Arc<str>>,
}

impl Fanout {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            current: None,
        }
    }

    pub fn publish(&mut self, snapshot: Arc<str>) {
        self.current = Some(Arc::clone(&snapshot));
        // An error only means nobody is connected right now.
        if let Ok(n) = self.sender.send(snapshot) {
            tracing::debug!("Published snapshot to {n} subscribers");
        }
    }

    /// The returned subscription starts with the latest snapshot, if any, and
    /// then yields every later publish.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            pending: self.current.clone(),
            receiver: self.sender.subscribe(),
        }
    }

    pub fn current(&self) -> Option<Arc<str>> {
        self.current.clone()
    }
}

#[derive(Debug)]
pub struct Subscription {
    pending: Option<Arc<str>>,
    receiver: broadcast::Receiver<Arc<str>>,
}

impl Subscription {
    /// Waits for the next snapshot to deliver. Returns `None` once the
    /// fanout is gone.
    pub async fn next(&mut self) -> Option<Arc<str>> {
        if let Some(snapshot) = self.pending.take() {
            return Some(snapshot);
        }
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("{}", DeliveryFailure::Lagged(skipped));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Why a snapshot did not reach one subscriber. Never affects the others.
#[derive(Debug)]
pub enum DeliveryFailure {
    Lagged(u64),
    Disconnected(axum::Error),
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lagged(skipped) => {
                write!(f, "Subscriber fell behind and skipped {skipped} snapshots")
            }
            Self::Disconnected(e) => write!(f, "Failed to deliver snapshot: {e}"),
        }
    }
}

impl std::error::Error for DeliveryFailure {}
