use {
    crate::state::fanout::Subscription,
    std::{net::IpAddr, sync::Arc},
    tokio::sync::oneshot,
};

pub mod ingest;

/// Commands the app can send to the state
#[derive(Debug)]
pub enum Command {
    /// A score record, without its message tag, received from `origin`.
    Ingest { origin: IpAddr, record: Vec<u8> },
    Subscribe {
        response: oneshot::Sender<Subscription>,
    },
    CurrentSnapshot {
        response: oneshot::Sender<Option<Arc<str>>>,
    },
}
