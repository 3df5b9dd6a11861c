//! Receives score datagrams from game clients and hands them to the state.

use {
    crate::state::command::Command,
    score_relay_core::telemetry,
    std::{io, net::SocketAddr, time::Duration},
    tokio::{net::UdpSocket, sync::mpsc, task::JoinHandle},
};

pub struct Listener {
    socket: UdpSocket,
    max_datagram_size: usize,
    sender: mpsc::Sender<Command>,
}

impl Listener {
    pub async fn bind(
        addr: &str,
        max_datagram_size: usize,
        sender: mpsc::Sender<Command>,
    ) -> io::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self {
            socket,
            max_datagram_size,
            sender,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            // `recv_from` truncates silently; the spare byte exposes oversized datagrams.
            let mut buffer = vec![0u8; self.max_datagram_size + 1];
            loop {
                let (len, addr) = match self.socket.recv_from(&mut buffer).await {
                    Ok(received) => received,
                    Err(e) => {
                        tracing::error!("Error receiving datagram: {e}");
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        continue;
                    }
                };
                if len > self.max_datagram_size {
                    tracing::warn!("Discarding oversized datagram from {addr}");
                    continue;
                }
                let Some(record) = telemetry::score_payload(&buffer[..len]) else {
                    tracing::debug!("Ignoring non-score datagram from {addr}");
                    continue;
                };
                let command = Command::Ingest {
                    origin: addr.ip(),
                    record: record.to_vec(),
                };
                if self.sender.send(command).await.is_err() {
                    tracing::error!("State task stopped, no longer accepting datagrams");
                    break;
                }
            }
        })
    }
}
