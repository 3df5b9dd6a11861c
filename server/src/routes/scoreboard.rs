//! WebSocket push channel. Every connection is a subscriber of the fanout.

use {
    crate::state::{
        command::Command,
        fanout::{DeliveryFailure, Subscription},
    },
    axum::{
        extract::{
            State,
            ws::{Message, WebSocket, WebSocketUpgrade},
        },
        response::Response,
    },
    tokio::sync::{mpsc, oneshot},
};

pub async fn action(
    ws: WebSocketUpgrade,
    State(sender): State<mpsc::Sender<Command>>,
) -> Response {
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = serve_subscriber(socket, sender).await {
            tracing::warn!("Subscriber dropped: {e:?}");
        }
    })
}

async fn serve_subscriber(
    mut socket: WebSocket,
    sender: mpsc::Sender<Command>,
) -> anyhow::Result<()> {
    let (tx, rx) = oneshot::channel();
    sender.send(Command::Subscribe { response: tx }).await?;
    let subscription = rx.await?;
    tracing::info!("Display subscribed");

    match forward(&mut socket, subscription).await {
        Ok(()) => tracing::info!("Display disconnected"),
        Err(failure) => tracing::warn!("{failure}"),
    }
    Ok(())
}

async fn forward(
    socket: &mut WebSocket,
    mut subscription: Subscription,
) -> Result<(), DeliveryFailure> {
    loop {
        tokio::select! {
            snapshot = subscription.next() => {
                let Some(snapshot) = snapshot else {
                    return Ok(());
                };
                socket
                    .send(Message::Text(snapshot.to_string().into()))
                    .await
                    .map_err(DeliveryFailure::Disconnected)?;
            }
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None => return Ok(()),
                Some(Err(e)) => return Err(DeliveryFailure::Disconnected(e)),
                // Displays only listen.
                Some(Ok(_)) => continue,
            },
        }
    }
}
