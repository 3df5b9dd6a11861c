use {
    crate::state::command::Command,
    axum::{
        extract::State,
        http::{StatusCode, header},
        response::{IntoResponse, Response},
    },
    std::sync::Arc,
    tokio::sync::{mpsc, oneshot},
};

/// The snapshot displays were last sent, or `204` before the first score.
pub async fn action(State(sender): State<mpsc::Sender<Command>>) -> Response {
    async fn inner_snapshot(sender: mpsc::Sender<Command>) -> anyhow::Result<Option<Arc<str>>> {
        let (tx, rx) = oneshot::channel();
        sender.send(Command::CurrentSnapshot { response: tx }).await?;
        Ok(rx.await?)
    }

    match inner_snapshot(sender).await {
        Ok(Some(snapshot)) => (
            [(header::CONTENT_TYPE, "application/json")],
            snapshot.to_string(),
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => super::error_response(e),
    }
}
