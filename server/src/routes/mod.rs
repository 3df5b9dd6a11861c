use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub mod scoreboard;
pub mod snapshot;

fn error_response(e: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("An error occurred: {e:?}"),
    )
        .into_response()
}
