use {
    self::config::Config,
    axum::{Router, routing::get},
    std::future::IntoFuture,
    tracing_subscriber::fmt::format::FmtSpan,
};

mod config;
mod ingest;
mod routes;
mod state;

fn set_global_tracing_subscriber(config: &Config) {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level.inner)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::read()?;

    set_global_tracing_subscriber(&config);

    tracing::info!(
        "Starting score relay with config: {}",
        serde_json::to_string(&config)?
    );

    let (state, sender) = state::State::new(&config);
    let state_task = state.spawn();

    let udp_url = format!("{}:{}", config.bind_host, config.udp_port);
    let listener =
        ingest::Listener::bind(&udp_url, config.max_datagram_size, sender.clone()).await?;
    tracing::info!("Listening for score datagrams on {}", listener.local_addr()?);
    let ingest_task = listener.spawn();

    let app = Router::new()
        .route("/", get(routes::scoreboard::action))
        .route("/snapshot", get(routes::snapshot::action))
        .with_state(sender);
    let bind_url = format!("{}:{}", config.bind_host, config.websocket_port);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_url).await?;
    tracing::info!("Serving displays on {bind_url}");

    tokio::select! {
        result = axum::serve(tcp_listener, app).into_future() => result?,
        result = ingest_task => result?,
        result = state_task => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Received Ctrl+C, shutting down"),
    }
    Ok(())
}
