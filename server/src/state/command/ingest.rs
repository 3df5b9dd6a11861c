use {
    crate::state::State,
    score_relay_core::leaderboard::Applied,
    std::net::IpAddr,
};

pub fn handle(state: &mut State, origin: IpAddr, record: &[u8]) {
    let applied = match state.leaderboard.ingest(origin, record) {
        Ok(applied) => applied,
        Err(e) => {
            tracing::warn!("Discarding malformed score record from {origin}: {e}");
            return;
        }
    };

    let Some(snapshot) = state.leaderboard.current_snapshot() else {
        return;
    };
    match applied {
        Applied::Started => tracing::info!("Tracking scores for {:?}", snapshot.song),
        Applied::SongChanged { previous } => tracing::info!(
            "Song changed from {previous:?} to {:?}, leaderboard reset",
            snapshot.song
        ),
        Applied::Joined => tracing::info!(
            "Player from {origin} joined, {} players on the leaderboard",
            snapshot.scores.len()
        ),
        Applied::Updated => (),
    }

    match serde_json::to_string(snapshot) {
        Ok(payload) => state.fanout.publish(payload.into()),
        Err(e) => tracing::error!("Failed to serialize snapshot: {e:?}"),
    }
}
