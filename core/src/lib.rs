//! Domain logic for relaying live rhythm-game scores: decoding of the score
//! records emitted by the game client, the per-song leaderboard and its ranking.

pub mod leaderboard;
pub mod telemetry;
