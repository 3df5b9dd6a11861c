use {
    crate::telemetry::{MalformedRecord, ScoreSample},
    std::{collections::HashMap, net::IpAddr},
};

mod key;
pub mod ranking;
mod snapshot;

pub use {
    key::PlayerKey,
    snapshot::{ScoreEntry, Snapshot},
};

/// The scores of every player for the song currently being played.
#[derive(Debug)]
pub struct Session {
    song: String,
    scores: HashMap<PlayerKey, ScoreSample>,
    snapshot: Snapshot,
}

impl Session {
    fn new(key: PlayerKey, sample: ScoreSample) -> Self {
        let song = sample.song.clone();
        let scores = HashMap::from([(key, sample)]);
        let snapshot = Snapshot::build(&song, &scores);
        Self {
            song,
            scores,
            snapshot,
        }
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn song(&self) -> &str {
        &self.song
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn player_count(&self) -> usize {
        self.scores.len()
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn get(&self, key: &PlayerKey) -> Option<&ScoreSample> {
        self.scores.get(key)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns `true` if the player was not part of the session yet.
    fn merge(&mut self, key: PlayerKey, sample: ScoreSample) -> bool {
        let is_new = self.scores.insert(key, sample).is_none();
        self.snapshot = Snapshot::build(&self.song, &self.scores);
        is_new
    }
}

/// What applying a sample did to the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// First sample ever seen; a session was created.
    Started,
    /// The sample is for another song; every previous entry was dropped.
    SongChanged { previous: String },
    Joined,
    Updated,
}

/// Holds at most one [`Session`]. A sample for a different song than the
/// current one replaces the whole session.
#[derive(Debug, Default)]
pub struct Leaderboard {
    session: Option<Session>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    pub fn apply(&mut self, key: PlayerKey, sample: ScoreSample) -> Applied {
        if let Some(session) = self.session.as_mut().filter(|s| s.song == sample.song) {
            let is_new = session.merge(key, sample);
            return if is_new {
                Applied::Joined
            } else {
                Applied::Updated
            };
        }

        match self.session.replace(Session::new(key, sample)) {
            Some(previous) => Applied::SongChanged {
                previous: previous.song,
            },
            None => Applied::Started,
        }
    }

    /// Decodes a score record sent from `origin` and applies it. A malformed
    /// record leaves the leaderboard untouched.
    pub fn ingest(&mut self, origin: IpAddr, record: &[u8]) -> Result<Applied, MalformedRecord> {
        let sample = ScoreSample::decode(record)?;
        let key = PlayerKey::new(origin, sample.player_slot);
        Ok(self.apply(key, sample))
    }
}
