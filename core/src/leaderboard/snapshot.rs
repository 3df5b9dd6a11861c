use {
    super::{key::PlayerKey, ranking},
    crate::telemetry::ScoreSample,
    serde::Serialize,
    std::cmp::Ordering,
};

/// One ranked row of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub id: PlayerKey,
    #[serde(flatten)]
    pub sample: ScoreSample,
}

/// Fully ranked view of a session, as pushed to every display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub song: String,
    pub scores: Vec<ScoreEntry>,
}

impl Snapshot {
    pub fn build<'a, I>(song: &str, scores: I) -> Self
    where
        I: IntoIterator<Item = (&'a PlayerKey, &'a ScoreSample)>,
    {
        let mut scores: Vec<ScoreEntry> = scores
            .into_iter()
            .map(|(id, sample)| ScoreEntry {
                id: *id,
                sample: sample.clone(),
            })
            .collect();
        // Ties keep this order, so they come out the same on every rebuild.
        scores.sort_unstable_by_key(|entry| entry.id);
        rank(&mut scores);
        Self {
            song: song.into(),
            scores,
        }
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn position(&self, id: &PlayerKey) -> Option<usize> {
        self.scores.iter().position(|entry| &entry.id == id)
    }
}

/// Stable insertion sort. The ranking comparator is not a total order, which
/// the standard library sorts may panic on.
fn rank(entries: &mut [ScoreEntry]) {
    for i in 1..entries.len() {
        let mut j = i;
        while j > 0
            && ranking::compare(&entries[j - 1].sample, &entries[j].sample) == Ordering::Greater
        {
            entries.swap(j - 1, j);
            j -= 1;
        }
    }
}
