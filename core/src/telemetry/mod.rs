//! Decoding of the score records the game client emits once per player.
//!
//! A datagram starts with a one byte message tag. Only [`SCORE_RECORD_TAG`]
//! carries a score record; the rest of such a datagram is text made of
//! [`FIELD_COUNT`] fields separated by [`FIELD_DELIMITER`]:
//!
//! ```text
//! song|slot|name|actual|current max|final max|formatted|life|failed|
//! tap: none|hitMine|avoidMine|checkpointMiss|miss|W5|W4|W3|W2|W1|checkpointHit|
//! hold: none|letGo|held|missed
//! ```

use {
    serde::Serialize,
    std::str::FromStr,
};

mod error;

pub use error::MalformedRecord;

pub const SCORE_RECORD_TAG: u8 = 0x02;
pub const FIELD_DELIMITER: char = '|';
pub const FIELD_COUNT: usize = 24;

/// Returns the record carried by a score datagram, or `None` for any other
/// message type.
pub fn score_payload(datagram: &[u8]) -> Option<&[u8]> {
    match datagram.split_first() {
        Some((&SCORE_RECORD_TAG, record)) => Some(record),
        _ => None,
    }
}

/// One player's score at one instant of the song being played.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSample {
    pub song: String,
    #[serde(rename = "playerNumber")]
    pub player_slot: u8,
    pub player_name: String,
    #[serde(rename = "actualDancePoints")]
    pub actual_points: i64,
    /// Points attainable so far; grows as the song plays.
    #[serde(rename = "currentPossibleDancePoints")]
    pub current_max_points: i64,
    /// Points attainable over the whole song.
    #[serde(rename = "possibleDancePoints")]
    pub final_max_points: i64,
    pub formatted_score: String,
    /// Life meter as reported by the client, not clamped.
    pub life: f64,
    #[serde(rename = "isFailed")]
    pub failed: bool,
    pub tap_note: TapNoteScores,
    pub hold_note: HoldNoteScores,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TapNoteScores {
    pub none: u32,
    pub hit_mine: u32,
    pub avoid_mine: u32,
    pub checkpoint_miss: u32,
    pub miss: u32,
    #[serde(rename = "W5")]
    pub w5: u32,
    #[serde(rename = "W4")]
    pub w4: u32,
    #[serde(rename = "W3")]
    pub w3: u32,
    #[serde(rename = "W2")]
    pub w2: u32,
    #[serde(rename = "W1")]
    pub w1: u32,
    pub checkpoint_hit: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldNoteScores {
    pub none: u32,
    pub let_go: u32,
    pub held: u32,
    pub missed: u32,
}

impl ScoreSample {
    /// Decodes the record part of a score datagram (without the tag byte).
    pub fn decode(record: &[u8]) -> Result<Self, MalformedRecord> {
        let text = String::from_utf8_lossy(record);
        trim_record(&text).parse()
    }

    #[cfg(any(test, feature = "test-only"))]
    pub fn mock(
        song: &str,
        player_slot: u8,
        actual_points: i64,
        current_max_points: i64,
        final_max_points: i64,
        failed: bool,
    ) -> Self {
        Self {
            song: song.into(),
            player_slot,
            player_name: format!("P{player_slot}"),
            actual_points,
            current_max_points,
            final_max_points,
            formatted_score: format!("{actual_points}"),
            life: if failed { 0.0 } else { 0.5 },
            failed,
            tap_note: TapNoteScores::default(),
            hold_note: HoldNoteScores::default(),
        }
    }

    /// Renders the sample as the datagram the game client would send.
    #[cfg(any(test, feature = "test-only"))]
    pub fn to_datagram(&self) -> Vec<u8> {
        let t = &self.tap_note;
        let h = &self.hold_note;
        let record = format!(
            "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            self.song,
            self.player_slot,
            self.player_name,
            self.actual_points,
            self.current_max_points,
            self.final_max_points,
            self.formatted_score,
            self.life,
            if self.failed { "1" } else { "0" },
            t.none,
            t.hit_mine,
            t.avoid_mine,
            t.checkpoint_miss,
            t.miss,
            t.w5,
            t.w4,
            t.w3,
            t.w2,
            t.w1,
            t.checkpoint_hit,
            h.none,
            h.let_go,
            h.held,
            h.missed,
        );
        let mut datagram = vec![SCORE_RECORD_TAG];
        datagram.extend_from_slice(record.as_bytes());
        datagram
    }
}

impl FromStr for ScoreSample {
    type Err = MalformedRecord;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(FIELD_DELIMITER).collect();
        let found = fields.len();
        let Ok(
            [
                song,
                slot,
                name,
                actual,
                current_max,
                final_max,
                formatted,
                life,
                failed,
                tap_none,
                hit_mine,
                avoid_mine,
                checkpoint_miss,
                miss,
                w5,
                w4,
                w3,
                w2,
                w1,
                checkpoint_hit,
                hold_none,
                let_go,
                held,
                missed,
            ],
        ) = <[&str; FIELD_COUNT]>::try_from(fields)
        else {
            return Err(MalformedRecord::FieldCount { found });
        };

        let life_text = life;
        let life: f64 = number("life", life_text)?;
        // `f64::from_str` accepts "NaN" and "inf"; neither is a life value.
        if !life.is_finite() {
            return Err(invalid("life", life_text));
        }

        Ok(Self {
            song: song.into(),
            player_slot: number("playerNumber", slot)?,
            player_name: name.into(),
            actual_points: number("actualDancePoints", actual)?,
            current_max_points: number("currentPossibleDancePoints", current_max)?,
            final_max_points: number("possibleDancePoints", final_max)?,
            formatted_score: formatted.into(),
            life,
            failed: failed == "1",
            tap_note: TapNoteScores {
                none: number("tapNote.none", tap_none)?,
                hit_mine: number("tapNote.hitMine", hit_mine)?,
                avoid_mine: number("tapNote.avoidMine", avoid_mine)?,
                checkpoint_miss: number("tapNote.checkpointMiss", checkpoint_miss)?,
                miss: number("tapNote.miss", miss)?,
                w5: number("tapNote.W5", w5)?,
                w4: number("tapNote.W4", w4)?,
                w3: number("tapNote.W3", w3)?,
                w2: number("tapNote.W2", w2)?,
                w1: number("tapNote.W1", w1)?,
                checkpoint_hit: number("tapNote.checkpointHit", checkpoint_hit)?,
            },
            hold_note: HoldNoteScores {
                none: number("holdNote.none", hold_none)?,
                let_go: number("holdNote.letGo", let_go)?,
                held: number("holdNote.held", held)?,
                missed: number("holdNote.missed", missed)?,
            },
        })
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, MalformedRecord> {
    value.parse().map_err(|_| invalid(field, value))
}

fn invalid(field: &'static str, value: &str) -> MalformedRecord {
    MalformedRecord::InvalidNumber {
        field,
        value: value.into(),
    }
}

/// Some clients terminate the record with a newline or NUL padding.
fn trim_record(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "Xeroize|1|ALICE|900|1000|2000|45.00%|0.75|0|\
                          0|1|2|0|3|4|5|6|7|8|9|\
                          0|1|10|2";

    fn replace_field(index: usize, value: &str) -> String {
        let mut fields: Vec<&str> = RECORD.split('|').collect();
        fields[index] = value;
        fields.join("|")
    }

    #[test]
    fn test_decode_record() {
        let sample: ScoreSample = RECORD.parse().unwrap();

        assert_eq!(sample.song, "Xeroize");
        assert_eq!(sample.player_slot, 1);
        assert_eq!(sample.player_name, "ALICE");
        assert_eq!(sample.actual_points, 900);
        assert_eq!(sample.current_max_points, 1000);
        assert_eq!(sample.final_max_points, 2000);
        assert_eq!(sample.formatted_score, "45.00%");
        assert_eq!(sample.life, 0.75);
        assert!(!sample.failed);
        assert_eq!(
            sample.tap_note,
            TapNoteScores {
                none: 0,
                hit_mine: 1,
                avoid_mine: 2,
                checkpoint_miss: 0,
                miss: 3,
                w5: 4,
                w4: 5,
                w3: 6,
                w2: 7,
                w1: 8,
                checkpoint_hit: 9,
            }
        );
        assert_eq!(
            sample.hold_note,
            HoldNoteScores {
                none: 0,
                let_go: 1,
                held: 10,
                missed: 2,
            }
        );
    }

    #[test]
    fn test_failed_flag_is_literal_one() {
        let failed: ScoreSample = replace_field(8, "1").parse().unwrap();
        assert!(failed.failed);

        for other in ["true", "01", "yes", "", " 1"] {
            let sample: ScoreSample = replace_field(8, other).parse().unwrap();
            assert!(!sample.failed, "{other:?} must not count as failed");
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let short = RECORD.rsplit_once('|').unwrap().0;
        assert_eq!(
            short.parse::<ScoreSample>(),
            Err(MalformedRecord::FieldCount { found: 23 })
        );

        let long = format!("{RECORD}|0");
        assert_eq!(
            long.parse::<ScoreSample>(),
            Err(MalformedRecord::FieldCount { found: 25 })
        );

        assert_eq!(
            "".parse::<ScoreSample>(),
            Err(MalformedRecord::FieldCount { found: 1 })
        );
    }

    #[test]
    fn test_unparseable_numbers() {
        let err = replace_field(3, "nine hundred")
            .parse::<ScoreSample>()
            .unwrap_err();
        assert_eq!(
            err,
            MalformedRecord::InvalidNumber {
                field: "actualDancePoints",
                value: "nine hundred".into(),
            }
        );

        // Counts are never negative.
        let err = replace_field(13, "-3").parse::<ScoreSample>().unwrap_err();
        assert!(matches!(
            err,
            MalformedRecord::InvalidNumber {
                field: "tapNote.miss",
                ..
            }
        ));

        assert!(replace_field(1, "300").parse::<ScoreSample>().is_err());
        assert!(replace_field(7, "NaN").parse::<ScoreSample>().is_err());
        assert!(replace_field(23, "").parse::<ScoreSample>().is_err());
    }

    #[test]
    fn test_negative_points_and_unclamped_life() {
        let record = replace_field(3, "-40");
        let record = record.replacen("|0.75|", "|1.25|", 1);
        let sample: ScoreSample = record.parse().unwrap();
        assert_eq!(sample.actual_points, -40);
        assert_eq!(sample.life, 1.25);
    }

    #[test]
    fn test_score_payload() {
        let mut datagram = vec![SCORE_RECORD_TAG];
        datagram.extend_from_slice(RECORD.as_bytes());
        assert_eq!(score_payload(&datagram), Some(RECORD.as_bytes()));

        assert_eq!(score_payload(b"\x01hello"), None);
        assert_eq!(score_payload(b""), None);
        assert_eq!(score_payload(&[SCORE_RECORD_TAG]), Some(&[][..]));
    }

    #[test]
    fn test_decode_trims_line_endings() {
        let mut record = RECORD.as_bytes().to_vec();
        record.extend_from_slice(b"\r\n\0\0");
        let sample = ScoreSample::decode(&record).unwrap();
        assert_eq!(sample.hold_note.missed, 2);
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        let mut raw = RECORD.as_bytes().to_vec();
        let at = RECORD.find("ALICE").unwrap() + 2;
        raw[at] = 0xFF;
        let sample = ScoreSample::decode(&raw).unwrap();
        assert_eq!(sample.player_name, "AL\u{FFFD}CE");
    }

    #[test]
    fn test_mock_datagram_decodes() {
        let sample = ScoreSample::mock("S1", 2, 850, 1000, 2000, true);
        let datagram = sample.to_datagram();
        let decoded = ScoreSample::decode(score_payload(&datagram).unwrap()).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_serialized_field_names() {
        let sample: ScoreSample = RECORD.parse().unwrap();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["playerNumber"], 1);
        assert_eq!(json["actualDancePoints"], 900);
        assert_eq!(json["currentPossibleDancePoints"], 1000);
        assert_eq!(json["possibleDancePoints"], 2000);
        assert_eq!(json["isFailed"], false);
        assert_eq!(json["tapNote"]["W1"], 8);
        assert_eq!(json["tapNote"]["checkpointHit"], 9);
        assert_eq!(json["holdNote"]["letGo"], 1);
    }
}
