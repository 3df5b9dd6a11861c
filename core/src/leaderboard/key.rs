use {
    serde::{Serialize, Serializer},
    std::{fmt, net::IpAddr},
};

/// Identity of one player within a session: the address the score records
/// come from plus the player slot they report. Two machines reporting the
/// same slot are different players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerKey {
    pub origin: IpAddr,
    pub slot: u8,
}

impl PlayerKey {
    pub fn new(origin: IpAddr, slot: u8) -> Self {
        Self { origin, slot }
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.origin, self.slot)
    }
}

impl Serialize for PlayerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
