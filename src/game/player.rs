use crate::tiles::Domino;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Who drives a seat. Remote seats act over the wire, computer seats
/// through the decision engine, the host seat at the local console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatKind {
    Host,
    Network,
    Easy,
    Medium,
    Hard,
}

impl SeatKind {
    pub fn is_computer(&self) -> bool {
        matches!(self, Self::Easy | Self::Medium | Self::Hard)
    }
}

impl Display for SeatKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Host => write!(f, "HOST"),
            Self::Network => write!(f, "NETWORK"),
            Self::Easy => write!(f, "COMPUTER_EASY"),
            Self::Medium => write!(f, "COMPUTER_MEDIUM"),
            Self::Hard => write!(f, "COMPUTER_HARD"),
        }
    }
}

impl TryFrom<&str> for SeatKind {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "host" => Ok(Self::Host),
            "network" => Ok(Self::Network),
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err("unknown seat kind"),
        }
    }
}

/// One seat at the table. The count is authoritative even when the hand
/// contents are not ours to know, which is the common case on replicas.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    kind: SeatKind,
    hand: Vec<Domino>,
    count: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: SeatKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hand: Vec::new(),
            count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> SeatKind {
        self.kind
    }
    pub fn set_kind(&mut self, kind: SeatKind) {
        self.kind = kind;
    }
    pub fn hand(&self) -> &[Domino] {
        &self.hand
    }
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn take(&mut self, tile: Domino) {
        self.hand.push(tile);
        self.count = self.hand.len();
    }
    pub fn set_hand(&mut self, hand: Vec<Domino>) {
        self.hand = hand;
        self.count = self.hand.len();
    }
    /// For seats whose tiles stay hidden. Adjusts the count only.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }
    pub fn drew(&mut self) {
        self.count += 1;
    }
    pub fn clear(&mut self) {
        self.hand.clear();
        self.count = 0;
    }

    /// Removes the tile if the hand is visible; the count drops either way.
    pub fn played(&mut self, tile: Domino) {
        if !self.discard(tile) {
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Removes a tile we can see. Returns whether it was held.
    pub fn discard(&mut self, tile: Domino) -> bool {
        match self.hand.iter().position(|held| *held == tile) {
            Some(i) => {
                self.hand.remove(i);
                self.count = self.hand.len();
                true
            }
            None => false,
        }
    }

    /// Round penalty: pip total of everything still held.
    pub fn score(&self) -> u32 {
        self.hand.iter().map(Domino::score).sum()
    }
}
