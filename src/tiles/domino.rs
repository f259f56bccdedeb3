use crate::Pip;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;

/// One tile. The two ends are an unordered pair, so `3,5` and `5,3`
/// are the same domino everywhere: equality, hashing, hand lookup.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Domino {
    one: Pip,
    two: Pip,
}

impl Domino {
    pub fn new(one: Pip, two: Pip) -> Self {
        Self { one, two }
    }
    pub fn one(&self) -> Pip {
        self.one
    }
    pub fn two(&self) -> Pip {
        self.two
    }
    pub fn is_double(&self) -> bool {
        self.one == self.two
    }
    /// Whether either end shows the given pip count.
    pub fn matches(&self, pip: Pip) -> bool {
        self.one == pip || self.two == pip
    }
    /// The end left open after connecting at `pip`.
    pub fn other(&self, pip: Pip) -> Pip {
        if self.one == pip { self.two } else { self.one }
    }
    /// Penalty value of an unplayed tile. The blank double scores 50
    /// by rule, not by its pips.
    pub fn score(&self) -> u32 {
        if self.one == 0 && self.two == 0 {
            50
        } else {
            u32::from(self.one) + u32::from(self.two)
        }
    }
    /// Bracketed label, oriented so `open` reads first.
    pub fn label(&self, open: Pip) -> String {
        if self.matches(open) {
            format!("[{}|{}]", open, self.other(open))
        } else {
            format!("[{}|{}]", self.one, self.two)
        }
    }
}

/// order-insensitive
impl PartialEq for Domino {
    fn eq(&self, other: &Self) -> bool {
        (self.one == other.one && self.two == other.two)
            || (self.one == other.two && self.two == other.one)
    }
}

/// order-insensitive, consistent with Eq
impl Hash for Domino {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.one.min(self.two).hash(state);
        self.one.max(self.two).hash(state);
    }
}

/// wire form, e.g. "3,5"
impl Display for Domino {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{},{}", self.one, self.two)
    }
}

impl TryFrom<&str> for Domino {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let (one, two) = s.split_once(',').ok_or("domino missing comma")?;
        Ok(Self {
            one: one.trim().parse().map_err(|_| "bad pip count")?,
            two: two.trim().parse().map_err(|_| "bad pip count")?,
        })
    }
}
