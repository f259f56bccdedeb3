use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// The phase constraining what the player to act may do.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum TurnType {
    /// Opening lap. Players chain onto their own empty train only.
    First,
    /// Own train, public trains, or the shared train.
    Normal,
    /// Bonus turn after a non-double play, shared train only.
    MexicanTrainOnly,
    /// An unanswered double must be covered before anything else.
    SatisfyDouble,
}

impl Display for TurnType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::First => write!(f, "FIRST"),
            Self::Normal => write!(f, "NORMAL"),
            Self::MexicanTrainOnly => write!(f, "MEXICAN_TRAIN_ONLY"),
            Self::SatisfyDouble => write!(f, "SATISFY_DOUBLE"),
        }
    }
}

impl TryFrom<&str> for TurnType {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "FIRST" => Ok(Self::First),
            "NORMAL" => Ok(Self::Normal),
            "MEXICAN_TRAIN_ONLY" => Ok(Self::MexicanTrainOnly),
            "SATISFY_DOUBLE" => Ok(Self::SatisfyDouble),
            _ => Err("unknown turn type"),
        }
    }
}
