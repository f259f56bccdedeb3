use crate::Pip;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Why a play or draw request was refused. Refusals never mutate state;
/// the requester is told and prompted again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotYourTurn,
    MustSatisfyDouble(String),
    SharedTrainOnly,
    OwnTrainOnly,
    PrivateTrain(String),
    WrongPip(Pip),
    UnknownTrain(String),
    BoneyardEmpty,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotYourTurn => write!(f, "it is not your turn"),
            Self::MustSatisfyDouble(owner) => {
                write!(f, "you must satisfy the double on {}'s train", owner)
            }
            Self::SharedTrainOnly => {
                write!(f, "you can only play on the mexican train this turn")
            }
            Self::OwnTrainOnly => {
                write!(f, "you can only play on your own train during the first turn")
            }
            Self::PrivateTrain(owner) => write!(f, "{}'s train is not open", owner),
            Self::WrongPip(pip) => write!(f, "that train needs a {}", pip),
            Self::UnknownTrain(owner) => write!(f, "there is no train owned by {}", owner),
            Self::BoneyardEmpty => write!(f, "the boneyard is empty"),
        }
    }
}

impl std::error::Error for Rejection {}
