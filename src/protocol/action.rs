use super::Table;
use crate::game::TurnType;
use crate::tiles::Domino;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Field separator between a line's tag and its fields.
pub const MAIN_DELIM: char = ';';
/// Separator inside a compound field, e.g. a name,count pair.
pub const INNER_DELIM: char = ',';

/// One line on the wire. Participants send the three intents
/// (play, draw, end turn); the host broadcasts everything else as
/// facts. A line whose tag nobody recognizes decodes to [`Noop`](Self::Noop)
/// so that newer peers never wedge older ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Roster in table order. Starts or re-baselines a replica.
    NewGame { players: Vec<String> },
    /// Hand counts for a fresh round, plus the boneyard pseudo-entry.
    BeginRound { counts: Vec<(String, usize)> },
    /// Replaces the recipient's whole hand. Unicast.
    DealDominoes { dominoes: Vec<Domino> },
    /// Adds one tile to the recipient's hand. Unicast, follows a draw.
    AddDomino { domino: Domino },
    DrawDomino { player: String },
    PlayDomino { player: String, domino: Domino, train: String },
    EndPlayerTurn { player: String, has_played: bool },
    SetPlayerTurn { player: String, turn: TurnType },
    /// Scores of a finished round. `display` is false during resync replay.
    AddRoundScores { display: bool, scores: Vec<(String, u32)> },
    /// Unrecognized tag. Inert everywhere.
    Noop,
}

impl Action {
    /// Dispatches this action against whichever side of the wire
    /// received it.
    pub fn apply(self, table: &mut impl Table) {
        match self {
            Self::NewGame { players } => table.new_game(players),
            Self::BeginRound { counts } => table.begin_round(counts),
            Self::DealDominoes { dominoes } => table.set_hand(dominoes),
            Self::AddDomino { domino } => table.add_to_hand(domino),
            Self::DrawDomino { player } => table.draw(&player),
            Self::PlayDomino {
                player,
                domino,
                train,
            } => table.play(&player, domino, &train),
            Self::EndPlayerTurn { player, has_played } => table.end_turn(&player, has_played),
            Self::SetPlayerTurn { player, turn } => table.set_turn(&player, turn),
            Self::AddRoundScores { display, scores } => table.add_scores(scores, display),
            Self::Noop => {}
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NewGame { players } => {
                write!(f, "NewGame")?;
                for p in players {
                    write!(f, "{}{}", MAIN_DELIM, p)?;
                }
                Ok(())
            }
            Self::BeginRound { counts } => {
                write!(f, "BeginRound")?;
                for (name, count) in counts {
                    write!(f, "{}{}{}{}", MAIN_DELIM, name, INNER_DELIM, count)?;
                }
                Ok(())
            }
            Self::DealDominoes { dominoes } => {
                write!(f, "DealDominoes")?;
                for d in dominoes {
                    write!(f, "{}{}", MAIN_DELIM, d)?;
                }
                Ok(())
            }
            Self::AddDomino { domino } => write!(f, "AddDomino{}{}", MAIN_DELIM, domino),
            Self::DrawDomino { player } => write!(f, "DrawDomino{}{}", MAIN_DELIM, player),
            Self::PlayDomino {
                player,
                domino,
                train,
            } => write!(
                f,
                "PlayDomino{}{}{}{}{}{}",
                MAIN_DELIM, player, MAIN_DELIM, domino, MAIN_DELIM, train
            ),
            Self::EndPlayerTurn { player, has_played } => write!(
                f,
                "EndPlayerTurn{}{}{}{}",
                MAIN_DELIM, player, MAIN_DELIM, has_played
            ),
            Self::SetPlayerTurn { player, turn } => write!(
                f,
                "SetPlayerTurn{}{}{}{}",
                MAIN_DELIM, player, MAIN_DELIM, turn
            ),
            Self::AddRoundScores { display, scores } => {
                write!(f, "AddRoundScores{}{}", MAIN_DELIM, display)?;
                for (name, score) in scores {
                    write!(f, "{}{}{}{}", MAIN_DELIM, name, INNER_DELIM, score)?;
                }
                Ok(())
            }
            Self::Noop => write!(f, "Noop"),
        }
    }
}

fn pair<'a>(field: &'a str) -> Result<(&'a str, &'a str), &'static str> {
    field.split_once(INNER_DELIM).ok_or("field missing comma")
}

fn flag(field: &str) -> Result<bool, &'static str> {
    match field {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("bad boolean field"),
    }
}

impl TryFrom<&str> for Action {
    type Error = &'static str;
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut fields = line.trim_end().split(MAIN_DELIM);
        let tag = fields.next().unwrap_or_default();
        let rest: Vec<&str> = fields.collect();
        match tag {
            "NewGame" => Ok(Self::NewGame {
                players: rest.iter().map(|s| s.to_string()).collect(),
            }),
            "BeginRound" => Ok(Self::BeginRound {
                counts: rest
                    .iter()
                    .map(|field| {
                        let (name, count) = pair(field)?;
                        let count = count.parse().map_err(|_| "bad hand count")?;
                        Ok((name.to_string(), count))
                    })
                    .collect::<Result<_, Self::Error>>()?,
            }),
            "DealDominoes" => Ok(Self::DealDominoes {
                dominoes: rest
                    .iter()
                    .map(|field| Domino::try_from(*field))
                    .collect::<Result<_, _>>()?,
            }),
            "AddDomino" => Ok(Self::AddDomino {
                domino: Domino::try_from(*rest.first().ok_or("missing domino")?)?,
            }),
            "DrawDomino" => Ok(Self::DrawDomino {
                player: rest.first().ok_or("missing player")?.to_string(),
            }),
            "PlayDomino" => match rest.as_slice() {
                [player, domino, train] => Ok(Self::PlayDomino {
                    player: player.to_string(),
                    domino: Domino::try_from(*domino)?,
                    train: train.to_string(),
                }),
                _ => Err("play needs player, domino, train"),
            },
            "EndPlayerTurn" => match rest.as_slice() {
                [player, has_played] => Ok(Self::EndPlayerTurn {
                    player: player.to_string(),
                    has_played: flag(has_played)?,
                }),
                _ => Err("end turn needs player, flag"),
            },
            "SetPlayerTurn" => match rest.as_slice() {
                [player, turn] => Ok(Self::SetPlayerTurn {
                    player: player.to_string(),
                    turn: TurnType::try_from(*turn)?,
                }),
                _ => Err("set turn needs player, turn type"),
            },
            "AddRoundScores" => {
                let (display, scores) = rest.split_first().ok_or("missing display flag")?;
                Ok(Self::AddRoundScores {
                    display: flag(display)?,
                    scores: scores
                        .iter()
                        .map(|field| {
                            let (name, score) = pair(field)?;
                            let score = score.parse().map_err(|_| "bad score")?;
                            Ok((name.to_string(), score))
                        })
                        .collect::<Result<_, Self::Error>>()?,
                })
            }
            _ => Ok(Self::Noop),
        }
    }
}
