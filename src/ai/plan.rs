use crate::tiles::Domino;

/// One scripted move in a computer player's turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The tile was already lifted from the boneyard while planning;
    /// executing the step publishes the draw.
    Draw(Domino),
    /// Play the tile on the named train.
    Play(Domino, String),
    /// Close out the turn, reporting whether anything was played.
    End { played: bool },
}

/// A complete turn decided up front: at most one draw, the plays in
/// order, and an end-turn when the rules call for one. Nothing is sent
/// until the whole plan exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The plays in order, without draws or the end-turn.
    pub fn plays(&self) -> impl Iterator<Item = (&Domino, &str)> {
        self.steps.iter().filter_map(|step| match step {
            Step::Play(tile, owner) => Some((tile, owner.as_str())),
            _ => None,
        })
    }

    pub fn drew(&self) -> Option<Domino> {
        self.steps.iter().find_map(|step| match step {
            Step::Draw(tile) => Some(*tile),
            _ => None,
        })
    }

    pub fn ends_turn(&self) -> Option<bool> {
        self.steps.iter().find_map(|step| match step {
            Step::End { played } => Some(*played),
            _ => None,
        })
    }
}
