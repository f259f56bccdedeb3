use crate::MEXICAN_TRAIN;
use crate::Pip;
use crate::tiles::Domino;
use colored::Colorize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// One line of play. Every player owns one, plus the shared train.
/// A private train opens to everybody when its owner ends a turn
/// without playing, and closes again when the owner plays on it.
#[derive(Debug, Clone)]
pub struct Train {
    owner: String,
    tiles: Vec<Domino>,
    start: Pip,
    required: Pip,
    public: bool,
}

impl Train {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            tiles: Vec::new(),
            start: 0,
            required: 0,
            public: false,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
    pub fn is_shared(&self) -> bool {
        self.owner == MEXICAN_TRAIN
    }
    pub fn tiles(&self) -> &[Domino] {
        &self.tiles
    }
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    /// The pip the next tile must show.
    pub fn required(&self) -> Pip {
        self.required
    }
    pub fn is_public(&self) -> bool {
        self.public
    }
    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }

    /// Wipes the line for a new round starting from the engine pip.
    pub fn restart(&mut self, pip: Pip) {
        self.tiles.clear();
        self.start = pip;
        self.required = pip;
        self.public = false;
    }

    /// Appends a tile. The open end becomes whichever end the
    /// connection did not consume.
    pub fn extend(&mut self, tile: Domino) {
        self.required = tile.other(self.required);
        self.tiles.push(tile);
    }
}

impl Display for Train {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let owner = if self.is_shared() || self.public {
            format!("{:<12}", self.owner).green()
        } else {
            format!("{:<12}", self.owner).red()
        };
        let mut open = self.start;
        let mut line = String::new();
        for tile in &self.tiles {
            line.push_str(&tile.label(open));
            open = tile.other(open);
        }
        write!(f, "{} {} needs {}", owner, line, self.required)
    }
}
