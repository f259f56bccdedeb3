use super::Domino;
use crate::Pip;
use crate::game::Player;
use rand::Rng;

/// The undealt pool for one round. Tables of three or fewer use the
/// double-nine set, larger tables the double-twelve set.
#[derive(Debug, Clone)]
pub struct Boneyard {
    tiles: Vec<Domino>,
    max_pip: Pip,
    hand_size: usize,
}

impl Boneyard {
    /// Highest pip in the domino set for a table of the given size.
    pub fn max_pip(players: usize) -> Pip {
        if players <= 3 { 9 } else { 12 }
    }

    pub fn new(players: usize) -> Self {
        let mut this = Self {
            tiles: Vec::new(),
            max_pip: Self::max_pip(players),
            hand_size: match players {
                ..=4 => 15,
                5..=6 => 12,
                _ => 11,
            },
        };
        this.rebuild();
        this
    }

    /// Restores the full set for the next round.
    pub fn rebuild(&mut self) {
        self.tiles = (0..=self.max_pip)
            .flat_map(|one| (one..=self.max_pip).map(move |two| Domino::new(one, two)))
            .collect();
    }

    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Removes one tile at random.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Domino> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(rng.random_range(0..self.tiles.len())))
        }
    }

    /// Deals opening hands round-robin and returns the seat that starts.
    /// Whoever is dealt the round's double discards it and opens; when
    /// nobody is, tiles are dealt one at a time from a random seat until
    /// the double turns up.
    pub fn deal<R: Rng>(&mut self, players: &mut [Player], pip_round: Pip, rng: &mut R) -> usize {
        let mut starter = None;
        let engine = Domino::new(pip_round, pip_round);
        for _ in 0..self.hand_size {
            for (seat, player) in players.iter_mut().enumerate() {
                if let Some(tile) = self.draw(rng) {
                    if tile == engine && starter.is_none() {
                        starter = Some(seat);
                    } else {
                        player.take(tile);
                    }
                }
            }
        }
        let mut seat = rng.random_range(0..players.len());
        while starter.is_none() {
            let Some(tile) = self.draw(rng) else { break };
            if tile == engine {
                starter = Some(seat);
            } else {
                players[seat].take(tile);
                seat = (seat + 1) % players.len();
            }
        }
        // the engine double is always somewhere in the set
        starter.unwrap_or_default()
    }
}
