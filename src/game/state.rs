use super::Player;
use super::Rejection;
use super::Train;
use super::TurnType;
use crate::MEXICAN_TRAIN;
use crate::Pip;
use crate::tiles::Domino;
use colored::Colorize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Everything both sides of the wire agree on: the roster, the trains,
/// whose turn it is and under what phase. The host holds the
/// authoritative copy; every participant holds a replica driven by the
/// same action stream.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    trains: Vec<Train>,
    turn: TurnType,
    current: Option<String>,
    open_double: Option<String>,
    extra_turn: bool,
    boneyard_count: usize,
}

impl GameState {
    pub fn new(players: Vec<Player>, extra_turn: bool) -> Self {
        let trains = players
            .iter()
            .map(|p| Train::new(p.name()))
            .chain(std::iter::once(Train::new(MEXICAN_TRAIN)))
            .collect();
        Self {
            players,
            trains,
            turn: TurnType::First,
            current: None,
            open_double: None,
            extra_turn,
            boneyard_count: 0,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }
    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name() == name)
    }
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }
    pub fn train(&self, owner: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.owner() == owner)
    }
    pub fn train_mut(&mut self, owner: &str) -> Option<&mut Train> {
        self.trains.iter_mut().find(|t| t.owner() == owner)
    }
    pub fn turn(&self) -> TurnType {
        self.turn
    }
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
    pub fn is_turn_of(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }
    /// Owner of the train with an unanswered double, if any.
    pub fn open_double(&self) -> Option<&str> {
        self.open_double.as_deref()
    }
    pub fn extra_turn(&self) -> bool {
        self.extra_turn
    }
    pub fn boneyard_count(&self) -> usize {
        self.boneyard_count
    }
    pub fn set_boneyard_count(&mut self, count: usize) {
        self.boneyard_count = count;
    }

    /// Resets every train to the engine pip and empties all hands.
    pub fn new_round(&mut self, pip: Pip) {
        for train in self.trains.iter_mut() {
            train.restart(pip);
        }
        for player in self.players.iter_mut() {
            player.clear();
        }
        self.open_double = None;
        self.turn = TurnType::First;
    }

    /// Full legality ladder for a proposed play, checked in order:
    /// turn ownership, phase against target train, pip match. The
    /// first failure wins and nothing changes.
    pub fn check_play(&self, player: &str, tile: Domino, owner: &str) -> Result<(), Rejection> {
        if !self.is_turn_of(player) {
            return Err(Rejection::NotYourTurn);
        }
        let train = self
            .train(owner)
            .ok_or_else(|| Rejection::UnknownTrain(owner.to_string()))?;
        match self.turn {
            TurnType::SatisfyDouble => {
                if self.open_double.as_deref() != Some(owner) {
                    let on = self.open_double.clone().unwrap_or_default();
                    return Err(Rejection::MustSatisfyDouble(on));
                }
            }
            TurnType::MexicanTrainOnly => {
                if !train.is_shared() {
                    return Err(Rejection::SharedTrainOnly);
                }
            }
            TurnType::First => {
                if owner != player {
                    return Err(Rejection::OwnTrainOnly);
                }
            }
            TurnType::Normal => {
                if owner != player && !train.is_shared() && !train.is_public() {
                    return Err(Rejection::PrivateTrain(owner.to_string()));
                }
            }
        }
        if !tile.matches(train.required()) {
            return Err(Rejection::WrongPip(train.required()));
        }
        Ok(())
    }

    /// Applies a play both sides already agree is legal. Playing on
    /// your own train closes it again; a double outside the opening
    /// lap leaves that train awaiting satisfaction.
    pub fn played(&mut self, player: &str, tile: Domino, owner: &str) {
        if let Some(p) = self.player_mut(player) {
            p.played(tile);
        }
        if let Some(t) = self.train_mut(owner) {
            t.extend(tile);
            if t.owner() == player {
                t.set_public(false);
            }
        }
        self.open_double = (tile.is_double() && self.turn != TurnType::First)
            .then(|| owner.to_string());
    }

    /// Mirrors a hidden draw: the seat's count grows, the boneyard shrinks.
    pub fn drew(&mut self, player: &str) {
        if let Some(p) = self.player_mut(player) {
            p.drew();
            self.boneyard_count = self.boneyard_count.saturating_sub(1);
        }
    }

    /// A turn ended without a play opens that player's train.
    pub fn turn_ended(&mut self, player: &str, has_played: bool) {
        if !has_played {
            if let Some(t) = self.train_mut(player) {
                t.set_public(true);
            }
        }
    }

    /// Hands the turn to a player. The shared train goes public for
    /// good the first time normal play is announced.
    pub fn set_turn(&mut self, player: &str, turn: TurnType) {
        if turn == TurnType::Normal {
            if let Some(t) = self.train_mut(MEXICAN_TRAIN) {
                t.set_public(true);
            }
        }
        self.current = Some(player.to_string());
        self.turn = turn;
    }

    /// Tiles sitting on trains. With hand counts and the boneyard this
    /// accounts for every tile in the set except the engine.
    pub fn tiles_on_trains(&self) -> usize {
        self.trains.iter().map(Train::len).sum()
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "boneyard: {} tiles", self.boneyard_count)?;
        for player in &self.players {
            let marker = if self.is_turn_of(player.name()) {
                format!("< {}", self.turn).yellow().to_string()
            } else {
                String::new()
            };
            writeln!(f, "{:<12} {:>2} tiles {}", player.name(), player.count(), marker)?;
        }
        for train in &self.trains {
            writeln!(f, "{}", train)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SeatKind;

    fn state() -> GameState {
        let players = vec![
            Player::new("a", SeatKind::Host),
            Player::new("b", SeatKind::Network),
            Player::new("c", SeatKind::Hard),
        ];
        let mut state = GameState::new(players, false);
        state.new_round(9);
        state
    }

    #[test]
    fn first_phase_allows_own_train_only() {
        let mut s = state();
        s.set_turn("a", TurnType::First);
        let tile = Domino::new(9, 3);
        assert_eq!(s.check_play("a", tile, "a"), Ok(()));
        assert_eq!(s.check_play("a", tile, "b"), Err(Rejection::OwnTrainOnly));
        assert_eq!(
            s.check_play("a", tile, MEXICAN_TRAIN),
            Err(Rejection::OwnTrainOnly)
        );
        assert_eq!(s.check_play("b", tile, "b"), Err(Rejection::NotYourTurn));
    }

    #[test]
    fn normal_phase_respects_privacy() {
        let mut s = state();
        s.set_turn("a", TurnType::Normal);
        let tile = Domino::new(9, 3);
        assert_eq!(
            s.check_play("a", tile, "b"),
            Err(Rejection::PrivateTrain("b".into()))
        );
        s.train_mut("b").unwrap().set_public(true);
        assert_eq!(s.check_play("a", tile, "b"), Ok(()));
        // announcing normal play opened the shared train
        assert_eq!(s.check_play("a", tile, MEXICAN_TRAIN), Ok(()));
        assert_eq!(
            s.check_play("a", tile, "nobody"),
            Err(Rejection::UnknownTrain("nobody".into()))
        );
    }

    #[test]
    fn pip_mismatch_is_rejected_last() {
        let mut s = state();
        s.set_turn("a", TurnType::First);
        assert_eq!(
            s.check_play("a", Domino::new(4, 3), "a"),
            Err(Rejection::WrongPip(9))
        );
    }

    #[test]
    fn satisfy_double_pins_the_target_train() {
        let mut s = state();
        s.set_turn("b", TurnType::Normal);
        s.played("b", Domino::new(9, 9), "b");
        assert_eq!(s.open_double(), Some("b"));
        s.set_turn("c", TurnType::SatisfyDouble);
        let tile = Domino::new(9, 2);
        assert_eq!(
            s.check_play("c", tile, "c"),
            Err(Rejection::MustSatisfyDouble("b".into()))
        );
        // the double left b's train needing a 9 again
        assert_eq!(s.check_play("c", tile, "b"), Ok(()));
    }

    #[test]
    fn mexican_only_phase_pins_the_shared_train() {
        let mut s = state();
        s.set_turn("a", TurnType::MexicanTrainOnly);
        let tile = Domino::new(9, 1);
        assert_eq!(s.check_play("a", tile, "a"), Err(Rejection::SharedTrainOnly));
        assert_eq!(s.check_play("a", tile, MEXICAN_TRAIN), Ok(()));
    }

    #[test]
    fn own_play_closes_train_and_playless_turn_opens_it() {
        let mut s = state();
        s.train_mut("a").unwrap().set_public(true);
        s.set_turn("a", TurnType::Normal);
        s.played("a", Domino::new(9, 4), "a");
        assert!(!s.train("a").unwrap().is_public());
        s.turn_ended("a", false);
        assert!(s.train("a").unwrap().is_public());
    }

    #[test]
    fn opening_lap_doubles_do_not_hang() {
        let mut s = state();
        s.set_turn("a", TurnType::First);
        s.played("a", Domino::new(9, 9), "a");
        assert_eq!(s.open_double(), None);
    }

    #[test]
    fn satisfying_play_clears_the_double() {
        let mut s = state();
        s.set_turn("b", TurnType::Normal);
        s.played("b", Domino::new(9, 9), "b");
        s.set_turn("c", TurnType::SatisfyDouble);
        s.played("c", Domino::new(9, 2), "b");
        assert_eq!(s.open_double(), None);
    }

    #[test]
    fn hidden_draws_shrink_the_boneyard() {
        let mut s = state();
        s.set_boneyard_count(10);
        s.drew("b");
        assert_eq!(s.boneyard_count(), 9);
        assert_eq!(s.player("b").unwrap().count(), 1);
        // unknown names are inert
        s.drew(" ");
        assert_eq!(s.boneyard_count(), 9);
    }
}
