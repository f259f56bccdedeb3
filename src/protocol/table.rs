use crate::game::TurnType;
use crate::tiles::Domino;

/// Capability surface a decoded [`Action`](super::Action) lands on.
/// The host coordinator and the participant replica both implement it;
/// variants that carry no meaning on one side log and do nothing there.
pub trait Table {
    fn new_game(&mut self, players: Vec<String>);
    fn begin_round(&mut self, counts: Vec<(String, usize)>);
    fn set_hand(&mut self, dominoes: Vec<Domino>);
    fn add_to_hand(&mut self, domino: Domino);
    fn play(&mut self, player: &str, domino: Domino, train: &str);
    fn draw(&mut self, player: &str);
    fn end_turn(&mut self, player: &str, has_played: bool);
    fn set_turn(&mut self, player: &str, turn: TurnType);
    fn add_scores(&mut self, scores: Vec<(String, u32)>, display: bool);
}
