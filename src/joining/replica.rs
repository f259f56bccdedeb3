use crate::BONEYARD;
use crate::Pip;
use crate::game::GameState;
use crate::game::Player;
use crate::game::ScoreKeeper;
use crate::game::SeatKind;
use crate::protocol::Table;
use crate::tiles::Boneyard;
use crate::tiles::Domino;

/// A participant's copy of the table, driven entirely by the host's
/// action stream. It never decides anything; it only applies facts.
/// Because it runs the same legality ladder as the host, a move it
/// accepts locally is a move the host will accept too.
#[derive(Debug)]
pub struct Replica {
    me: String,
    state: GameState,
    score: Option<ScoreKeeper>,
    game_over: bool,
}

impl Replica {
    pub fn new(me: impl Into<String>) -> Self {
        Self {
            me: me.into(),
            state: GameState::new(Vec::new(), false),
            score: None,
            game_over: false,
        }
    }

    pub fn me(&self) -> &str {
        &self.me
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn score(&self) -> Option<&ScoreKeeper> {
        self.score.as_ref()
    }
    pub fn pip_round(&self) -> i32 {
        self.score.as_ref().map(|s| s.pip_round()).unwrap_or_default()
    }
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
    pub fn my_turn(&self) -> bool {
        self.state.is_turn_of(&self.me)
    }
    pub fn my_hand(&self) -> &[Domino] {
        self.state
            .player(&self.me)
            .map(|p| p.hand())
            .unwrap_or_default()
    }
}

impl Table for Replica {
    fn new_game(&mut self, players: Vec<String>) {
        let seats = players
            .iter()
            .map(|name| Player::new(name.clone(), SeatKind::Network))
            .collect::<Vec<Player>>();
        self.score = Some(ScoreKeeper::new(
            players,
            Boneyard::max_pip(seats.len()),
        ));
        self.state = GameState::new(seats, false);
        self.game_over = false;
    }

    fn begin_round(&mut self, counts: Vec<(String, usize)>) {
        let pip = self.pip_round().max(0) as Pip;
        self.state.new_round(pip);
        for (name, count) in counts {
            if name == BONEYARD {
                self.state.set_boneyard_count(count);
            } else if let Some(p) = self.state.player_mut(&name) {
                p.set_count(count);
            }
        }
    }

    fn set_hand(&mut self, dominoes: Vec<Domino>) {
        let me = self.me.clone();
        if let Some(p) = self.state.player_mut(&me) {
            p.set_hand(dominoes);
        }
    }

    fn add_to_hand(&mut self, domino: Domino) {
        let me = self.me.clone();
        if let Some(p) = self.state.player_mut(&me) {
            p.take(domino);
        }
    }

    fn play(&mut self, player: &str, domino: Domino, train: &str) {
        self.state.played(player, domino, train);
    }

    fn draw(&mut self, player: &str) {
        self.state.drew(player);
    }

    fn end_turn(&mut self, player: &str, has_played: bool) {
        self.state.turn_ended(player, has_played);
    }

    fn set_turn(&mut self, player: &str, turn: crate::game::TurnType) {
        self.state.set_turn(player, turn);
    }

    fn add_scores(&mut self, scores: Vec<(String, u32)>, _display: bool) {
        if let Some(score) = self.score.as_mut() {
            score.add_round(&scores);
            self.game_over = score.is_game_over();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MEXICAN_TRAIN;
    use crate::protocol::Action;

    fn d(one: u8, two: u8) -> Domino {
        Domino::new(one, two)
    }

    fn feed(replica: &mut Replica, lines: &[&str]) {
        for line in lines {
            Action::try_from(*line).unwrap().apply(replica);
        }
    }

    #[test]
    fn a_round_replays_into_the_same_table() {
        let mut r = Replica::new("me");
        feed(
            &mut r,
            &[
                "NewGame;a;b;me",
                "BeginRound;a,15;b,14;me,15;BONEYARD,10",
                "DealDominoes;9,3;1,1;5,6",
            ],
        );
        // the deal overrides whatever count the round opened with
        assert_eq!(r.my_hand().len(), 3);
        assert_eq!(r.state().player("a").map(|p| p.count()), Some(15));
        assert_eq!(r.state().boneyard_count(), 10);
        assert_eq!(r.pip_round(), 9);
        feed(
            &mut r,
            &[
                "SetPlayerTurn;a;FIRST",
                "PlayDomino;a;9,2;a",
                "EndPlayerTurn;a;true",
                "SetPlayerTurn;me;FIRST",
            ],
        );
        assert!(r.my_turn());
        assert_eq!(r.state().player("a").map(|p| p.count()), Some(14));
        let a = r.state().train("a").unwrap();
        assert_eq!(a.required(), 2);
        assert!(!a.is_public());
        // the opening play stayed on a's own train, not the shared one
        assert!(r.state().train(MEXICAN_TRAIN).unwrap().is_empty());
    }

    #[test]
    fn hidden_draws_and_playless_turns_track_remotely() {
        let mut r = Replica::new("me");
        feed(
            &mut r,
            &[
                "NewGame;a;me",
                "BeginRound;a,15;me,15;BONEYARD,24",
                "SetPlayerTurn;a;NORMAL",
                "DrawDomino;a",
                "EndPlayerTurn;a;false",
            ],
        );
        assert_eq!(r.state().player("a").map(|p| p.count()), Some(16));
        assert_eq!(r.state().boneyard_count(), 23);
        assert!(r.state().train("a").unwrap().is_public());
    }

    #[test]
    fn my_own_draw_lands_as_a_real_tile() {
        let mut r = Replica::new("me");
        feed(
            &mut r,
            &[
                "NewGame;a;me",
                "BeginRound;a,15;me,15;BONEYARD,24",
                "DealDominoes;1,2;3,4",
                "SetPlayerTurn;me;NORMAL",
                "DrawDomino;me",
                "AddDomino;9,9",
            ],
        );
        assert_eq!(r.my_hand().len(), 3);
        assert!(r.my_hand().contains(&d(9, 9)));
        assert_eq!(r.state().player("me").map(|p| p.count()), Some(3));
        assert_eq!(r.state().boneyard_count(), 23);
    }

    #[test]
    fn scores_count_down_to_game_over() {
        let mut r = Replica::new("me");
        feed(&mut r, &["NewGame;a;me"]);
        assert_eq!(r.pip_round(), 9);
        for round in 0..10 {
            assert!(!r.is_game_over(), "over after {} rounds", round);
            feed(&mut r, &["AddRoundScores;true;a,5;me,8"]);
        }
        assert!(r.is_game_over());
        assert_eq!(r.score().map(|s| s.total("me")), Some(80));
    }

    #[test]
    fn replayed_facts_use_a_blank_seat_harmlessly() {
        let mut r = Replica::new("me");
        feed(
            &mut r,
            &[
                "NewGame;a;me",
                "BeginRound;a,12;me,13;BONEYARD,5",
                "SetPlayerTurn; ;FIRST",
                "PlayDomino; ;9,9;a",
                "SetPlayerTurn; ;NORMAL",
                "PlayDomino; ;9,4;MEXICAN_TRAIN",
            ],
        );
        // nobody's count moved, only the trains grew
        assert_eq!(r.state().player("a").map(|p| p.count()), Some(12));
        assert_eq!(r.state().player("me").map(|p| p.count()), Some(13));
        assert_eq!(r.state().train("a").unwrap().required(), 9);
        assert_eq!(
            r.state().train(MEXICAN_TRAIN).unwrap().required(),
            4
        );
        // the replayed double opened nothing: it ran under FIRST
        assert_eq!(r.state().open_double(), None);
    }
}
