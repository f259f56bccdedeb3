use super::Plan;
use super::Step;
use super::chain;
use crate::MEXICAN_TRAIN;
use crate::Pip;
use crate::game::GameState;
use crate::game::SeatKind;
use crate::game::TurnType;
use crate::tiles::Boneyard;
use crate::tiles::Domino;
use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Source of face-down tiles while a turn is being planned. The host
/// hands over the live boneyard; tests script the draws instead.
pub trait Stock {
    fn draw(&mut self) -> Option<Domino>;
}

impl Stock for VecDeque<Domino> {
    fn draw(&mut self) -> Option<Domino> {
        self.pop_front()
    }
}

/// The live boneyard, drawing with its own randomness.
pub struct Pile<'a> {
    pub boneyard: &'a mut Boneyard,
    pub rng: SmallRng,
}

impl Stock for Pile<'_> {
    fn draw(&mut self) -> Option<Domino> {
        self.boneyard.draw(&mut self.rng)
    }
}

/// Decides a computer seat's whole turn before anything is published.
///
/// The easy tier walks its hand in shuffled order and takes the first
/// legal tile it sees. The medium and hard tiers search for chains:
/// medium settles for the first chain covering half its hand, hard
/// searches exhaustively and holds back tiles its own train will need.
/// At most one tile is drawn, and only when no play was found first.
pub fn plan<R: Rng>(state: &GameState, seat: &str, stock: &mut dyn Stock, rng: &mut R) -> Plan {
    let Some(player) = state.player(seat) else {
        return Plan::default();
    };
    let kind = player.kind();
    if !kind.is_computer() {
        return Plan::default();
    }
    let hand = player.hand().to_vec();
    let turn = state.turn();
    let (plays, drawn) = match (kind, turn) {
        (SeatKind::Easy, _) => easy(state, seat, &hand, stock, rng),
        (_, TurnType::First) => sharp_first(&hand, required(state, seat), kind, seat, stock),
        (_, TurnType::Normal) => sharp_normal(state, seat, &hand, kind, stock, rng),
        _ => sharp_pinned(state, seat, &hand, kind, stock),
    };

    // The opening lap always hands the turn back explicitly. Elsewhere
    // a turn that plays out the whole hand ends the round by itself,
    // so no end-turn follows it.
    let prev_double = plays.len() >= 2 && plays[plays.len() - 2].0.is_double();
    let mut needs_end = if turn == TurnType::First {
        true
    } else {
        match plays.last() {
            None => true,
            Some((last, owner)) => {
                last.is_double()
                    || (state.extra_turn()
                        && turn == TurnType::Normal
                        && !prev_double
                        && owner != MEXICAN_TRAIN)
            }
        }
    };
    let held = hand.len() + usize::from(drawn.is_some());
    if turn != TurnType::First && plays.len() >= held {
        needs_end = false;
    }

    let played = !plays.is_empty();
    let mut steps = Vec::new();
    if let Some(tile) = drawn {
        steps.push(Step::Draw(tile));
    }
    steps.extend(plays.into_iter().map(|(tile, owner)| Step::Play(tile, owner)));
    if needs_end {
        steps.push(Step::End { played });
    }
    Plan { steps }
}

type Moves = (Vec<(Domino, String)>, Option<Domino>);

fn easy<R: Rng>(
    state: &GameState,
    seat: &str,
    hand: &[Domino],
    stock: &mut dyn Stock,
    rng: &mut R,
) -> Moves {
    let mut plays: Vec<(Domino, String)> = Vec::new();
    let mut drawn = None;
    let mut shuffled = hand.to_vec();
    shuffled.shuffle(rng);
    match state.turn() {
        TurnType::First => {
            let mut pip = required(state, seat);
            while let Some(tile) = first_playable(pip, &shuffled) {
                remove(&mut shuffled, tile);
                plays.push((tile, seat.to_string()));
                pip = tile.other(pip);
            }
            if plays.is_empty() {
                if let Some(tile) = stock.draw() {
                    drawn = Some(tile);
                    if tile.matches(pip) {
                        // the drawn tile restarts the greedy walk
                        let mut next = Some(tile);
                        while let Some(tile) = next {
                            remove(&mut shuffled, tile);
                            plays.push((tile, seat.to_string()));
                            pip = tile.other(pip);
                            next = first_playable(pip, &shuffled);
                        }
                    }
                }
            }
        }
        TurnType::Normal => {
            if let Some(tile) = first_playable(required(state, seat), &shuffled) {
                remove(&mut shuffled, tile);
                plays.push((tile, seat.to_string()));
            } else {
                let mut owners = public_owners(state, seat);
                while !owners.is_empty() {
                    let owner = owners.remove(rng.random_range(0..owners.len()));
                    if let Some(tile) = first_playable(required(state, &owner), &shuffled) {
                        remove(&mut shuffled, tile);
                        plays.push((tile, owner));
                        break;
                    }
                }
            }
            if plays.is_empty() || (state.extra_turn() && !plays[0].0.is_double()) {
                if let Some(tile) = first_playable(required(state, MEXICAN_TRAIN), &shuffled) {
                    remove(&mut shuffled, tile);
                    plays.push((tile, MEXICAN_TRAIN.to_string()));
                }
            }
            if plays.is_empty() {
                if let Some(tile) = stock.draw() {
                    drawn = Some(tile);
                    if tile.matches(required(state, seat)) {
                        plays.push((tile, seat.to_string()));
                    } else {
                        let mut owners = public_owners(state, seat);
                        owners.push(MEXICAN_TRAIN.to_string());
                        while !owners.is_empty() {
                            let owner = owners.remove(rng.random_range(0..owners.len()));
                            if tile.matches(required(state, &owner)) {
                                plays.push((tile, owner));
                                break;
                            }
                        }
                    }
                }
            }
            if let Some((last, owner)) = plays.last().cloned() {
                if last.is_double() {
                    if let Some(tile) = first_playable(last.one(), &shuffled) {
                        plays.push((tile, owner));
                    }
                }
            }
        }
        _ => {
            let owner = pinned_owner(state, seat);
            let pip = required(state, &owner);
            if let Some(tile) = first_playable(pip, &shuffled) {
                remove(&mut shuffled, tile);
                plays.push((tile, owner.clone()));
            } else if let Some(tile) = stock.draw() {
                drawn = Some(tile);
                if tile.matches(pip) {
                    plays.push((tile, owner.clone()));
                }
            }
            if let Some((first, _)) = plays.first().cloned() {
                if first.is_double() {
                    if let Some(tile) = first_playable(first.one(), &shuffled) {
                        plays.push((tile, owner));
                    }
                }
            }
        }
    }
    (plays, drawn)
}

fn sharp_first(
    hand: &[Domino],
    own_pip: Pip,
    kind: SeatKind,
    seat: &str,
    stock: &mut dyn Stock,
) -> Moves {
    let cap = (kind == SeatKind::Medium).then(|| (hand.len() + 1) / 2);
    let mut plays: Vec<(Domino, String)> =
        chain::highest_score_chain(hand, own_pip, Vec::new(), cap)
            .into_iter()
            .map(|tile| (tile, seat.to_string()))
            .collect();
    let mut drawn = None;
    if plays.is_empty() {
        if let Some(tile) = stock.draw() {
            drawn = Some(tile);
            if tile.matches(own_pip) {
                plays = chain::highest_score_chain(hand, tile.other(own_pip), vec![tile], cap)
                    .into_iter()
                    .map(|tile| (tile, seat.to_string()))
                    .collect();
            }
        }
    }
    (plays, drawn)
}

fn sharp_normal<R: Rng>(
    state: &GameState,
    seat: &str,
    hand: &[Domino],
    kind: SeatKind,
    stock: &mut dyn Stock,
    rng: &mut R,
) -> Moves {
    let mut plays: Vec<(Domino, String)> = Vec::new();
    let mut drawn = None;
    let mut available = hand.to_vec();

    // hard opens the longest chain its own train can carry
    if kind == SeatKind::Hard {
        let best = chain::longest_chain(&available, required(state, seat));
        if let Some(&head) = best.first() {
            remove(&mut available, head);
            plays.push((head, seat.to_string()));
        }
    }
    if plays.is_empty() {
        if let Some(tile) = highest_playable(required(state, seat), &available) {
            remove(&mut available, tile);
            plays.push((tile, seat.to_string()));
        }
    }
    if plays.is_empty() {
        let mut owners = public_owners(state, seat);
        let mut best: Option<(Domino, String)> = None;
        while !owners.is_empty() {
            let owner = owners.remove(rng.random_range(0..owners.len()));
            if let Some(tile) = highest_playable(required(state, &owner), &available) {
                if best.as_ref().is_none_or(|(b, _)| tile.score() > b.score()) {
                    best = Some((tile, owner));
                }
            }
        }
        if let Some((tile, owner)) = best {
            remove(&mut available, tile);
            plays.push((tile, owner));
        }
    }
    if plays.is_empty() || (state.extra_turn() && !plays[0].0.is_double()) {
        let pip = required(state, MEXICAN_TRAIN);
        let pool = if !plays.is_empty() && kind == SeatKind::Hard {
            unreserved(&available, required(state, seat))
        } else {
            available.clone()
        };
        if let Some(tile) = highest_playable(pip, &pool) {
            remove(&mut available, tile);
            plays.push((tile, MEXICAN_TRAIN.to_string()));
        }
    }
    if plays.is_empty() {
        if let Some(tile) = stock.draw() {
            drawn = Some(tile);
            if tile.matches(required(state, seat)) {
                plays.push((tile, seat.to_string()));
            } else {
                let mut owners = public_owners(state, seat);
                owners.push(MEXICAN_TRAIN.to_string());
                while !owners.is_empty() {
                    let owner = owners.remove(rng.random_range(0..owners.len()));
                    if tile.matches(required(state, &owner)) {
                        plays.push((tile, owner));
                        break;
                    }
                }
            }
        }
    }
    if let Some((last, owner)) = plays.last().cloned() {
        if last.is_double() {
            if let Some(tile) = cover(last.one(), &available, state, seat, kind) {
                plays.push((tile, owner));
            }
        }
    }
    (plays, drawn)
}

fn sharp_pinned(
    state: &GameState,
    seat: &str,
    hand: &[Domino],
    kind: SeatKind,
    stock: &mut dyn Stock,
) -> Moves {
    let owner = pinned_owner(state, seat);
    let pip = required(state, &owner);
    let mut plays: Vec<(Domino, String)> = Vec::new();
    let mut drawn = None;
    let mut available = hand.to_vec();

    if kind == SeatKind::Hard {
        if let Some(tile) = highest_playable(pip, &unreserved(&available, required(state, seat))) {
            remove(&mut available, tile);
            plays.push((tile, owner.clone()));
        }
    }
    if plays.is_empty() {
        if let Some(tile) = highest_playable(pip, &available) {
            remove(&mut available, tile);
            plays.push((tile, owner.clone()));
        } else if let Some(tile) = stock.draw() {
            drawn = Some(tile);
            if tile.matches(pip) {
                plays.push((tile, owner.clone()));
            }
        }
    }
    if let Some((first, _)) = plays.first().cloned() {
        if first.is_double() {
            if let Some(tile) = cover(first.one(), &available, state, seat, kind) {
                plays.push((tile, owner));
            }
        }
    }
    (plays, drawn)
}

/// Picks a tile to cover a just-played double. Hard tries to spend a
/// tile its own train has no use for before dipping into the rest.
fn cover(
    pip: Pip,
    available: &[Domino],
    state: &GameState,
    seat: &str,
    kind: SeatKind,
) -> Option<Domino> {
    (kind == SeatKind::Hard)
        .then(|| highest_playable(pip, &unreserved(available, required(state, seat))))
        .flatten()
        .or_else(|| highest_playable(pip, available))
}

/// Everything except the longest own-train chain, minus that chain's
/// caboose, which is expendable.
fn unreserved(available: &[Domino], own_pip: Pip) -> Vec<Domino> {
    let mut reserved = chain::longest_chain(available, own_pip);
    reserved.pop();
    let mut pool = available.to_vec();
    for tile in reserved {
        remove(&mut pool, tile);
    }
    pool
}

fn required(state: &GameState, owner: &str) -> Pip {
    state.train(owner).map(|t| t.required()).unwrap_or_default()
}

fn pinned_owner(state: &GameState, seat: &str) -> String {
    if state.turn() == TurnType::MexicanTrainOnly {
        MEXICAN_TRAIN.to_string()
    } else {
        state.open_double().unwrap_or(seat).to_string()
    }
}

fn first_playable(pip: Pip, tiles: &[Domino]) -> Option<Domino> {
    tiles.iter().find(|tile| tile.matches(pip)).copied()
}

fn highest_playable(pip: Pip, tiles: &[Domino]) -> Option<Domino> {
    let mut best: Option<Domino> = None;
    for tile in tiles.iter().filter(|tile| tile.matches(pip)) {
        if best.is_none_or(|b| tile.score() > b.score()) {
            best = Some(*tile);
        }
    }
    best
}

fn public_owners(state: &GameState, seat: &str) -> Vec<String> {
    state
        .trains()
        .iter()
        .filter(|t| !t.is_shared() && t.owner() != seat && t.is_public())
        .map(|t| t.owner().to_string())
        .collect()
}

fn remove(tiles: &mut Vec<Domino>, tile: Domino) {
    if let Some(i) = tiles.iter().position(|held| *held == tile) {
        tiles.remove(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use rand::SeedableRng;

    fn d(one: u8, two: u8) -> Domino {
        Domino::new(one, two)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn fixture(kind: SeatKind, hand: &[Domino], turn: TurnType, extra: bool) -> GameState {
        let players = vec![
            Player::new("ai", kind),
            Player::new("1", SeatKind::Network),
            Player::new("2", SeatKind::Network),
            Player::new("3", SeatKind::Network),
        ];
        let mut state = GameState::new(players, extra);
        state.new_round(12);
        if let Some(p) = state.player_mut("ai") {
            p.set_hand(hand.to_vec());
        }
        state.set_turn("ai", turn);
        state
    }

    fn play(tile: Domino, owner: &str) -> Step {
        Step::Play(tile, owner.to_string())
    }

    #[test]
    fn human_seats_get_no_plan() {
        let state = fixture(SeatKind::Host, &[d(12, 1)], TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert!(plan.is_empty());
    }

    #[test]
    fn easy_first_with_nothing_passes() {
        let state = fixture(SeatKind::Easy, &[], TurnType::First, false);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(plan.steps, vec![Step::End { played: false }]);
    }

    #[test]
    fn easy_first_draw_miss_passes() {
        let state = fixture(SeatKind::Easy, &[], TurnType::First, false);
        let mut stock = VecDeque::from([d(1, 1), d(12, 12)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(1, 1)), Step::End { played: false }]
        );
    }

    #[test]
    fn easy_first_plays_the_drawn_tile() {
        let state = fixture(SeatKind::Easy, &[], TurnType::First, false);
        let mut stock = VecDeque::from([d(12, 12), d(1, 1)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![
                Step::Draw(d(12, 12)),
                play(d(12, 12), "ai"),
                Step::End { played: true },
            ]
        );
    }

    #[test]
    fn easy_first_chains_greedily() {
        // every link is forced, so the shuffle cannot change the walk
        let hand = [d(11, 12), d(1, 2), d(2, 4), d(11, 9), d(9, 4)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::First, false);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(
            plan.steps,
            vec![
                play(d(12, 11), "ai"),
                play(d(11, 9), "ai"),
                play(d(9, 4), "ai"),
                play(d(4, 2), "ai"),
                play(d(2, 1), "ai"),
                Step::End { played: true },
            ]
        );
    }

    #[test]
    fn easy_first_drawn_tile_restarts_the_walk() {
        let hand = [d(1, 3), d(2, 4), d(11, 9), d(9, 4), d(1, 2)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::First, false);
        let mut stock = VecDeque::from([d(11, 12)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(plan.drew(), Some(d(11, 12)));
        let plays: Vec<Domino> = plan.plays().map(|(tile, _)| *tile).collect();
        assert_eq!(
            plays,
            vec![d(12, 11), d(11, 9), d(9, 4), d(4, 2), d(2, 1), d(1, 3)]
        );
        assert_eq!(plan.ends_turn(), Some(true));
    }

    #[test]
    fn easy_normal_with_nothing_draws_then_passes() {
        let state = fixture(SeatKind::Easy, &[], TurnType::Normal, true);
        let mut stock = VecDeque::from([d(1, 1), d(12, 12)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(1, 1)), Step::End { played: false }]
        );
    }

    #[test]
    fn easy_normal_emptying_play_skips_the_end_turn() {
        // the drawn tile is the whole hand; playing it ends the round,
        // so no end-turn follows
        let state = fixture(SeatKind::Easy, &[], TurnType::Normal, true);
        let mut stock = VecDeque::from([d(12, 11), d(1, 1)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(12, 11)), play(d(12, 11), "ai")]
        );
    }

    #[test]
    fn easy_normal_own_play_keeps_the_extra_turn_open() {
        let hand = [d(11, 12), d(1, 2), d(2, 4), d(11, 9), d(9, 4)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(
            plan.steps,
            vec![play(d(12, 11), "ai"), Step::End { played: true }]
        );
    }

    #[test]
    fn easy_normal_double_waits_for_satisfaction() {
        let hand = [d(12, 12), d(1, 4)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::Normal, true);
        let mut stock = VecDeque::from([d(12, 4), d(1, 3)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![play(d(12, 12), "ai"), Step::End { played: true }]
        );
    }

    #[test]
    fn easy_normal_spends_both_twelves() {
        // whichever tile the shuffle turns up first, the other one
        // follows it, and the emptied hand ends the round on its own
        let hand = [d(12, 12), d(12, 4)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        let plays: Vec<Domino> = plan.plays().map(|(tile, _)| *tile).collect();
        assert_eq!(plays.len(), 2);
        assert!(plays.contains(&d(12, 12)));
        assert!(plays.contains(&d(12, 4)));
        assert_eq!(plan.ends_turn(), None);
    }

    #[test]
    fn medium_normal_follows_its_own_double() {
        let hand = [d(12, 12), d(12, 4), d(1, 2)];
        let state = fixture(SeatKind::Medium, &hand, TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        // the cover play resolves the double, so the room advances the
        // turn without an explicit end
        assert_eq!(
            plan.steps,
            vec![play(d(12, 12), "ai"), play(d(12, 4), "ai")]
        );
    }

    #[test]
    fn easy_mexican_only_draw_miss_passes() {
        let hand = [d(11, 11), d(3, 4), d(5, 6)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::MexicanTrainOnly, true);
        let mut stock = VecDeque::from([d(5, 4), d(1, 3)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(5, 4)), Step::End { played: false }]
        );
    }

    #[test]
    fn easy_mexican_only_play_advances_by_itself() {
        let hand = [d(11, 11), d(3, 4), d(5, 6), d(12, 11)];
        let state = fixture(SeatKind::Easy, &hand, TurnType::MexicanTrainOnly, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(plan.steps, vec![play(d(12, 11), MEXICAN_TRAIN)]);
    }

    fn satisfy_fixture(kind: SeatKind, hand: &[Domino], pip: Pip) -> GameState {
        let mut state = fixture(kind, hand, TurnType::Normal, false);
        if let Some(t) = state.train_mut(MEXICAN_TRAIN) {
            t.restart(pip);
        }
        state.set_turn("1", TurnType::Normal);
        state.played("1", d(pip, pip), MEXICAN_TRAIN);
        state.set_turn("ai", TurnType::SatisfyDouble);
        state
    }

    #[test]
    fn easy_satisfies_the_open_double() {
        let state = satisfy_fixture(SeatKind::Easy, &[d(10, 11), d(12, 11)], 12);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(plan.steps, vec![play(d(12, 11), MEXICAN_TRAIN)]);
    }

    #[test]
    fn easy_satisfy_draw_hit_plays_immediately() {
        let state = satisfy_fixture(SeatKind::Easy, &[d(10, 11)], 12);
        let mut stock = VecDeque::from([d(12, 11), d(12, 10)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(12, 11)), play(d(12, 11), MEXICAN_TRAIN)]
        );
    }

    #[test]
    fn easy_satisfy_draw_miss_passes() {
        let state = satisfy_fixture(SeatKind::Easy, &[d(10, 11)], 12);
        let mut stock = VecDeque::from([d(1, 1), d(12, 10)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(
            plan.steps,
            vec![Step::Draw(d(1, 1)), Step::End { played: false }]
        );
    }

    #[test]
    fn hard_first_plays_the_best_chain() {
        let hand = [
            d(1, 5),
            d(1, 7),
            d(1, 6),
            d(12, 1),
            d(12, 11),
            d(8, 6),
            d(6, 6),
            d(7, 2),
            d(8, 10),
        ];
        let state = fixture(SeatKind::Hard, &hand, TurnType::First, false);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(
            plan.steps,
            vec![
                play(d(12, 1), "ai"),
                play(d(1, 6), "ai"),
                play(d(6, 6), "ai"),
                play(d(6, 8), "ai"),
                play(d(8, 10), "ai"),
                Step::End { played: true },
            ]
        );
    }

    #[test]
    fn hard_first_chains_off_the_drawn_tile() {
        let hand = [d(1, 5), d(1, 1), d(5, 11), d(7, 2), d(2, 11)];
        let state = fixture(SeatKind::Hard, &hand, TurnType::First, false);
        let mut stock = VecDeque::from([d(12, 1)]);
        let plan = plan(&state, "ai", &mut stock, &mut rng());
        assert_eq!(plan.drew(), Some(d(12, 1)));
        let plays: Vec<Domino> = plan.plays().map(|(tile, _)| *tile).collect();
        assert_eq!(
            plays,
            vec![d(12, 1), d(1, 1), d(1, 5), d(5, 11), d(11, 2), d(2, 7)]
        );
        assert_eq!(plan.ends_turn(), Some(true));
    }

    #[test]
    fn medium_first_settles_early() {
        let hand = [d(12, 1), d(1, 2), d(12, 11), d(11, 10)];
        let state = fixture(SeatKind::Medium, &hand, TurnType::First, false);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        let plays: Vec<Domino> = plan.plays().map(|(tile, _)| *tile).collect();
        assert_eq!(plays, vec![d(12, 1), d(1, 2)]);
    }

    #[test]
    fn hard_normal_opens_its_longest_chain() {
        // 12-1 heads the longest chain even though 12-11 scores more
        let hand = [d(12, 1), d(1, 1), d(12, 11)];
        let state = fixture(SeatKind::Hard, &hand, TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(
            plan.steps,
            vec![play(d(12, 1), "ai"), play(d(12, 11), MEXICAN_TRAIN)]
        );
    }

    #[test]
    fn medium_normal_takes_the_points() {
        let hand = [d(12, 1), d(1, 1), d(12, 11)];
        let state = fixture(SeatKind::Medium, &hand, TurnType::Normal, true);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(
            plan.steps,
            vec![play(d(12, 11), "ai"), play(d(12, 1), MEXICAN_TRAIN)]
        );
    }

    #[test]
    fn hard_satisfy_spares_its_own_chain() {
        let hand = [d(12, 4), d(4, 6), d(6, 6), d(4, 1)];
        let state = satisfy_fixture(SeatKind::Hard, &hand, 4);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(plan.steps, vec![play(d(4, 1), MEXICAN_TRAIN)]);
    }

    #[test]
    fn medium_satisfy_spends_the_points() {
        let hand = [d(12, 4), d(4, 6), d(6, 6), d(4, 1)];
        let state = satisfy_fixture(SeatKind::Medium, &hand, 4);
        let plan = plan(&state, "ai", &mut VecDeque::<Domino>::new(), &mut rng());
        assert_eq!(plan.steps, vec![play(d(12, 4), MEXICAN_TRAIN)]);
    }

    #[test]
    fn plans_never_play_tiles_they_do_not_hold() {
        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let hand: Vec<Domino> = (0..8)
                .map(|_| d(rng.random_range(0..=12), rng.random_range(0..=12)))
                .collect();
            for kind in [SeatKind::Easy, SeatKind::Medium, SeatKind::Hard] {
                for turn in [TurnType::First, TurnType::Normal] {
                    let state = fixture(kind, &hand, turn, true);
                    let mut stock = VecDeque::from([d(12, 3), d(2, 2)]);
                    let plan = plan(&state, "ai", &mut stock, &mut rng);
                    let mut pool = hand.clone();
                    if let Some(tile) = plan.drew() {
                        pool.push(tile);
                    }
                    for (tile, _) in plan.plays() {
                        let held = pool.iter().position(|p| p == tile);
                        assert!(held.is_some(), "played a tile it never held");
                        pool.remove(held.unwrap_or_default());
                    }
                }
            }
        }
    }
}
