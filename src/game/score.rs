use super::Player;
use crate::Pip;

/// Running score sheet. Rounds count down from the engine pip of the
/// largest double in the set; the game ends when the counter passes
/// zero. Every player has a score recorded for every finished round.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    sheet: Vec<(String, Vec<u32>)>,
    pip_round: i32,
}

impl ScoreKeeper {
    pub fn new(names: Vec<String>, max_pip: Pip) -> Self {
        Self {
            sheet: names.into_iter().map(|n| (n, Vec::new())).collect(),
            pip_round: i32::from(max_pip),
        }
    }

    /// Engine pip of the round in progress. Negative once the game is over.
    pub fn pip_round(&self) -> i32 {
        self.pip_round
    }
    pub fn is_game_over(&self) -> bool {
        self.pip_round < 0
    }
    pub fn rounds_finished(&self) -> usize {
        self.sheet.first().map(|(_, r)| r.len()).unwrap_or(0)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheet.iter().map(|(n, _)| n.as_str())
    }

    /// Closes the round: records one score per player and moves the
    /// engine down a pip. Players missing from `scores` record a zero.
    pub fn add_round(&mut self, scores: &[(String, u32)]) {
        for (name, rounds) in self.sheet.iter_mut() {
            let score = scores
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, s)| *s)
                .unwrap_or(0);
            rounds.push(score);
        }
        self.pip_round -= 1;
    }

    /// Scores of one finished round, 1-indexed in play order.
    pub fn round_scores(&self, round: usize) -> Vec<(String, u32)> {
        self.sheet
            .iter()
            .filter_map(|(name, rounds)| rounds.get(round - 1).map(|s| (name.clone(), *s)))
            .collect()
    }

    pub fn total(&self, name: &str) -> u32 {
        self.sheet
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rounds)| rounds.iter().sum())
            .unwrap_or(0)
    }

    /// Current standings, lowest total first.
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut totals: Vec<(String, u32)> = self
            .sheet
            .iter()
            .map(|(name, rounds)| (name.clone(), rounds.iter().sum()))
            .collect();
        totals.sort_by_key(|(_, total)| *total);
        totals
    }

    /// Pip totals of everything still held, one entry per seat.
    pub fn tally(players: &[Player]) -> Vec<(String, u32)> {
        players
            .iter()
            .map(|p| (p.name().to_string(), p.score()))
            .collect()
    }
}
