use crate::MEXICAN_TRAIN;
use crate::game::ScoreKeeper;
use crate::game::SeatKind;
use crate::tiles::Domino;
use colored::Colorize;
use dialoguer::Select;

/// What a local player decided to do with their turn.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Play(Domino, String),
    Draw,
    End,
    /// Host only: score the round now that the boneyard is dry.
    EndRound,
}

/// Snapshot handed to the blocking prompt. Owned strings only, since
/// the prompt runs off the async runtime.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub board: String,
    pub hand: Vec<Domino>,
    pub trains: Vec<String>,
    pub can_draw: bool,
    pub can_end: bool,
    pub can_end_round: bool,
}

/// Asks the local player for their next move. Legality is checked by
/// the caller, which re-prompts on a rejection.
pub fn turn(prompt: &Prompt) -> Intent {
    println!("{}", prompt.board);
    let mut choices = prompt
        .hand
        .iter()
        .map(|tile| format!("play {}", tile.label(tile.one())))
        .collect::<Vec<String>>();
    let mut extras = Vec::new();
    if prompt.can_draw {
        choices.push("draw from the boneyard".to_string());
        extras.push(Intent::Draw);
    }
    if prompt.can_end {
        choices.push("end turn".to_string());
        extras.push(Intent::End);
    }
    if prompt.can_end_round {
        choices.push("end the round".to_string());
        extras.push(Intent::EndRound);
    }
    let choice = Select::new()
        .with_prompt("your move")
        .report(false)
        .items(choices.as_slice())
        .default(0)
        .interact()
        .unwrap();
    if choice < prompt.hand.len() {
        let train = Select::new()
            .with_prompt("onto which train")
            .report(false)
            .items(prompt.trains.as_slice())
            .default(0)
            .interact()
            .unwrap();
        Intent::Play(prompt.hand[choice], prompt.trains[train].clone())
    } else {
        extras[choice - prompt.hand.len()].clone()
    }
}

/// What the host does about a seat that dropped its connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Wait,
    Replace(SeatKind),
}

pub fn disconnect(name: &str) -> Decision {
    let choices = [
        "wait for them to reconnect",
        "hand the seat to an easy computer",
        "hand the seat to a medium computer",
        "hand the seat to a hard computer",
    ];
    let choice = Select::new()
        .with_prompt(format!("{} disconnected", name.red()))
        .report(false)
        .items(choices.as_slice())
        .default(0)
        .interact()
        .unwrap();
    match choice {
        1 => Decision::Replace(SeatKind::Easy),
        2 => Decision::Replace(SeatKind::Medium),
        3 => Decision::Replace(SeatKind::Hard),
        _ => Decision::Wait,
    }
}

/// Prints the running score sheet, one column per player, lowest
/// total leading.
pub fn scores(keeper: &ScoreKeeper) {
    let names = keeper.names().collect::<Vec<&str>>();
    let header = names
        .iter()
        .map(|name| format!("{:>12}", name))
        .collect::<Vec<String>>()
        .join("");
    println!("{:>8}{}", "round", header.bold());
    for round in 1..=keeper.rounds_finished() {
        let row = names
            .iter()
            .map(|name| {
                keeper
                    .round_scores(round)
                    .into_iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, s)| format!("{:>12}", s))
                    .unwrap_or_else(|| format!("{:>12}", "-"))
            })
            .collect::<Vec<String>>()
            .join("");
        println!("{:>8}{}", round, row);
    }
    let totals = names
        .iter()
        .map(|name| format!("{:>12}", keeper.total(name)))
        .collect::<Vec<String>>()
        .join("");
    println!("{:>8}{}", "total", totals.yellow());
    if let Some((leader, total)) = keeper.standings().into_iter().next() {
        println!("{} leads with {}", leader.green(), total);
    }
}

/// Roster order with the shared train last, the way plays are offered.
pub fn train_order(players: &[String]) -> Vec<String> {
    players
        .iter()
        .cloned()
        .chain(std::iter::once(MEXICAN_TRAIN.to_string()))
        .collect()
}
