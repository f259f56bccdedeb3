mod room;
mod seat;
mod server;

pub use room::*;
pub use seat::*;
pub use server::*;

use crate::BONEYARD;
use crate::MAX_PLAYERS;
use crate::MEXICAN_TRAIN;
use crate::MIN_PLAYERS;
use crate::game::SeatKind;
use crate::sanitize;
use anyhow::Context;
use anyhow::bail;
use tokio::sync::mpsc::unbounded_channel;

/// Hosts a game: parses the roster, listens for network seats if any,
/// and runs the room to completion.
pub async fn run(
    bind: String,
    entries: Vec<String>,
    extra_turn: bool,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let seats = roster(&entries)?;
    let (posts, inbox) = unbounded_channel();
    if seats.iter().any(|(_, kind)| *kind == SeatKind::Network) {
        tokio::spawn(async move {
            if let Err(e) = Server::run(bind, posts).await {
                log::error!("server stopped: {}", e);
            }
        });
    }
    Room::new(seats, extra_turn, seed, inbox).run().await
}

/// Parses `name:kind` seat entries into a validated roster.
pub fn roster(entries: &[String]) -> anyhow::Result<Vec<(String, SeatKind)>> {
    let seats = entries
        .iter()
        .map(|entry| seat(entry))
        .collect::<anyhow::Result<Vec<(String, SeatKind)>>>()?;
    if seats.len() < MIN_PLAYERS || seats.len() > MAX_PLAYERS {
        bail!(
            "a table seats {} to {} players, not {}",
            MIN_PLAYERS,
            MAX_PLAYERS,
            seats.len()
        );
    }
    for (i, (name, _)) in seats.iter().enumerate() {
        if name == MEXICAN_TRAIN || name == BONEYARD {
            bail!("{} is a reserved name", name);
        }
        if seats.iter().skip(i + 1).any(|(other, _)| other == name) {
            bail!("{} is seated twice", name);
        }
    }
    if seats.iter().filter(|(_, k)| *k == SeatKind::Host).count() > 1 {
        bail!("only one seat can sit at this console");
    }
    Ok(seats)
}

fn seat(entry: &str) -> anyhow::Result<(String, SeatKind)> {
    let (name, kind) = entry
        .split_once(':')
        .with_context(|| format!("seat {:?} is not name:kind", entry))?;
    let name = sanitize(name);
    if name.is_empty() {
        bail!("seat {:?} has no usable name", entry);
    }
    let kind = SeatKind::try_from(kind)
        .map_err(|e| anyhow::anyhow!("seat {:?}: {}", entry, e))?;
    Ok((name, kind))
}
