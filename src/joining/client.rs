use super::Replica;
use crate::console;
use crate::protocol::Action;
use crate::sanitize;
use colored::Colorize;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;

/// Joins a hosted game and keeps rejoining until the game finishes.
/// Every session starts from nothing; the host's resync replay
/// rebuilds whatever was missed while disconnected.
pub async fn run(connect: String, name: String) -> anyhow::Result<()> {
    let name = sanitize(&name);
    if name.is_empty() {
        anyhow::bail!("nothing usable is left of that name");
    }
    loop {
        match session(&connect, &name).await {
            Ok(true) => return Ok(()),
            Ok(false) => log::warn!("the host hung up, rejoining"),
            Err(e) => log::warn!("connection failed: {}", e),
        }
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    }
}

/// One connection's lifetime. Returns whether the game ended.
async fn session(connect: &str, name: &str) -> anyhow::Result<bool> {
    let socket = TcpStream::connect(connect).await?;
    log::info!("connected to {}", connect);
    let (read, mut write) = socket.into_split();
    write.write_all(name.as_bytes()).await?;
    write.write_all(b"\n").await?;
    let mut lines = BufReader::new(read).lines();
    let mut session = Session {
        replica: Replica::new(name),
        write,
        has_played: false,
        drawn: false,
        pending_draw: false,
    };
    while let Some(line) = lines.next_line().await? {
        match Action::try_from(line.as_str()) {
            Ok(Action::Noop) => log::warn!("unrecognized line: {}", line),
            Ok(action) => {
                if session.follow(action).await? {
                    return Ok(true);
                }
            }
            Err(e) => log::warn!("bad line: {} ({})", line, e),
        }
    }
    Ok(false)
}

struct Session {
    replica: Replica,
    write: OwnedWriteHalf,
    has_played: bool,
    drawn: bool,
    pending_draw: bool,
}

impl Session {
    /// Applies one fact from the host and reacts to it. Returns true
    /// when the game is over.
    async fn follow(&mut self, action: Action) -> anyhow::Result<bool> {
        let me = self.replica.me().to_string();
        action.clone().apply(&mut self.replica);
        match action {
            Action::BeginRound { .. } | Action::EndPlayerTurn { .. } => {
                self.has_played = false;
                self.drawn = false;
            }
            Action::PlayDomino { player, domino, train } => {
                if player == me {
                    self.has_played = true;
                } else if player != " " {
                    println!("{} played {} on {}", player, domino, train);
                }
            }
            Action::DrawDomino { player } => {
                if player == me {
                    self.drawn = true;
                } else {
                    println!("{} drew from the boneyard", player);
                }
            }
            Action::AddDomino { .. } => {
                if self.pending_draw {
                    self.pending_draw = false;
                    self.my_move().await?;
                }
            }
            Action::SetPlayerTurn { player, .. } => {
                if player == me {
                    self.my_move().await?;
                } else if player != " " {
                    println!("{}", self.replica.state());
                }
            }
            Action::AddRoundScores { display, .. } => {
                if display {
                    if let Some(score) = self.replica.score() {
                        console::scores(score);
                    }
                }
                if self.replica.is_game_over() {
                    println!("{}", "the game is over".bold());
                    return Ok(true);
                }
            }
            _ => {}
        }
        Ok(false)
    }

    /// Prompts until the player picks something the shared rules
    /// accept, then sends the intent and waits for the host's echo.
    async fn my_move(&mut self) -> anyhow::Result<()> {
        let me = self.replica.me().to_string();
        loop {
            let state = self.replica.state();
            let names = state
                .players()
                .iter()
                .map(|p| p.name().to_string())
                .collect::<Vec<String>>();
            let prompt = console::Prompt {
                board: state.to_string(),
                hand: self.replica.my_hand().to_vec(),
                trains: console::train_order(&names),
                can_draw: !self.drawn && !self.has_played && state.boneyard_count() > 0,
                can_end: self.has_played || self.drawn || state.boneyard_count() == 0,
                can_end_round: false,
            };
            let intent = tokio::task::spawn_blocking(move || console::turn(&prompt)).await?;
            match intent {
                console::Intent::Play(tile, train) => {
                    match self.replica.state().check_play(&me, tile, &train) {
                        Ok(()) => {
                            return self
                                .send(Action::PlayDomino {
                                    player: me,
                                    domino: tile,
                                    train,
                                })
                                .await;
                        }
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
                console::Intent::Draw => {
                    self.pending_draw = true;
                    return self.send(Action::DrawDomino { player: me }).await;
                }
                console::Intent::End => {
                    return self
                        .send(Action::EndPlayerTurn {
                            player: me,
                            has_played: self.has_played,
                        })
                        .await;
                }
                // never offered to participants
                console::Intent::EndRound => {}
            }
        }
    }

    async fn send(&mut self, action: Action) -> anyhow::Result<()> {
        self.write.write_all(action.to_string().as_bytes()).await?;
        self.write.write_all(b"\n").await?;
        Ok(())
    }
}
