use super::Post;
use super::SeatLink;
use crate::BONEYARD;
use crate::MEXICAN_TRAIN;
use crate::Pip;
use crate::ai;
use crate::ai::Pile;
use crate::ai::Step;
use crate::console;
use crate::game::GameState;
use crate::game::Player;
use crate::game::ScoreKeeper;
use crate::game::SeatKind;
use crate::game::TurnType;
use crate::protocol::Action;
use crate::protocol::Table;
use crate::tiles::Boneyard;
use crate::tiles::Domino;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Central coordinator for a live game. Holds the only authoritative
/// copy of the state; every other seat replays the action stream.
///
/// The room runs one turn at a time:
/// - host seat: blocking console prompt, re-asked until the move is legal
/// - network seat: waits for that seat's intents off the wire
/// - computer seat: plans the whole turn, then publishes it step by step
///
/// Connection tasks post into the room; the room never blocks on a
/// socket. A lost seat either waits for its player to come back (a
/// rejoin gets a full resync replay) or is handed to a computer.
pub struct Room {
    state: GameState,
    boneyard: Boneyard,
    score: ScoreKeeper,
    links: Vec<SeatLink>,
    posts: UnboundedReceiver<Post>,
    current: usize,
    /// Seat that opened the round, while the opening lap lasts.
    first: Option<usize>,
    /// Consecutive playless turns against an empty boneyard.
    idle_passes: usize,
    drawn: bool,
    played: bool,
    begun: bool,
    over: bool,
    rng: SmallRng,
}

impl Room {
    pub fn new(
        seats: Vec<(String, SeatKind)>,
        extra_turn: bool,
        seed: Option<u64>,
        posts: UnboundedReceiver<Post>,
    ) -> Self {
        let players = seats
            .iter()
            .map(|(name, kind)| Player::new(name.clone(), *kind))
            .collect::<Vec<Player>>();
        let names = seats.iter().map(|(name, _)| name.clone()).collect();
        Self {
            boneyard: Boneyard::new(players.len()),
            score: ScoreKeeper::new(names, Boneyard::max_pip(players.len())),
            state: GameState::new(players, extra_turn),
            links: seats
                .into_iter()
                .map(|(name, _)| SeatLink { name, outbox: None })
                .collect(),
            posts,
            current: 0,
            first: None,
            idle_passes: 0,
            drawn: false,
            played: false,
            begun: false,
            over: false,
            rng: seed.map(SmallRng::seed_from_u64).unwrap_or_else(SmallRng::from_os_rng),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        self.seatings().await;
        self.broadcast(Action::NewGame {
            players: self.names(),
        });
        self.begun = true;
        self.begin_round();
        while !self.over {
            let name = self.links[self.current].name.clone();
            match self.state.player(&name).map(|p| p.kind()) {
                Some(SeatKind::Host) => self.host_turn(&name).await?,
                Some(SeatKind::Network) => self.network_turn(&name).await?,
                Some(_) => self.computer_turn(&name).await?,
                None => anyhow::bail!("no seat named {}", name),
            }
        }
        Ok(())
    }

    /// Blocks until every network seat has a live connection.
    async fn seatings(&mut self) {
        while self.unseated() {
            match self.posts.recv().await {
                Some(Post::Rejoin(name, tx)) => self.handle_rejoin(name, tx),
                Some(Post::Lost(name)) => self.detach(&name),
                Some(Post::Wire(name, _)) => log::warn!("{} is early, no game yet", name),
                None => return,
            }
        }
    }

    fn unseated(&self) -> bool {
        self.links.iter().any(|link| {
            link.outbox.is_none()
                && self.state.player(&link.name).map(|p| p.kind()) == Some(SeatKind::Network)
        })
    }
}

impl Room {
    async fn host_turn(&mut self, name: &str) -> anyhow::Result<()> {
        while !self.over && self.state.is_turn_of(name) {
            self.drain().await?;
            let prompt = self.prompt(name);
            let intent = tokio::task::spawn_blocking(move || console::turn(&prompt)).await?;
            match intent {
                console::Intent::Play(tile, train) => {
                    match self.state.check_play(name, tile, &train) {
                        Ok(()) => self.handle_play(name, tile, &train),
                        Err(e) => println!("{}", e.to_string().red()),
                    }
                }
                console::Intent::Draw => self.handle_draw(name),
                console::Intent::End => {
                    if self.played || self.drawn || self.boneyard.is_empty() {
                        self.handle_end(name, self.played);
                    } else {
                        println!("{}", "draw before passing".red());
                    }
                }
                console::Intent::EndRound => {
                    if self.boneyard.is_empty() {
                        self.end_round();
                    } else {
                        println!("{}", "the boneyard is not empty yet".red());
                    }
                }
            }
        }
        Ok(())
    }

    async fn network_turn(&mut self, name: &str) -> anyhow::Result<()> {
        while !self.over
            && self.state.is_turn_of(name)
            && self.state.player(name).map(|p| p.kind()) == Some(SeatKind::Network)
        {
            match self.posts.recv().await {
                Some(post) => self.handle_post(post).await?,
                None => break,
            }
        }
        Ok(())
    }

    async fn computer_turn(&mut self, name: &str) -> anyhow::Result<()> {
        self.drain().await?;
        let plan = self.plot(name);
        log::debug!("{} planned {} steps", name, plan.steps.len());
        for step in plan.steps {
            tokio::time::sleep(Self::pacing()).await;
            self.step(name, step);
            if self.over {
                return Ok(());
            }
        }
        if self.state.is_turn_of(name) {
            log::warn!("{} finished its plan mid-turn, passing", name);
            self.handle_end(name, self.played);
        }
        Ok(())
    }

    fn plot(&mut self, name: &str) -> ai::Plan {
        let mut rng = SmallRng::from_rng(&mut self.rng);
        let mut stock = Pile {
            boneyard: &mut self.boneyard,
            rng: SmallRng::from_rng(&mut self.rng),
        };
        ai::plan(&self.state, name, &mut stock, &mut rng)
    }

    fn step(&mut self, name: &str, step: Step) {
        match step {
            Step::Draw(tile) => {
                // the tile already left the boneyard while planning
                self.drawn = true;
                self.broadcast(Action::DrawDomino {
                    player: name.to_string(),
                });
                if let Some(p) = self.state.player_mut(name) {
                    p.take(tile);
                }
                self.state.set_boneyard_count(self.boneyard.remaining());
            }
            Step::Play(tile, train) => match self.state.check_play(name, tile, &train) {
                Ok(()) => self.handle_play(name, tile, &train),
                Err(e) => log::warn!("{} planned an illegal move {}: {}", name, tile, e),
            },
            Step::End { .. } => self.handle_end(name, self.played),
        }
    }

    async fn drain(&mut self) -> anyhow::Result<()> {
        while let Ok(post) = self.posts.try_recv() {
            self.handle_post(post).await?;
        }
        Ok(())
    }

    async fn handle_post(&mut self, post: Post) -> anyhow::Result<()> {
        match post {
            Post::Wire(from, action) => {
                self.handle_wire(&from, action);
                Ok(())
            }
            Post::Rejoin(name, tx) => {
                self.handle_rejoin(name, tx);
                Ok(())
            }
            Post::Lost(name) => self.handle_lost(name).await,
        }
    }

    /// A seat may only speak for itself; everything else is dropped.
    fn handle_wire(&mut self, from: &str, action: Action) {
        let sender = match &action {
            Action::PlayDomino { player, .. }
            | Action::DrawDomino { player }
            | Action::EndPlayerTurn { player, .. } => player.clone(),
            _ => {
                log::warn!("{} sent a host-only action: {}", from, action);
                return;
            }
        };
        if sender != from {
            log::warn!("{} claimed to be {}", from, sender);
            return;
        }
        action.apply(self);
    }

    fn handle_rejoin(&mut self, name: String, tx: UnboundedSender<String>) {
        if self.state.player(&name).map(|p| p.kind()) != Some(SeatKind::Network) {
            log::warn!("{} has no network seat here", name);
            return;
        }
        if let Some(link) = self.links.iter_mut().find(|l| l.name == name) {
            link.outbox = Some(tx);
        }
        log::info!("{} is seated", name);
        if self.begun {
            for action in self.replay(&name) {
                self.unicast(&name, action);
            }
            // turn-local flags do not survive the replay, and the fresh
            // client starts its turn from scratch; restart the draw
            // budget with it or a mid-draw reconnect can never move
            if self.links[self.current].name == name {
                self.drawn = false;
            }
        }
    }

    async fn handle_lost(&mut self, name: String) -> anyhow::Result<()> {
        match self.links.iter().find(|l| l.name == name) {
            // a newer connection already took the seat over
            Some(link) if link.outbox.as_ref().is_some_and(|tx| !tx.is_closed()) => {
                return Ok(());
            }
            Some(_) => {}
            None => return Ok(()),
        }
        self.detach(&name);
        if self.state.player(&name).map(|p| p.kind()) != Some(SeatKind::Network) || !self.begun {
            return Ok(());
        }
        log::warn!("lost the connection to {}", name);
        let asked = name.clone();
        match tokio::task::spawn_blocking(move || console::disconnect(&asked)).await? {
            console::Decision::Wait => {}
            console::Decision::Replace(kind) => {
                if let Some(p) = self.state.player_mut(&name) {
                    p.set_kind(kind);
                }
                log::info!("{} is now driven by {}", name, kind);
            }
        }
        Ok(())
    }

    fn detach(&mut self, name: &str) {
        if let Some(link) = self.links.iter_mut().find(|l| l.name == name) {
            link.outbox = None;
        }
    }
}

impl Room {
    /// Applies an accepted play and works out what the turn becomes.
    /// The caller has already run the legality ladder.
    fn handle_play(&mut self, player: &str, tile: Domino, owner: &str) {
        let turn = self.state.turn();
        self.state.played(player, tile, owner);
        self.played = true;
        self.idle_passes = 0;
        self.broadcast(Action::PlayDomino {
            player: player.to_string(),
            domino: tile,
            train: owner.to_string(),
        });
        let emptied = self.state.player(player).map(|p| p.count()) == Some(0);
        if turn != TurnType::First && emptied {
            self.end_round();
        } else if turn == TurnType::First {
            self.announce(player, TurnType::First);
        } else if tile.is_double() {
            // the same player gets first crack at covering it
            self.announce(player, TurnType::SatisfyDouble);
        } else if turn == TurnType::SatisfyDouble {
            self.close_turn(player, true);
        } else if self.state.extra_turn() && turn == TurnType::Normal && owner != MEXICAN_TRAIN {
            self.announce(player, TurnType::MexicanTrainOnly);
        } else {
            self.close_turn(player, true);
        }
    }

    fn handle_draw(&mut self, player: &str) {
        if !self.state.is_turn_of(player) {
            log::warn!("{} drew out of turn", player);
            return;
        }
        if self.drawn {
            log::warn!("{} drew twice in one turn", player);
            return;
        }
        match self.boneyard.draw(&mut self.rng) {
            Some(tile) => {
                self.drawn = true;
                self.broadcast(Action::DrawDomino {
                    player: player.to_string(),
                });
                self.unicast(player, Action::AddDomino { domino: tile });
                if let Some(p) = self.state.player_mut(player) {
                    p.take(tile);
                }
                self.state.set_boneyard_count(self.boneyard.remaining());
            }
            None => log::warn!("{}: {}", player, crate::game::Rejection::BoneyardEmpty),
        }
    }

    fn handle_end(&mut self, player: &str, has_played: bool) {
        if !self.state.is_turn_of(player) {
            log::warn!("{} ended a turn that was not theirs", player);
            return;
        }
        if !has_played && self.boneyard.is_empty() {
            self.idle_passes += 1;
        } else if !has_played {
            self.idle_passes = 0;
        }
        self.close_turn(player, has_played);
    }

    fn close_turn(&mut self, player: &str, has_played: bool) {
        self.state.turn_ended(player, has_played);
        self.broadcast(Action::EndPlayerTurn {
            player: player.to_string(),
            has_played,
        });
        if self.idle_passes >= self.links.len() {
            log::info!("nobody can move, the round is blocked");
            self.end_round();
            return;
        }
        self.advance();
    }

    fn advance(&mut self) {
        self.drawn = false;
        self.played = false;
        self.current = (self.current + 1) % self.links.len();
        if self.first == Some(self.current) {
            // the opening lap wrapped
            self.first = None;
            if self.state.players().iter().any(|p| p.count() == 0) {
                self.end_round();
                return;
            }
        }
        let turn = if self.first.is_some() {
            TurnType::First
        } else if self.state.open_double().is_some() {
            TurnType::SatisfyDouble
        } else {
            TurnType::Normal
        };
        let name = self.links[self.current].name.clone();
        self.announce(&name, turn);
    }

    fn announce(&mut self, player: &str, turn: TurnType) {
        self.state.set_turn(player, turn);
        self.broadcast(Action::SetPlayerTurn {
            player: player.to_string(),
            turn,
        });
    }

    fn begin_round(&mut self) {
        let pip = self.score.pip_round() as Pip;
        self.state.new_round(pip);
        self.boneyard.rebuild();
        let starter = self
            .boneyard
            .deal(self.state.players_mut(), pip, &mut self.rng);
        self.state.set_boneyard_count(self.boneyard.remaining());
        self.first = Some(starter);
        self.current = starter;
        self.idle_passes = 0;
        self.drawn = false;
        self.played = false;
        let counts = self
            .state
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.count()))
            .chain(std::iter::once((
                BONEYARD.to_string(),
                self.boneyard.remaining(),
            )))
            .collect();
        self.broadcast(Action::BeginRound { counts });
        for link in self.links.iter().map(|l| l.name.clone()).collect::<Vec<String>>() {
            if let Some(hand) = self.state.player(&link).map(|p| p.hand().to_vec()) {
                self.unicast(&link, Action::DealDominoes { dominoes: hand });
            }
        }
        let starter = self.links[starter].name.clone();
        log::info!("round at {} opens with {}", pip, starter);
        self.announce(&starter, TurnType::First);
    }

    fn end_round(&mut self) {
        let scores = ScoreKeeper::tally(self.state.players());
        self.score.add_round(&scores);
        self.broadcast(Action::AddRoundScores {
            display: true,
            scores,
        });
        console::scores(&self.score);
        if self.score.is_game_over() {
            self.over = true;
            if let Some((winner, total)) = self.score.standings().into_iter().next() {
                log::info!("{} wins with {}", winner, total);
                println!("{} wins with {}", winner.green().bold(), total);
            }
        } else {
            self.begin_round();
        }
    }

    /// Rebuilds a reconnecting replica from nothing: past scores, the
    /// round baseline, then every train replayed as anonymous facts.
    /// Replay runs under FIRST so no replayed double hangs; a genuinely
    /// open double is held back and replayed after the phase flips.
    fn replay(&self, name: &str) -> Vec<Action> {
        let mut actions = vec![Action::NewGame {
            players: self.names(),
        }];
        for round in 1..=self.score.rounds_finished() {
            actions.push(Action::AddRoundScores {
                display: false,
                scores: self.score.round_scores(round),
            });
        }
        let counts = self
            .state
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.count()))
            .chain(std::iter::once((
                BONEYARD.to_string(),
                self.boneyard.remaining(),
            )))
            .collect();
        actions.push(Action::BeginRound { counts });
        if let Some(p) = self.state.player(name) {
            actions.push(Action::DealDominoes {
                dominoes: p.hand().to_vec(),
            });
        }
        actions.push(Action::SetPlayerTurn {
            player: " ".to_string(),
            turn: TurnType::First,
        });
        let pending = self.state.open_double();
        let mut hanging = None;
        for train in self.state.trains() {
            let mut tiles = train.tiles();
            if pending == Some(train.owner()) {
                if let Some((last, rest)) = tiles.split_last() {
                    hanging = Some((*last, train.owner().to_string()));
                    tiles = rest;
                }
            }
            for tile in tiles {
                actions.push(Action::PlayDomino {
                    player: " ".to_string(),
                    domino: *tile,
                    train: train.owner().to_string(),
                });
            }
        }
        if let Some((tile, owner)) = hanging {
            actions.push(Action::SetPlayerTurn {
                player: " ".to_string(),
                turn: TurnType::Normal,
            });
            actions.push(Action::PlayDomino {
                player: " ".to_string(),
                domino: tile,
                train: owner,
            });
        }
        for train in self.state.trains() {
            if !train.is_shared() && train.is_public() {
                actions.push(Action::EndPlayerTurn {
                    player: train.owner().to_string(),
                    has_played: false,
                });
            }
        }
        if let Some(current) = self.state.current() {
            actions.push(Action::SetPlayerTurn {
                player: current.to_string(),
                turn: self.state.turn(),
            });
        }
        actions
    }
}

impl Room {
    fn names(&self) -> Vec<String> {
        self.links.iter().map(|l| l.name.clone()).collect()
    }

    fn prompt(&self, name: &str) -> console::Prompt {
        console::Prompt {
            board: self.state.to_string(),
            hand: self
                .state
                .player(name)
                .map(|p| p.hand().to_vec())
                .unwrap_or_default(),
            trains: console::train_order(&self.names()),
            can_draw: !self.drawn && !self.played && !self.boneyard.is_empty(),
            can_end: self.played || self.drawn || self.boneyard.is_empty(),
            can_end_round: self.boneyard.is_empty(),
        }
    }

    fn broadcast(&mut self, action: Action) {
        log::debug!("{}", action);
        let line = action.to_string();
        self.links
            .iter()
            .filter_map(|l| l.outbox.as_ref().map(|tx| (l.name.as_str(), tx)))
            .map(|(name, tx)| (name, tx.send(line.clone())))
            .filter_map(|(name, sent)| sent.err().map(|e| (name, e)))
            .for_each(|(name, e)| log::warn!("failed broadcast to {}: {}", name, e));
    }

    fn unicast(&mut self, name: &str, action: Action) {
        self.links
            .iter()
            .find(|l| l.name == name)
            .and_then(|l| l.outbox.as_ref())
            .map(|tx| tx.send(action.to_string()))
            .and_then(|sent| sent.err())
            .inspect(|e| log::warn!("failed unicast to {}: {}", name, e));
    }

    fn pacing() -> std::time::Duration {
        std::time::Duration::from_millis(600)
    }
}

/// Wire intents land here after the sender check. Everything the host
/// alone may say is meaningless inbound and only logged.
impl Table for Room {
    fn play(&mut self, player: &str, domino: Domino, train: &str) {
        match self.state.check_play(player, domino, train) {
            Ok(()) => self.handle_play(player, domino, train),
            Err(e) => log::warn!("rejected {} from {}: {}", domino, player, e),
        }
    }
    fn draw(&mut self, player: &str) {
        self.handle_draw(player);
    }
    /// The host tracks whether this turn played; the wire flag only
    /// reflects what the sender believes and is ignored.
    fn end_turn(&mut self, player: &str, _: bool) {
        self.handle_end(player, self.played);
    }
    fn new_game(&mut self, _: Vec<String>) {
        log::warn!("only the host starts games");
    }
    fn begin_round(&mut self, _: Vec<(String, usize)>) {
        log::warn!("only the host begins rounds");
    }
    fn set_hand(&mut self, _: Vec<Domino>) {
        log::warn!("only the host deals");
    }
    fn add_to_hand(&mut self, _: Domino) {
        log::warn!("only the host deals");
    }
    fn set_turn(&mut self, _: &str, _: TurnType) {
        log::warn!("only the host assigns turns");
    }
    fn add_scores(&mut self, _: Vec<(String, u32)>, _: bool) {
        log::warn!("only the host scores rounds");
    }
}
