use clap::Parser;
use clap::Subcommand;

/// Mexican Train over a plain TCP line protocol. One machine hosts
/// the authoritative game; everyone else joins it by name.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Host a game for the given roster of seats.
    Host {
        /// Address to listen on for network seats.
        #[arg(long, default_value = "0.0.0.0:7400")]
        bind: String,
        /// Seats as name:kind, where kind is host, network, easy,
        /// medium or hard.
        #[arg(long, value_delimiter = ',', required = true)]
        seats: Vec<String>,
        /// House rule: a play on your own train earns a shot at the
        /// shared train.
        #[arg(long)]
        extra_turn: bool,
        /// Seed the shuffle for a reproducible game.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Join a hosted game.
    Join {
        /// Host address to connect to.
        #[arg(long, default_value = "127.0.0.1:7400")]
        connect: String,
        /// Seat name the host is expecting.
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mexicantrain::log();
    match Cli::parse().command {
        Command::Host {
            bind,
            seats,
            extra_turn,
            seed,
        } => mexicantrain::hosting::run(bind, seats, extra_turn, seed).await,
        Command::Join { connect, name } => mexicantrain::joining::run(connect, name).await,
    }
}
