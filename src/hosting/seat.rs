use crate::protocol::Action;
use tokio::sync::mpsc::UnboundedSender;

/// One seat's link to the outside world. Host and computer seats have
/// no outbox; a network seat loses its outbox while disconnected and
/// gets a fresh one when the player reconnects.
#[derive(Debug)]
pub struct SeatLink {
    pub name: String,
    pub outbox: Option<UnboundedSender<String>>,
}

/// Mail into the room from the connection tasks.
#[derive(Debug)]
pub enum Post {
    /// A decoded line from the named, already-seated player.
    Wire(String, Action),
    /// The named player's connection dropped.
    Lost(String),
    /// A connection completed its name handshake and wants the seat.
    /// The sender carries encoded lines back down its socket.
    Rejoin(String, UnboundedSender<String>),
}
