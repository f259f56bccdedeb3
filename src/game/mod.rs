mod error;
mod player;
mod score;
mod state;
mod train;
mod turn;

pub use error::*;
pub use player::*;
pub use score::*;
pub use state::*;
pub use train::*;
pub use turn::*;
