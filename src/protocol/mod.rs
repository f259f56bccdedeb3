mod action;
mod table;

pub use action::*;
pub use table::*;
