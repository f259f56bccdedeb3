mod client;
mod replica;

pub use client::*;
pub use replica::*;
