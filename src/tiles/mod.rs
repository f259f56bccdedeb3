mod boneyard;
mod domino;

pub use boneyard::*;
pub use domino::*;
