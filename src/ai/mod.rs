mod chain;
mod plan;
mod planner;

pub use chain::*;
pub use plan::*;
pub use planner::*;
