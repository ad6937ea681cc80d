mod command;
mod lock;
mod plan;
pub mod shuffle;
mod store;

pub use command::*;
pub use plan::*;
pub use shuffle::{ShuffleReport, apply_shuffle, plan_shuffle};
pub use store::*;
