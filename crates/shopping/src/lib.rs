mod aggregation;
mod command;
mod list;

pub use aggregation::*;
pub use command::*;
pub use list::*;
