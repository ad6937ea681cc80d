mod date;
mod error;
pub mod mealplan;
pub mod recipe;

pub use date::*;
pub use error::*;
