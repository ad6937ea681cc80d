pub mod cli;
pub mod config;
pub mod observability;
pub mod store;

pub use config::Config;
pub use store::{JsonPlans, JsonStore, load_recipes};
