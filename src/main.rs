use anyhow::Result;
use clap::{Parser, Subcommand};
use mealboard::cli::{self, parse_date_arg, parse_slot_arg};
use mealboard_shared::mealplan::SlotKey;
use time::Date;

/// mealboard - meal plan scheduling
#[derive(Parser)]
#[command(name = "mealboard")]
#[command(about = "Shuffle favorites into a meal plan, lock slots, build shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill empty, unlocked slots with favorites, no title twice in a week
    Shuffle {
        /// First date (YYYY-MM-DD), defaults to the current month grid
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<Date>,

        /// Last date (YYYY-MM-DD), defaults to the current month grid
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<Date>,

        /// Seed for a reproducible shuffle (overrides config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Toggle the lock of a slot, or set it with --on / --off
    Lock {
        /// Slot id, YYYY-MM-DD|meal
        #[arg(value_parser = parse_slot_arg)]
        slot: SlotKey,

        #[arg(long, conflicts_with = "off")]
        on: bool,

        #[arg(long)]
        off: bool,
    },
    /// Put a recipe into a slot, locked or not
    Assign {
        /// Slot id, YYYY-MM-DD|meal
        #[arg(value_parser = parse_slot_arg)]
        slot: SlotKey,

        recipe_id: String,
    },
    /// Remove the recipe from a slot
    Clear {
        /// Slot id, YYYY-MM-DD|meal
        #[arg(value_parser = parse_slot_arg)]
        slot: SlotKey,
    },
    /// Aggregated ingredients of a date range
    ShoppingList {
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<Date>,

        #[arg(long, value_parser = parse_date_arg)]
        end: Option<Date>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Meals and shopping list of one day, today by default
    Today {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<Date>,
    },
    /// Slot grid of a date range, locked slots marked with *
    Show {
        #[arg(long, value_parser = parse_date_arg)]
        start: Option<Date>,

        #[arg(long, value_parser = parse_date_arg)]
        end: Option<Date>,
    },
    /// List favorite recipes
    Favorites,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealboard::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealboard::observability::init_observability(
        "mealboard",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Shuffle { start, end, seed } => cli::plan::shuffle(config, start, end, seed),
        Commands::Lock { slot, on, off } => {
            let state = match (on, off) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cli::plan::lock(config, slot, state)
        }
        Commands::Assign { slot, recipe_id } => cli::plan::assign(config, slot, recipe_id),
        Commands::Clear { slot } => cli::plan::clear(config, slot),
        Commands::ShoppingList { start, end, json } => {
            cli::shopping::shopping_list(config, start, end, json)
        }
        Commands::Today { date } => cli::shopping::today(config, date),
        Commands::Show { start, end } => cli::plan::show(config, start, end),
        Commands::Favorites => cli::recipes::favorites(config),
    }
}
