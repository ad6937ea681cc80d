use anyhow::Result;
use mealboard_mealplan::PlanStore;
use mealboard_shopping::{Command, ShoppingList};
use time::Date;

use crate::config::Config;
use crate::store::JsonStore;

#[tracing::instrument(skip(config))]
pub fn shopping_list(
    config: Config,
    start: Option<Date>,
    end: Option<Date>,
    json: bool,
) -> Result<()> {
    let (start, end) = super::resolve_range(start, end, super::today())?;
    let store = JsonStore::open(&config.data)?;
    let plan = store.plans.load_plan(start, end)?;

    let list = Command::new(&store.recipes).shopping_list(&plan, start, end)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        print_list(&list);
    }

    Ok(())
}

/// Meals of one day followed by what to buy for them.
#[tracing::instrument(skip(config))]
pub fn today(config: Config, date: Option<Date>) -> Result<()> {
    let date = date.unwrap_or_else(super::today);
    let store = JsonStore::open(&config.data)?;
    let plan = store.plans.load_plan(date, date)?;

    let meals = mealboard_mealplan::Command::new(&store.recipes);
    println!("{date}");
    for meal in meals.day(&plan, date).meals {
        let title = meal.recipe.map(|recipe| recipe.title.as_str()).unwrap_or("-");
        println!("  {}: {title}", meal.slot.meal_type);
    }

    let list = Command::new(&store.recipes).for_day(&plan, date)?;
    if !list.is_empty() {
        println!();
        print_list(&list);
    }

    Ok(())
}

fn print_list(list: &ShoppingList) {
    for entry in &list.entries {
        println!("- {entry}");
    }
    for notice in &list.notices {
        println!("note: {notice}");
    }
}
