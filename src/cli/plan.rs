use anyhow::Result;
use mealboard_mealplan::{Command, Plan, PlanStore, load_weeks, persist_slots};
use mealboard_shared::days;
use mealboard_shared::mealplan::{SetOutcome, SlotKey};
use mealboard_shared::recipe::RecipeId;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::Date;

use crate::config::Config;
use crate::store::JsonStore;

#[tracing::instrument(skip(config))]
pub fn shuffle(
    config: Config,
    start: Option<Date>,
    end: Option<Date>,
    seed: Option<u64>,
) -> Result<()> {
    let (start, end) = super::resolve_range(start, end, super::today())?;
    let mut store = JsonStore::open(&config.data)?;
    let mut plan = load_weeks(&store.plans, start, end)?;
    let command = Command::new(&store.recipes);

    let report = match seed.or(config.shuffle.seed) {
        Some(seed) => {
            command.shuffle_with(&mut plan, start, end, &mut StdRng::seed_from_u64(seed))?
        }
        None => command.shuffle(&mut plan, start, end)?,
    };

    let written = persist_slots(
        &mut store.plans,
        &plan,
        report.assignments.iter().map(|assignment| assignment.slot),
    )?;
    if written > 0 {
        store.plans.save()?;
    }

    for assignment in &report.assignments {
        println!("{}  {}", assignment.slot, assignment.title);
    }
    if !report.unfilled.is_empty() {
        println!(
            "{} slot(s) left empty, every favorite is already used that week",
            report.unfilled.len()
        );
    }
    for notice in &report.notices {
        println!("note: {notice}");
    }

    Ok(())
}

/// Sets the lock when `state` is given, toggles it otherwise.
#[tracing::instrument(skip(config))]
pub fn lock(config: Config, key: SlotKey, state: Option<bool>) -> Result<()> {
    let mut store = JsonStore::open(&config.data)?;
    let mut plan = store.plans.load_plan(key.date, key.date)?;
    let command = Command::new(&store.recipes);

    let locked = match state {
        Some(locked) => {
            command.set_lock(&mut plan, key.date, key.meal_type, locked)?;
            locked
        }
        None => command.toggle_lock(&mut plan, key.date, key.meal_type)?,
    };

    persist_slots(&mut store.plans, &plan, [key])?;
    store.plans.save()?;

    println!("{key} {}", if locked { "locked" } else { "unlocked" });

    Ok(())
}

#[tracing::instrument(skip(config))]
pub fn assign(config: Config, key: SlotKey, recipe_id: String) -> Result<()> {
    let mut store = JsonStore::open(&config.data)?;
    let mut plan = store.plans.load_plan(key.date, key.date)?;
    let command = Command::new(&store.recipes);

    let outcome = command.assign(&mut plan, key.date, key.meal_type, RecipeId::from(recipe_id))?;
    write_outcome(&mut store, &plan, key, outcome)
}

#[tracing::instrument(skip(config))]
pub fn clear(config: Config, key: SlotKey) -> Result<()> {
    let mut store = JsonStore::open(&config.data)?;
    let mut plan = store.plans.load_plan(key.date, key.date)?;
    let command = Command::new(&store.recipes);

    let outcome = command.clear(&mut plan, key.date, key.meal_type)?;
    write_outcome(&mut store, &plan, key, outcome)
}

fn write_outcome(
    store: &mut JsonStore,
    plan: &Plan,
    key: SlotKey,
    outcome: SetOutcome,
) -> Result<()> {
    if outcome.is_applied() {
        persist_slots(&mut store.plans, plan, [key])?;
        store.plans.save()?;
        println!("{key} updated");
    } else {
        println!("{key} unchanged");
    }

    Ok(())
}

/// Prints the slot grid, one date per line, locked slots marked with `*`.
pub fn show(config: Config, start: Option<Date>, end: Option<Date>) -> Result<()> {
    let (start, end) = super::resolve_range(start, end, super::today())?;
    let store = JsonStore::open(&config.data)?;
    let plan = store.plans.load_plan(start, end)?;
    let command = Command::new(&store.recipes);

    for date in days(start, end) {
        let cells = command
            .day(&plan, date)
            .meals
            .iter()
            .map(|meal| {
                let title = match (&meal.slot.recipe_id, meal.recipe) {
                    (_, Some(recipe)) => recipe.title.to_owned(),
                    (Some(id), None) => format!("?{id}"),
                    (None, None) => "-".to_owned(),
                };
                let marker = if meal.slot.locked { "*" } else { "" };

                format!("{}: {title}{marker}", meal.slot.meal_type)
            })
            .collect::<Vec<_>>();

        let weekday = date.weekday().to_string();
        println!("{date} {}  {}", &weekday[..3], cells.join("  "));
    }

    Ok(())
}
