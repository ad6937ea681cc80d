use std::ops::Deref;

use mealboard_shared::mealplan::{MealType, SetOutcome, Slot, SlotKey, Writer};
use mealboard_shared::recipe::{Recipe, RecipeId, RecipeStore};
use mealboard_shared::{Error, Result, ensure_range};
use rand::Rng;
use time::Date;

use crate::Plan;
use crate::shuffle::{ShuffleReport, apply_shuffle, plan_shuffle};

/// Operations a caller issues against a plan it owns.
pub struct Command<S> {
    store: S,
}

impl<S> Deref for Command<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl<S: RecipeStore> Command<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn shuffle(&self, plan: &mut Plan, start: Date, end: Date) -> Result<ShuffleReport> {
        self.shuffle_with(plan, start, end, &mut rand::rng())
    }

    /// Fills the empty, unlocked slots of the range from the favorites of
    /// the store. The returned report only lists assignments that were
    /// applied to the plan.
    #[tracing::instrument(skip_all, fields(start = %start, end = %end))]
    pub fn shuffle_with<R: Rng + ?Sized>(
        &self,
        plan: &mut Plan,
        start: Date,
        end: Date,
        rng: &mut R,
    ) -> Result<ShuffleReport> {
        ensure_range(start, end)?;

        let favorites = self.store.favorites();
        let mut report = plan_shuffle(plan, start, end, &favorites, &self.store, rng);

        for notice in &report.notices {
            tracing::warn!(%notice, "shuffle");
        }

        report.assignments = apply_shuffle(plan, &report);

        for assignment in &report.assignments {
            tracing::debug!(slot = %assignment.slot, title = %assignment.title, "assigned");
        }

        tracing::info!(
            favorites = favorites.len(),
            assigned = report.assignments.len(),
            unfilled = report.unfilled.len(),
            "shuffle completed"
        );

        Ok(report)
    }

    /// Explicit user assignment. Overrides a lock.
    pub fn assign(
        &self,
        plan: &mut Plan,
        date: Date,
        meal_type: MealType,
        recipe_id: RecipeId,
    ) -> Result<SetOutcome> {
        if self.store.recipe(&recipe_id).is_none() {
            return Err(Error::RecipeNotFound(recipe_id));
        }

        user_write(plan, date, meal_type, Some(recipe_id))
    }

    /// Removes the recipe from a slot. The slot itself stays in the plan.
    pub fn clear(&self, plan: &mut Plan, date: Date, meal_type: MealType) -> Result<SetOutcome> {
        user_write(plan, date, meal_type, None)
    }

    pub fn set_lock(
        &self,
        plan: &mut Plan,
        date: Date,
        meal_type: MealType,
        locked: bool,
    ) -> Result<bool> {
        let previous = plan.set_lock(date, meal_type, locked)?;
        tracing::info!(slot = %SlotKey::new(date, meal_type), locked, previous, "lock set");

        Ok(previous)
    }

    pub fn toggle_lock(&self, plan: &mut Plan, date: Date, meal_type: MealType) -> Result<bool> {
        let locked = plan.toggle_lock(date, meal_type)?;
        tracing::info!(slot = %SlotKey::new(date, meal_type), locked, "lock toggled");

        Ok(locked)
    }

    /// Meals of one date with their recipes resolved.
    pub fn day<'a>(&'a self, plan: &'a Plan, date: Date) -> DayMeals<'a> {
        let meals = plan
            .day(date)
            .map(|slot| DayMeal {
                recipe: slot
                    .recipe_id
                    .as_ref()
                    .and_then(|id| self.store.recipe(id)),
                slot,
            })
            .collect();

        DayMeals { date, meals }
    }
}

fn user_write(
    plan: &mut Plan,
    date: Date,
    meal_type: MealType,
    recipe_id: Option<RecipeId>,
) -> Result<SetOutcome> {
    match plan.set_slot(date, meal_type, recipe_id, Writer::User) {
        SetOutcome::Missing => Err(Error::SlotNotFound(SlotKey::new(date, meal_type))),
        outcome => Ok(outcome),
    }
}

pub struct DayMeal<'a> {
    pub slot: &'a Slot,
    /// `None` for an empty slot or a reference the store cannot resolve.
    pub recipe: Option<&'a Recipe>,
}

pub struct DayMeals<'a> {
    pub date: Date,
    pub meals: Vec<DayMeal<'a>>,
}

impl DayMeals<'_> {
    pub fn meal(&self, meal_type: MealType) -> Option<&Recipe> {
        self.meals
            .iter()
            .find(|meal| meal.slot.meal_type == meal_type)
            .and_then(|meal| meal.recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealboard_shared::recipe::InMemoryRecipes;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::date;

    fn command() -> Command<InMemoryRecipes> {
        Command::new(
            InMemoryRecipes::try_from(vec![
                Recipe::new("1", "Oatmeal").favorite(),
                Recipe::new("2", "Salad"),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn assign_rejects_unknown_recipe() {
        let day = date!(2024 - 06 - 03);
        let mut plan = Plan::new(day, day).unwrap();

        let err = command()
            .assign(&mut plan, day, MealType::Lunch, "404".into())
            .unwrap_err();
        assert!(matches!(err, Error::RecipeNotFound(_)));
    }

    #[test]
    fn assign_and_clear_override_locks() {
        let day = date!(2024 - 06 - 03);
        let mut plan = Plan::new(day, day).unwrap();
        let command = command();
        command.set_lock(&mut plan, day, MealType::Lunch, true).unwrap();

        let outcome = command
            .assign(&mut plan, day, MealType::Lunch, "2".into())
            .unwrap();
        assert_eq!(outcome, SetOutcome::Applied);
        assert_eq!(command.day(&plan, day).meal(MealType::Lunch).unwrap().title, "Salad");

        let outcome = command.clear(&mut plan, day, MealType::Lunch).unwrap();
        assert_eq!(outcome, SetOutcome::Applied);
        assert!(plan.is_locked(day, MealType::Lunch));
        assert!(command.day(&plan, day).meal(MealType::Lunch).is_none());
    }

    #[test]
    fn clear_outside_plan_fails() {
        let day = date!(2024 - 06 - 03);
        let mut plan = Plan::new(day, day).unwrap();

        let err = command()
            .clear(&mut plan, date!(2024 - 06 - 10), MealType::Lunch)
            .unwrap_err();
        assert!(matches!(err, Error::SlotNotFound(_)));
    }

    #[test]
    fn shuffle_rejects_inverted_range() {
        let day = date!(2024 - 06 - 03);
        let mut plan = Plan::new(day, day).unwrap();

        let err = command()
            .shuffle(&mut plan, day, date!(2024 - 06 - 01))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn shuffle_applies_to_plan() {
        let day = date!(2024 - 06 - 03);
        let mut plan = Plan::new(day, day).unwrap();
        let command = command();

        let report = command
            .shuffle_with(&mut plan, day, day, &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(report.assignments.len(), 1);
        assert_eq!(report.unfilled.len(), 2);
        let slot = plan.slot(&report.assignments[0].slot).unwrap();
        assert_eq!(slot.recipe_id, Some("1".into()));

        let day_meals = command.day(&plan, day);
        assert_eq!(day_meals.meals.len(), 3);
        assert_eq!(day_meals.date, day);
    }
}
