use mealboard_mealplan::Plan;
use mealboard_shared::mealplan::Notice;
use mealboard_shared::recipe::RecipeStore;
use mealboard_shared::{Result, ensure_range};
use serde::Serialize;
use time::Date;

use crate::{IngredientAggregationService, ShoppingListEntry};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    #[serde(with = "iso_date")]
    pub start: Date,
    #[serde(with = "iso_date")]
    pub end: Date,
    pub entries: Vec<ShoppingListEntry>,
    pub notices: Vec<Notice>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects the ingredients of every assigned slot in the inclusive range.
/// Slots whose recipe cannot be resolved are skipped and reported.
pub fn build_shopping_list<S>(plan: &Plan, store: &S, start: Date, end: Date) -> Result<ShoppingList>
where
    S: RecipeStore + ?Sized,
{
    ensure_range(start, end)?;

    let mut notices = vec![];
    let mut ingredients: Vec<&str> = vec![];

    for slot in plan.slots_in_range(start, end) {
        let Some(recipe_id) = slot.recipe_id.as_ref() else {
            continue;
        };

        let Some(recipe) = store.recipe(recipe_id) else {
            notices.push(Notice::UnresolvableRecipe {
                slot: slot.key(),
                recipe_id: recipe_id.to_owned(),
            });
            continue;
        };

        ingredients.extend(recipe.ingredients.iter().map(String::as_str));
    }

    Ok(ShoppingList {
        start,
        end,
        entries: IngredientAggregationService::aggregate(ingredients),
        notices,
    })
}
