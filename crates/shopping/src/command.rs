use std::ops::Deref;

use mealboard_mealplan::Plan;
use mealboard_shared::Result;
use mealboard_shared::recipe::RecipeStore;
use time::Date;

use crate::{ShoppingList, build_shopping_list};

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

    #[tracing::instrument(skip_all, fields(start = %start, end = %end))]
    pub fn shopping_list(&self, plan: &Plan, start: Date, end: Date) -> Result<ShoppingList> {
        let list = build_shopping_list(plan, &self.store, start, end)?;

        for notice in &list.notices {
            tracing::warn!(%notice, "shopping list");
        }

        tracing::info!(entries = list.entries.len(), "shopping list built");

        Ok(list)
    }

    /// Shopping list of a single date.
    pub fn for_day(&self, plan: &Plan, date: Date) -> Result<ShoppingList> {
        self.shopping_list(plan, date, date)
    }
}
