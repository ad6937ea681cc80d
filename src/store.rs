//! JSON files shared with the web backend.
//!
//! `recipes.json` maps a uuid to a recipe record. `meals_data.json` nests
//! month (`YYYY-MM`), then day (`YYYY-MM-DD`), then meal type, and each meal
//! entry carries `recipe_uuid`, `servings` and `locked`. Fields this crate
//! does not know about are written back as they were read.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mealboard_mealplan::{Plan, PlanStore};
use mealboard_shared::mealplan::{MealType, Slot, Writer};
use mealboard_shared::recipe::{InMemoryRecipes, Recipe, RecipeId};
use mealboard_shared::{format_date, parse_date};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::Date;

use crate::config::DataConfig;

type Days = BTreeMap<String, Map<String, Value>>;
type Months = BTreeMap<String, Days>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MealEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipe_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    servings: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    locked: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientRecord {
    Text(String),
    Item {
        #[serde(default)]
        item: Option<String>,
    },
}

/// Value side of `recipes.json`. The map key is the recipe id, an embedded
/// `uuid` field is ignored.
#[derive(Debug, Deserialize)]
struct RecipeRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    ingredients: Vec<IngredientRecord>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, rename = "isFavorite")]
    is_favorite: bool,
}

impl RecipeRecord {
    fn into_recipe(self, key: &str) -> Recipe {
        let ingredients = self
            .ingredients
            .into_iter()
            .filter_map(|ingredient| match ingredient {
                IngredientRecord::Text(text) => Some(text),
                IngredientRecord::Item { item } => item,
            });

        let recipe = Recipe::new(key, self.title)
            .ingredients(ingredients)
            .tags(self.tags);

        if self.is_favorite { recipe.favorite() } else { recipe }
    }
}

/// Reads `recipes.json`. A missing file is an empty store. Records that fail
/// validation are skipped.
pub fn load_recipes(path: impl AsRef<Path>) -> anyhow::Result<InMemoryRecipes> {
    let path = path.as_ref();
    let mut recipes = InMemoryRecipes::new();

    let Some(records) = read_json::<BTreeMap<String, Value>>(path)? else {
        return Ok(recipes);
    };

    for (key, value) in records {
        let record = match serde_json::from_value::<RecipeRecord>(value) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(recipe = %key, error = %err, "skip malformed recipe");
                continue;
            }
        };

        if let Err(err) = recipes.insert(record.into_recipe(&key)) {
            tracing::warn!(recipe = %key, error = %err, "skip invalid recipe");
        }
    }

    tracing::debug!(path = %path.display(), count = recipes.len(), "recipes loaded");

    Ok(recipes)
}

/// Plan side of `meals_data.json`.
#[derive(Debug)]
pub struct JsonPlans {
    path: PathBuf,
    months: Months,
}

impl JsonPlans {
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let months = read_json::<Months>(&path)?.unwrap_or_default();

        Ok(Self { path, months })
    }

    /// Writes the file back, creating its directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.months)?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "meals saved");

        Ok(())
    }

    fn entries(&self, start: Date, end: Date) -> impl Iterator<Item = (Date, MealType, MealEntry)> {
        self.months
            .values()
            .flat_map(|days| days.iter())
            .filter_map(|(day, meals)| match parse_date(day) {
                Ok(date) => Some((date, meals)),
                Err(_) => {
                    tracing::debug!(day = %day, "skip unparsable day");
                    None
                }
            })
            .filter(move |(date, _)| start <= *date && *date <= end)
            .flat_map(|(date, meals)| {
                meals.iter().filter_map(move |(meal, value)| {
                    let Ok(meal_type) = MealType::parse(meal) else {
                        tracing::debug!(day = %date, meal = %meal, "skip unknown meal type");
                        return None;
                    };

                    match serde_json::from_value::<MealEntry>(value.clone()) {
                        Ok(entry) => Some((date, meal_type, entry)),
                        Err(err) => {
                            tracing::debug!(day = %date, meal = %meal, error = %err, "skip meal entry");
                            None
                        }
                    }
                })
            })
    }
}

impl PlanStore for JsonPlans {
    fn load_plan(&self, start: Date, end: Date) -> anyhow::Result<Plan> {
        let mut plan = Plan::new(start, end)?;

        for (date, meal_type, entry) in self.entries(start, end) {
            let recipe_id = entry
                .recipe_uuid
                .filter(|id| !id.is_empty())
                .map(RecipeId::from);

            plan.set_slot(date, meal_type, recipe_id, Writer::User);
            if entry.locked {
                plan.set_lock(date, meal_type, true)?;
            }
        }

        Ok(plan)
    }

    fn persist_slot(&mut self, slot: &Slot) -> anyhow::Result<()> {
        let month_key = month_key(slot.date);
        let day_key = format_date(slot.date);
        let meal_key = slot.meal_type.to_string();

        if slot.is_empty() && !slot.locked {
            let Some(days) = self.months.get_mut(&month_key) else {
                return Ok(());
            };
            if let Some(meals) = days.get_mut(&day_key) {
                meals.remove(&meal_key);
                if meals.is_empty() {
                    days.remove(&day_key);
                }
            }
            if days.is_empty() {
                self.months.remove(&month_key);
            }

            return Ok(());
        }

        let meals = self
            .months
            .entry(month_key)
            .or_default()
            .entry(day_key)
            .or_default();

        let mut entry = meals
            .get(&meal_key)
            .and_then(|value| serde_json::from_value::<MealEntry>(value.clone()).ok())
            .unwrap_or_default();
        entry.recipe_uuid = slot.recipe_id.as_ref().map(|id| id.as_str().to_owned());
        entry.locked = slot.locked;

        meals.insert(meal_key, serde_json::to_value(entry)?);

        Ok(())
    }
}

/// Both data files, opened once per invocation.
#[derive(Debug)]
pub struct JsonStore {
    pub recipes: InMemoryRecipes,
    pub plans: JsonPlans,
}

impl JsonStore {
    pub fn open(config: &DataConfig) -> anyhow::Result<Self> {
        Ok(Self {
            recipes: load_recipes(config.recipes_path())?,
            plans: JsonPlans::open(config.meals_path())?,
        })
    }
}

fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "data file missing, starting empty");
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(date!(2024 - 06 - 03)), "2024-06");
        assert_eq!(month_key(date!(2024 - 11 - 30)), "2024-11");
    }

    #[test]
    fn object_ingredients_contribute_their_item() {
        let record: RecipeRecord = serde_json::from_value(serde_json::json!({
            "title": "Pancakes",
            "ingredients": ["Milk", {"item": "Flour", "unit": "g", "quantity": 200}, {"unit": "pinch"}],
            "isFavorite": true
        }))
        .unwrap();

        let recipe = record.into_recipe("abc");
        assert_eq!(recipe.id, RecipeId::from("abc"));
        assert_eq!(recipe.ingredients, vec!["Milk", "Flour"]);
        assert!(recipe.favorite);
    }

    #[test]
    fn map_key_is_the_recipe_id() {
        let record: RecipeRecord = serde_json::from_value(serde_json::json!({
            "uuid": "stale-copy",
            "title": "Chili",
            "ingredients": ["Beans"]
        }))
        .unwrap();

        let recipe = record.into_recipe("r-chili");
        assert_eq!(recipe.id, RecipeId::from("r-chili"));
        assert_eq!(recipe.title, "Chili");
    }

    #[test]
    fn locked_entry_without_recipe_serializes_lock_only() {
        let entry = MealEntry {
            locked: true,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(entry).unwrap(),
            serde_json::json!({"locked": true})
        );
    }
}
