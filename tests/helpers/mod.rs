use std::path::Path;

use mealboard::config::DataConfig;
use serde_json::json;

/// Writes a `recipes.json` with three favorites and one plain recipe.
pub fn write_recipes(dir: &Path) -> anyhow::Result<()> {
    let recipes = json!({
        "r-oat": {
            "uuid": "r-oat",
            "title": "Oatmeal",
            "ingredients": ["Oats", "Milk"],
            "tags": ["breakfast"],
            "isFavorite": true,
            "source": "family",
            "default_servings": 2
        },
        "r-taco": {
            "uuid": "r-taco",
            "title": "Tacos",
            "ingredients": [
                {"item": "Tortillas", "unit": "pcs", "quantity": 8},
                {"item": "milk", "unit": "ml", "quantity": 100}
            ],
            "isFavorite": true
        },
        "r-curry": {
            "uuid": "r-curry",
            "title": "Curry",
            "ingredients": ["Rice", "Coconut milk"],
            "isFavorite": true
        },
        "r-soup": {
            "uuid": "r-soup",
            "title": "Soup",
            "ingredients": ["Leeks"]
        },
        "r-broken": {
            "uuid": "r-broken",
            "title": "   "
        }
    });

    std::fs::write(dir.join("recipes.json"), serde_json::to_string_pretty(&recipes)?)?;

    Ok(())
}

pub fn data_config(dir: &Path) -> DataConfig {
    DataConfig {
        dir: dir.to_path_buf(),
        ..Default::default()
    }
}
