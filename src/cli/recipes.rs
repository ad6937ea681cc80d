use anyhow::Result;
use mealboard_shared::recipe::RecipeStore;

use crate::config::Config;
use crate::store::load_recipes;

pub fn favorites(config: Config) -> Result<()> {
    let recipes = load_recipes(config.data.recipes_path())?;
    let favorites = recipes.favorites();

    if favorites.is_empty() {
        tracing::info!("no favorite recipes");
    }

    for favorite in favorites {
        println!("{}  {}", favorite.id, favorite.title);
    }

    Ok(())
}
