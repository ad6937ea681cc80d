use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub favorite: bool,
}

impl Recipe {
    pub fn new(id: impl Into<RecipeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ingredients: vec![],
            tags: BTreeSet::new(),
            favorite: false,
        }
    }

    pub fn ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }

    /// Checks the fields the scheduler relies on.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            crate::bail!("recipe id must not be empty");
        }

        if self.title.trim().is_empty() {
            crate::bail!("recipe {} has no title", self.id);
        }

        Ok(())
    }
}

/// Shuffle candidate: the part of a favorite recipe the engine looks at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub id: RecipeId,
    pub title: String,
}

impl From<&Recipe> for Favorite {
    fn from(value: &Recipe) -> Self {
        Favorite {
            id: value.id.to_owned(),
            title: value.title.to_owned(),
        }
    }
}

/// Read access to recipes, already fetched for the current invocation.
pub trait RecipeStore {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe>;

    fn recipes(&self) -> Vec<&Recipe>;

    fn title(&self, id: &RecipeId) -> Option<&str> {
        self.recipe(id).map(|recipe| recipe.title.as_str())
    }

    /// Favorites ordered by id, then title.
    fn favorites(&self) -> Vec<Favorite> {
        let mut favorites = self
            .recipes()
            .into_iter()
            .filter(|recipe| recipe.favorite)
            .map(Favorite::from)
            .collect::<Vec<_>>();

        favorites.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.title.cmp(&b.title)));
        favorites
    }
}

impl<S: RecipeStore + ?Sized> RecipeStore for &S {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        (**self).recipe(id)
    }

    fn recipes(&self) -> Vec<&Recipe> {
        (**self).recipes()
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryRecipes {
    recipes: BTreeMap<RecipeId, Recipe>,
}

impl InMemoryRecipes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a recipe after validating it.
    pub fn insert(&mut self, recipe: Recipe) -> Result<Option<Recipe>> {
        recipe.validate()?;

        Ok(self.recipes.insert(recipe.id.to_owned(), recipe))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeStore for InMemoryRecipes {
    fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    fn recipes(&self) -> Vec<&Recipe> {
        self.recipes.values().collect()
    }
}

impl TryFrom<Vec<Recipe>> for InMemoryRecipes {
    type Error = Error;

    fn try_from(value: Vec<Recipe>) -> Result<Self> {
        let mut store = Self::new();
        for recipe in value {
            store.insert(recipe)?;
        }

        Ok(store)
    }
}
