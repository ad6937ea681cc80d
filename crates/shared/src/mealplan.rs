use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

use crate::recipe::RecipeId;
use crate::{Error, format_date, parse_date};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The three fixed categories of a day. Declaration order is the display
/// order of a day.
#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn parse(value: &str) -> crate::Result<Self> {
        Self::from_str(value.trim()).map_err(|_| Error::InvalidMealType(value.to_owned()))
    }
}

/// Identity of a slot. Orders by date first, then meal type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
}

impl SlotKey {
    pub fn new(date: Date, meal_type: MealType) -> Self {
        Self { date, meal_type }
    }

    /// Smallest key of a day.
    pub fn first_of(date: Date) -> Self {
        Self::new(date, MealType::Breakfast)
    }

    /// Largest key of a day.
    pub fn last_of(date: Date) -> Self {
        Self::new(date, MealType::Dinner)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", format_date(self.date), self.meal_type)
    }
}

impl FromStr for SlotKey {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((date, meal_type)) = value.split_once('|') else {
            return Err(Error::InvalidSlotId(value.to_owned()));
        };

        Ok(Self::new(parse_date(date)?, MealType::parse(meal_type)?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meal_type: MealType,
    pub recipe_id: Option<RecipeId>,
    pub locked: bool,
}

impl Slot {
    pub fn empty(date: Date, meal_type: MealType) -> Self {
        Self {
            date,
            meal_type,
            recipe_id: None,
            locked: false,
        }
    }

    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.date, self.meal_type)
    }

    pub fn is_empty(&self) -> bool {
        self.recipe_id.is_none()
    }
}

/// Who is writing to a slot. Only user writes may override a lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Writer {
    User,
    Shuffle,
}

/// Result of a slot write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    Applied,
    Unchanged,
    /// Dropped because the slot is locked and the writer may not override it.
    Locked,
    /// No slot with that key exists in the plan.
    Missing,
}

impl SetOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SetOutcome::Applied)
    }
}

/// One recipe placed into one slot by the shuffle engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub slot: SlotKey,
    pub recipe_id: RecipeId,
    pub title: String,
}

/// Recoverable conditions reported next to a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Notice {
    /// Shuffle requested with no favorites, nothing was assigned.
    EmptyFavoritesPool,
    /// A slot points to a recipe the store no longer has.
    UnresolvableRecipe { slot: SlotKey, recipe_id: RecipeId },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyFavoritesPool => f.write_str("no favorite recipes to shuffle"),
            Notice::UnresolvableRecipe { slot, recipe_id } => {
                write!(f, "slot {slot} references unknown recipe {recipe_id}")
            }
        }
    }
}
