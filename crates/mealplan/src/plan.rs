use std::collections::{BTreeMap, HashSet};

use mealboard_shared::mealplan::{MealType, SetOutcome, Slot, SlotKey, Writer};
use mealboard_shared::recipe::RecipeId;
use mealboard_shared::{Error, Result, days, ensure_range, month_grid};
use strum::VariantArray;
use time::{Date, Month};

/// Grid of slots over a contiguous, inclusive date range.
///
/// Every date of the range has exactly one slot per [`MealType`]. Slots are
/// never removed, clearing a slot only drops its recipe reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    start: Date,
    end: Date,
    pub(crate) slots: BTreeMap<SlotKey, Slot>,
}

impl Plan {
    pub fn new(start: Date, end: Date) -> Result<Self> {
        ensure_range(start, end)?;

        let slots = days(start, end)
            .flat_map(|date| {
                MealType::VARIANTS
                    .iter()
                    .map(move |meal_type| Slot::empty(date, *meal_type))
            })
            .map(|slot| (slot.key(), slot))
            .collect();

        Ok(Self { start, end, slots })
    }

    /// Six-week grid shown by the month view.
    pub fn month(year: i32, month: Month) -> Result<Self> {
        let (start, end) = month_grid(year, month)?;

        Self::new(start, end)
    }

    /// Builds the grid for the range and overlays the given slots.
    pub fn from_slots(start: Date, end: Date, slots: impl IntoIterator<Item = Slot>) -> Result<Self> {
        let mut plan = Self::new(start, end)?;
        let mut seen = HashSet::new();

        for slot in slots {
            let key = slot.key();
            if !seen.insert(key) {
                return Err(Error::DuplicateSlot(key));
            }

            let Some(existing) = plan.slots.get_mut(&key) else {
                return Err(Error::OutOfRange(key));
            };

            *existing = slot;
        }

        Ok(plan)
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get_slot(&self, date: Date, meal_type: MealType) -> Option<&Slot> {
        self.slots.get(&SlotKey::new(date, meal_type))
    }

    pub fn slot(&self, key: &SlotKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    pub(crate) fn slot_mut(&mut self, date: Date, meal_type: MealType) -> Result<&mut Slot> {
        let key = SlotKey::new(date, meal_type);

        self.slots.get_mut(&key).ok_or(Error::SlotNotFound(key))
    }

    /// Replaces the recipe reference of a slot.
    ///
    /// A [`Writer::Shuffle`] write to a locked slot is dropped and reported
    /// as [`SetOutcome::Locked`]. User writes go through regardless of the
    /// lock.
    pub fn set_slot(
        &mut self,
        date: Date,
        meal_type: MealType,
        recipe_id: Option<RecipeId>,
        writer: Writer,
    ) -> SetOutcome {
        let Some(slot) = self.slots.get_mut(&SlotKey::new(date, meal_type)) else {
            return SetOutcome::Missing;
        };

        if slot.locked && writer == Writer::Shuffle {
            return SetOutcome::Locked;
        }

        if slot.recipe_id == recipe_id {
            return SetOutcome::Unchanged;
        }

        slot.recipe_id = recipe_id;

        SetOutcome::Applied
    }

    /// Slots of the inclusive range, by date then breakfast, lunch, dinner.
    pub fn slots_in_range(&self, start: Date, end: Date) -> impl Iterator<Item = &Slot> {
        let bounds = (start <= end).then(|| SlotKey::first_of(start)..=SlotKey::last_of(end));

        bounds
            .into_iter()
            .flat_map(move |bounds| self.slots.range(bounds))
            .map(|(_, slot)| slot)
    }

    pub fn empty_unlocked_slots(&self, start: Date, end: Date) -> impl Iterator<Item = &Slot> {
        self.slots_in_range(start, end)
            .filter(|slot| slot.is_empty() && !slot.locked)
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// The three slots of a date, empty when the date is outside the plan.
    pub fn day(&self, date: Date) -> impl Iterator<Item = &Slot> {
        self.slots_in_range(date, date)
    }
}
