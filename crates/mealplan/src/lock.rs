use mealboard_shared::Result;
use mealboard_shared::mealplan::{MealType, Slot};
use time::Date;

use crate::Plan;

impl Plan {
    /// Sets the lock flag and returns the previous one. The recipe reference
    /// is left untouched, locking an empty slot keeps it empty.
    pub fn set_lock(&mut self, date: Date, meal_type: MealType, locked: bool) -> Result<bool> {
        let slot = self.slot_mut(date, meal_type)?;
        let previous = slot.locked;
        slot.locked = locked;

        Ok(previous)
    }

    /// Flips the lock flag and returns the new one.
    pub fn toggle_lock(&mut self, date: Date, meal_type: MealType) -> Result<bool> {
        let slot = self.slot_mut(date, meal_type)?;
        slot.locked = !slot.locked;

        Ok(slot.locked)
    }

    pub fn is_locked(&self, date: Date, meal_type: MealType) -> bool {
        self.get_slot(date, meal_type)
            .map(|slot| slot.locked)
            .unwrap_or_default()
    }

    pub fn locked_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots().filter(|slot| slot.locked)
    }
}
