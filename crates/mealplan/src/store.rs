use mealboard_shared::mealplan::{Slot, SlotKey};
use mealboard_shared::{ensure_range, week_span};
use time::Date;

use crate::Plan;

/// Where plans come from and where slot changes go.
pub trait PlanStore {
    /// Plan covering the inclusive range, with every stored assignment and
    /// lock inside it applied.
    fn load_plan(&self, start: Date, end: Date) -> anyhow::Result<Plan>;

    /// Writes the current state of one slot.
    fn persist_slot(&mut self, slot: &Slot) -> anyhow::Result<()>;
}

/// Loads the whole Sunday-start weeks around the range. A shuffle of part of
/// a week needs the titles already placed on the other days of that week.
pub fn load_weeks<P>(store: &P, start: Date, end: Date) -> anyhow::Result<Plan>
where
    P: PlanStore + ?Sized,
{
    ensure_range(start, end)?;
    let (first, last) = week_span(start, end);

    store.load_plan(first, last)
}

/// Persists the given slots of a plan, in order, and returns how many were
/// written. Keys the plan does not know are skipped.
pub fn persist_slots<P>(
    store: &mut P,
    plan: &Plan,
    keys: impl IntoIterator<Item = SlotKey>,
) -> anyhow::Result<usize>
where
    P: PlanStore + ?Sized,
{
    let mut written = 0;

    for key in keys {
        let Some(slot) = plan.slot(&key) else {
            tracing::debug!(slot = %key, "skip persisting unknown slot");
            continue;
        };

        store.persist_slot(slot)?;
        written += 1;
    }

    Ok(written)
}
