//! Fills empty, unlocked slots from the favorites pool.
//!
//! Within one Sunday-start week a title is used at most once. Titles already
//! placed in the week, locked or not, count as used before anything is
//! picked, so a run never duplicates a title against slots it does not touch.
//!
//! [`plan_shuffle`] computes every assignment against a borrowed plan and
//! returns them, [`apply_shuffle`] writes them back. Nothing is written when
//! the computation is discarded.

use std::collections::{HashMap, HashSet};

use mealboard_shared::{WeekKey, week_span};
use mealboard_shared::mealplan::{Assignment, Notice, SetOutcome, SlotKey, Writer};
use mealboard_shared::recipe::{Favorite, RecipeStore};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use time::Date;

use crate::Plan;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ShuffleReport {
    pub assignments: Vec<Assignment>,
    /// Empty, unlocked slots left empty because every favorite was already
    /// used in their week.
    pub unfilled: Vec<SlotKey>,
    pub notices: Vec<Notice>,
}

impl ShuffleReport {
    pub fn is_noop(&self) -> bool {
        self.assignments.is_empty()
    }
}

pub fn plan_shuffle<S, R>(
    plan: &Plan,
    start: Date,
    end: Date,
    favorites: &[Favorite],
    store: &S,
    rng: &mut R,
) -> ShuffleReport
where
    S: RecipeStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut report = ShuffleReport::default();
    let mut used = used_titles(plan, start, end, store, &mut report.notices);

    let targets = plan
        .empty_unlocked_slots(start, end)
        .map(|slot| slot.key())
        .collect::<Vec<_>>();

    if favorites.is_empty() {
        report.notices.push(Notice::EmptyFavoritesPool);
        report.unfilled = targets;

        return report;
    }

    let mut shuffled = favorites.to_vec();
    shuffled.shuffle(rng);

    for key in targets {
        let week = used.entry(WeekKey::of(key.date)).or_default();

        let Some(pick) = shuffled.iter().find(|fav| !week.contains(fav.title.as_str())) else {
            report.unfilled.push(key);
            continue;
        };

        week.insert(pick.title.to_owned());
        report.assignments.push(Assignment {
            slot: key,
            recipe_id: pick.id.to_owned(),
            title: pick.title.to_owned(),
        });
    }

    report
}

/// Writes the assignments of a report into the plan as shuffle writes and
/// returns the ones that were applied.
pub fn apply_shuffle(plan: &mut Plan, report: &ShuffleReport) -> Vec<Assignment> {
    let mut applied = vec![];

    for assignment in &report.assignments {
        let outcome = plan.set_slot(
            assignment.slot.date,
            assignment.slot.meal_type,
            Some(assignment.recipe_id.to_owned()),
            Writer::Shuffle,
        );

        match outcome {
            SetOutcome::Applied => applied.push(assignment.to_owned()),
            other => {
                tracing::debug!(slot = %assignment.slot, ?other, "shuffle assignment not applied")
            }
        }
    }

    applied
}

/// Titles already placed per week, over every week the range touches.
fn used_titles<S: RecipeStore + ?Sized>(
    plan: &Plan,
    start: Date,
    end: Date,
    store: &S,
    notices: &mut Vec<Notice>,
) -> HashMap<WeekKey, HashSet<String>> {
    let mut used: HashMap<WeekKey, HashSet<String>> = HashMap::new();

    if start > end {
        return used;
    }

    let (first, last) = week_span(start, end);

    for slot in plan.slots_in_range(first, last) {
        let Some(recipe_id) = slot.recipe_id.as_ref() else {
            continue;
        };

        match store.title(recipe_id) {
            Some(title) => {
                used.entry(WeekKey::of(slot.date))
                    .or_default()
                    .insert(title.to_owned());
            }
            None => notices.push(Notice::UnresolvableRecipe {
                slot: slot.key(),
                recipe_id: recipe_id.to_owned(),
            }),
        }
    }

    used
}
