use std::collections::BTreeMap;

use mealboard_mealplan::Plan;
use mealboard_shared::mealplan::{MealType, Writer};
use mealboard_shared::recipe::{InMemoryRecipes, Recipe};
use mealboard_shopping::{Command, IngredientAggregationService};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use time::macros::date;

#[test]
fn two_day_list_counts_across_recipes() {
    let (first, second) = (date!(2024 - 06 - 03), date!(2024 - 06 - 04));
    let mut plan = Plan::new(first, second).unwrap();
    plan.set_slot(first, MealType::Dinner, Some("1".into()), Writer::User);
    plan.set_slot(second, MealType::Lunch, Some("2".into()), Writer::User);

    let command = Command::new(
        InMemoryRecipes::try_from(vec![
            Recipe::new("1", "Shortbread").ingredients(["Flour", "Sugar"]),
            Recipe::new("2", "Crepes").ingredients(["flour", "Eggs"]),
        ])
        .unwrap(),
    );

    let list = command.shopping_list(&plan, first, second).unwrap();

    let entries = list
        .entries
        .iter()
        .map(|e| (e.key.as_str(), e.display_text.as_str(), e.count))
        .collect::<Vec<_>>();
    assert_eq!(
        entries,
        vec![("eggs", "Eggs", 1), ("flour", "Flour", 2), ("sugar", "Sugar", 1)]
    );
    assert_eq!(
        list.entries.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["Eggs", "Flour (x2)", "Sugar"]
    );
    assert!(list.notices.is_empty());
}

#[test]
fn duplicates_across_slots_are_case_insensitive() {
    let day = date!(2024 - 06 - 03);
    let mut plan = Plan::new(day, day).unwrap();
    plan.set_slot(day, MealType::Breakfast, Some("1".into()), Writer::User);
    plan.set_slot(day, MealType::Lunch, Some("2".into()), Writer::User);
    plan.set_slot(day, MealType::Dinner, Some("3".into()), Writer::User);

    let command = Command::new(
        InMemoryRecipes::try_from(vec![
            Recipe::new("1", "Fried eggs").ingredients(["Eggs"]),
            Recipe::new("2", "Egg salad").ingredients(["eggs"]),
            Recipe::new("3", "Frittata").ingredients([" EGGS "]),
        ])
        .unwrap(),
    );

    let list = command.for_day(&plan, day).unwrap();

    assert_eq!(list.entries.len(), 1);
    assert_eq!(list.entries[0].key, "eggs");
    assert_eq!(list.entries[0].count, 3);
}

#[test]
fn counts_do_not_depend_on_scan_order() {
    let raw = vec![
        "Flour", "flour", " FLOUR", "Sugar", "Eggs", "eggs", "Milk", "Butter", "butter ", "Salt",
    ];
    let counts = |entries: &[mealboard_shopping::ShoppingListEntry]| {
        entries
            .iter()
            .map(|e| (e.key.to_owned(), e.count))
            .collect::<BTreeMap<_, _>>()
    };
    let expected = counts(&IngredientAggregationService::aggregate(&raw));

    for seed in 0..16 {
        let mut permuted = raw.clone();
        permuted.shuffle(&mut StdRng::seed_from_u64(seed));

        assert_eq!(
            counts(&IngredientAggregationService::aggregate(&permuted)),
            expected,
            "seed {seed}"
        );
    }
}

#[test]
fn empty_slots_give_an_empty_list() {
    let plan = Plan::new(date!(2024 - 06 - 02), date!(2024 - 06 - 08)).unwrap();
    let command = Command::new(InMemoryRecipes::new());

    let list = command
        .shopping_list(&plan, plan.start(), plan.end())
        .unwrap();

    assert!(list.is_empty());
}
