use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListEntry {
    /// Trimmed, lower-cased ingredient text.
    pub key: String,
    /// Text of the first occurrence of the key in scan order, with
    /// surrounding whitespace trimmed. Later spellings only add to `count`.
    pub display_text: String,
    pub count: usize,
}

impl fmt::Display for ShoppingListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{} (x{})", self.display_text, self.count)
        } else {
            f.write_str(&self.display_text)
        }
    }
}

/// Ingredient Aggregation Service
///
/// Stateless service that groups ingredient strings case-insensitively and
/// counts how often each one is needed. Entries come back sorted by key.
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    pub fn aggregate<I, T>(ingredients: I) -> Vec<ShoppingListEntry>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut groups: BTreeMap<String, ShoppingListEntry> = BTreeMap::new();

        for ingredient in ingredients {
            let display_text = ingredient.as_ref().trim();
            if display_text.is_empty() {
                continue;
            }

            let key = Self::normalize_name(display_text);
            groups
                .entry(key.to_owned())
                .or_insert_with(|| ShoppingListEntry {
                    key,
                    display_text: display_text.to_owned(),
                    count: 0,
                })
                .count += 1;
        }

        groups.into_values().collect()
    }

    /// Normalize ingredient name (lowercase, trim whitespace)
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }
}
