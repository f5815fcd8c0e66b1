//! Deterministic keyword-rule classifier
//!
//! The one source of truth for fallback categorization: an ordered rule
//! table matched against lower-cased item names, first match wins. Items
//! matching no rule land in the reserved catch-all category, created on
//! demand. Pure and side-effect-free.

use shopfront_common::model::{Assignment, Item};

/// Reserved catch-all category for items matching no rule
pub const CATCH_ALL_CATEGORY: &str = "Other";

struct Rule {
    category: &'static str,
    keywords: &'static [&'static str],
}

/// Ordered rule table; earlier rules take priority when keyword sets
/// overlap (e.g. "leather" boots resolve to Footwear before any later
/// rule could see them).
static RULES: &[Rule] = &[
    Rule {
        category: "Apparel",
        keywords: &[
            "t-shirt",
            "jeans",
            "shirt",
            "denim",
            "linen",
            "button-up",
            "crewneck",
            "crew neck",
        ],
    },
    Rule {
        category: "Footwear",
        keywords: &[
            "sneakers",
            "boots",
            "loafers",
            "ankle boots",
            "leather",
            "explorer",
        ],
    },
    Rule {
        category: "Appetizers",
        keywords: &[
            "calamari",
            "cheese board",
            "crispy rice",
            "spicy tuna",
            "artisan bread",
            "appetizer",
        ],
    },
    Rule {
        category: "Beverages",
        keywords: &[
            "lemonade",
            "latte",
            "cold brew",
            "matcha latte",
            "iced coffee",
            "sparkling water",
            "berry smoothie",
            "coffee",
            "tea",
            "drink",
            "beverage",
        ],
    },
];

/// Match a single item name against the rule table
///
/// Returns the target category of the first matching rule, or None when
/// the item belongs in the catch-all.
pub fn match_category(item_name: &str) -> Option<&'static str> {
    let name = item_name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|rule| rule.category)
}

/// Categorize all items using the keyword rules
///
/// Every known category appears in the result (possibly empty); the
/// catch-all is added only when some item needs it. Deterministic: the
/// same items and categories always produce the same assignment.
pub fn classify(items: &[Item], known_categories: &[String]) -> Assignment {
    let mut assignment = Assignment::new();
    for category in known_categories {
        assignment.entry(category.clone()).or_default();
    }

    for item in items {
        let category = match_category(&item.name).unwrap_or(CATCH_ALL_CATEGORY);
        assignment
            .entry(category.to_string())
            .or_default()
            .push(item.clone());
    }

    assignment
}
