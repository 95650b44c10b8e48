//! Static ingredient-substitution lookup. Exact-match table over a fixed
//! set of common ingredients; unknown ingredients yield an empty list by
//! contract, not an error.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Substitution {
    pub ingredient: String,
    pub ratio: String,
    pub notes: String,
    pub category: String,
}

const SUBSTITUTION_TABLE: &[(&str, &[&str])] = &[
    ("chicken", &["turkey", "tofu", "tempeh", "seitan"]),
    ("beef", &["turkey", "mushrooms", "lentils", "beans"]),
    ("milk", &["almond milk", "soy milk", "oat milk", "coconut milk"]),
    ("butter", &["olive oil", "coconut oil", "margarine", "applesauce"]),
    ("eggs", &["flax eggs", "chia eggs", "applesauce", "banana"]),
    ("flour", &["almond flour", "coconut flour", "oat flour", "rice flour"]),
    ("sugar", &["honey", "maple syrup", "stevia", "dates"]),
    ("cream", &["coconut cream", "cashew cream", "greek yogurt"]),
    ("cheese", &["nutritional yeast", "cashew cheese", "tofu"]),
    ("onion", &["shallots", "leeks", "garlic", "onion powder"]),
    ("garlic", &["garlic powder", "shallots", "ginger"]),
    ("lemon", &["lime", "vinegar", "citric acid"]),
    ("tomato", &["tomato paste", "tomato sauce", "red pepper"]),
    ("bell pepper", &["poblano pepper", "zucchini", "eggplant"]),
    ("pasta", &["zucchini noodles", "spaghetti squash", "rice noodles"]),
    ("rice", &["quinoa", "cauliflower rice", "barley", "bulgur"]),
];

/// Look up the configured substitutes for an ingredient. Each hit is wrapped
/// with a fixed 1:1 ratio and a generated note; order follows the table.
pub fn substitutes_for(ingredient: &str) -> Vec<Substitution> {
    let key = ingredient.trim().to_lowercase();

    SUBSTITUTION_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(name, subs)| {
            subs.iter()
                .map(|sub| Substitution {
                    ingredient: sub.to_string(),
                    ratio: "1:1".to_string(),
                    notes: format!("Good substitute for {}", name),
                    category: "direct".to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chicken_returns_the_configured_four_in_order() {
        let subs = substitutes_for("chicken");
        let names: Vec<&str> = subs.iter().map(|s| s.ingredient.as_str()).collect();
        assert_eq!(names, vec!["turkey", "tofu", "tempeh", "seitan"]);
    }

    #[test]
    fn unknown_ingredient_returns_empty_not_error() {
        assert!(substitutes_for("kale").is_empty());
    }

    #[test]
    fn every_entry_is_wrapped_with_fixed_ratio_and_note() {
        for sub in substitutes_for("milk") {
            assert_eq!(sub.ratio, "1:1");
            assert_eq!(sub.notes, "Good substitute for milk");
            assert_eq!(sub.category, "direct");
        }
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        let subs = substitutes_for("  Bell Pepper ");
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].ingredient, "poblano pepper");
    }

    #[test]
    fn table_covers_the_sixteen_common_ingredients() {
        assert_eq!(SUBSTITUTION_TABLE.len(), 16);
    }
}
