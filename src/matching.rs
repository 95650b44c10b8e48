//! Ingredient-match scoring: ranks catalog recipes by how much of their
//! required ingredient list the caller already has on hand.

use crate::catalog::CatalogRecipe;
use serde::Serialize;
use std::collections::HashSet;

/// Recipes below this pre-boost percentage are excluded from results.
pub const MATCH_THRESHOLD: f64 = 30.0;
/// Flat bonus for a recipe whose cuisine the caller prefers. Applied after
/// inclusion, once, and not re-normalized (scores can exceed 100).
pub const CUISINE_BOOST: f64 = 10.0;
/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 10;

/// Preference inputs to the scorer.
///
/// `excluded_tags` is avoidance: a recipe carrying any of these dietary tags
/// is dropped (allergens, disliked tags). `required_tags` is constraint: a
/// recipe lacking any of these tags is dropped (e.g. a vegetarian caller
/// only sees recipes tagged vegetarian). The two are deliberately distinct;
/// conflating them would exclude vegetarian recipes from vegetarian callers.
#[derive(Debug, Clone, Default)]
pub struct MatchPreferences {
    pub excluded_tags: HashSet<String>,
    pub required_tags: HashSet<String>,
    pub preferred_cuisines: HashSet<String>,
}

/// A catalog entry annotated with its match score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: CatalogRecipe,
    pub match_percentage: f64,
    pub missing_ingredients: Vec<String>,
    pub available_ingredients: Vec<String>,
}

/// Score every catalog recipe against the available ingredient set and
/// return the ranked top suggestions.
///
/// `available` is compared case-insensitively by exact name; no stemming or
/// synonym handling. A recipe with an empty required list scores 0 and is
/// excluded. Ordering is stable descending on the final percentage, so ties
/// keep catalog order, truncated to [`MAX_SUGGESTIONS`].
pub fn score_recipes(
    available: &HashSet<String>,
    catalog: &[CatalogRecipe],
    preferences: Option<&MatchPreferences>,
) -> Vec<ScoredRecipe> {
    let available: HashSet<String> = available.iter().map(|s| s.to_lowercase()).collect();

    let mut suggestions: Vec<ScoredRecipe> = Vec::new();

    for recipe in catalog {
        let required: Vec<String> = recipe.ingredients.iter().map(|s| s.to_lowercase()).collect();
        if required.is_empty() {
            continue;
        }

        let matches = required.iter().filter(|ing| available.contains(*ing)).count();
        let match_percentage = (matches as f64 / required.len() as f64) * 100.0;

        if match_percentage < MATCH_THRESHOLD {
            continue;
        }

        let mut scored = ScoredRecipe {
            recipe: recipe.clone(),
            match_percentage,
            missing_ingredients: required
                .iter()
                .filter(|ing| !available.contains(*ing))
                .cloned()
                .collect(),
            available_ingredients: required
                .iter()
                .filter(|ing| available.contains(*ing))
                .cloned()
                .collect(),
        };

        if let Some(prefs) = preferences {
            if recipe
                .dietary_tags
                .iter()
                .any(|tag| prefs.excluded_tags.contains(tag))
            {
                continue;
            }

            if !prefs
                .required_tags
                .iter()
                .all(|tag| recipe.dietary_tags.contains(tag))
            {
                continue;
            }

            if prefs.preferred_cuisines.contains(&recipe.cuisine) {
                scored.match_percentage += CUISINE_BOOST;
            }
        }

        suggestions.push(scored);
    }

    // Stable sort: equal scores keep catalog order.
    suggestions.sort_by(|a, b| b.match_percentage.total_cmp(&a.match_percentage));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, builtin, CatalogRecipe, Difficulty, Nutrition};

    fn recipe(id: i32, ingredients: &[&str], cuisine: &str, tags: &[&str]) -> CatalogRecipe {
        CatalogRecipe {
            id,
            name: format!("Recipe {}", id),
            description: String::new(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: vec![],
            prep_time: 10,
            cook_time: 10,
            servings: 2,
            difficulty: Difficulty::Easy,
            cuisine: cuisine.to_string(),
            dietary_tags: tags.iter().map(|s| s.to_string()).collect(),
            nutrition: Nutrition {
                calories: 0,
                protein: 0,
                carbs: 0,
                fat: 0,
            },
        }
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_pantry_scores_exactly_one_hundred() {
        let available = set(&[
            "chicken breast",
            "bell pepper",
            "onion",
            "garlic",
            "soy sauce",
            "oil",
        ]);
        let results = score_recipes(&available, builtin(), None);
        let stir_fry = results.iter().find(|r| r.recipe.id == 1).unwrap();
        assert_eq!(stir_fry.match_percentage, 100.0);
        assert!(stir_fry.missing_ingredients.is_empty());
        assert_eq!(stir_fry.available_ingredients.len(), 6);
    }

    #[test]
    fn percentage_is_exact_share_of_required() {
        let catalog = vec![recipe(1, &["a", "b", "c", "d"], "asian", &[])];
        let results = score_recipes(&set(&["a", "b", "c"]), &catalog, None);
        assert_eq!(results[0].match_percentage, 75.0);
        assert_eq!(results[0].missing_ingredients, vec!["d"]);
        assert_eq!(results[0].available_ingredients, vec!["a", "b", "c"]);
    }

    #[test]
    fn two_of_seven_falls_below_threshold() {
        // 2/7 ≈ 28.57% < 30%, must be excluded.
        let results = score_recipes(&set(&["pasta", "tomato"]), builtin(), None);
        assert!(results.iter().all(|r| r.recipe.id != 2));
    }

    #[test]
    fn two_of_six_meets_threshold() {
        // 2/6 ≈ 33.3% ≥ 30%, must be included.
        let results = score_recipes(&set(&["oats", "apple"]), builtin(), None);
        assert!(results.iter().any(|r| r.recipe.id == 3));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let results = score_recipes(&set(&["Oats", "APPLE"]), builtin(), None);
        let oatmeal = results.iter().find(|r| r.recipe.id == 3).unwrap();
        assert_eq!(oatmeal.available_ingredients, vec!["oats", "apple"]);
    }

    #[test]
    fn adding_an_ingredient_never_lowers_any_score() {
        let base = set(&["pasta", "tomato", "oats", "milk"]);
        let mut larger = base.clone();
        larger.insert("garlic".to_string());

        let scores = |avail: &HashSet<String>| -> Vec<(i32, f64)> {
            builtin()
                .iter()
                .map(|r| {
                    let matched = r
                        .ingredients
                        .iter()
                        .filter(|i| avail.contains(*i))
                        .count();
                    (r.id, matched as f64 / r.ingredients.len() as f64)
                })
                .collect()
        };

        for ((id_a, before), (id_b, after)) in scores(&base).iter().zip(scores(&larger).iter()) {
            assert_eq!(id_a, id_b);
            assert!(after >= before);
        }
    }

    #[test]
    fn empty_required_list_is_skipped() {
        let catalog = vec![recipe(1, &[], "asian", &[]), recipe(2, &["a"], "asian", &[])];
        let results = score_recipes(&set(&["a"]), &catalog, None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe.id, 2);
    }

    #[test]
    fn excluded_tags_drop_recipes_regardless_of_score() {
        let available = set(&["oats", "apple", "cinnamon", "milk", "honey", "nuts"]);
        let prefs = MatchPreferences {
            excluded_tags: set(&["breakfast"]),
            ..Default::default()
        };
        let results = score_recipes(&available, builtin(), Some(&prefs));
        assert!(results.iter().all(|r| r.recipe.id != 3 && r.recipe.id != 5));
    }

    #[test]
    fn required_tags_keep_only_recipes_carrying_them() {
        // A vegetarian caller must still see vegetarian recipes.
        let available = set(&[
            "pasta", "zucchini", "tomato", "garlic", "cream", "parmesan", "basil", "oats",
            "apple", "cinnamon", "milk", "honey", "nuts", "salmon", "broccoli",
        ]);
        let prefs = MatchPreferences {
            required_tags: set(&["vegetarian"]),
            ..Default::default()
        };
        let results = score_recipes(&available, builtin(), Some(&prefs));
        assert!(!results.is_empty());
        assert!(results
            .iter()
            .all(|r| r.recipe.dietary_tags.iter().any(|t| t == "vegetarian")));
    }

    #[test]
    fn preferred_cuisine_boost_is_exactly_ten_applied_once() {
        let available = set(&["a", "b", "c", "d"]);
        let catalog = vec![recipe(1, &["a", "b", "c", "d"], "italian", &[])];
        let prefs = MatchPreferences {
            preferred_cuisines: set(&["italian"]),
            ..Default::default()
        };
        let results = score_recipes(&available, &catalog, Some(&prefs));
        // 100% + 10 boost, not re-normalized.
        assert_eq!(results[0].match_percentage, 110.0);
    }

    #[test]
    fn boost_does_not_resurrect_recipes_below_threshold() {
        // 1/4 = 25% < 30; a +10 cuisine boost must not bring it back.
        let catalog = vec![recipe(1, &["a", "b", "c", "d"], "italian", &[])];
        let prefs = MatchPreferences {
            preferred_cuisines: set(&["italian"]),
            ..Default::default()
        };
        let results = score_recipes(&set(&["a"]), &catalog, Some(&prefs));
        assert!(results.is_empty());
    }

    #[test]
    fn results_are_sorted_descending_and_capped_at_ten() {
        let catalog: Vec<CatalogRecipe> = (1..=15)
            .map(|id| recipe(id, &["a", "b"], "asian", &[]))
            .collect();
        let results = score_recipes(&set(&["a", "b"]), &catalog, None);
        assert_eq!(results.len(), MAX_SUGGESTIONS);
        for pair in results.windows(2) {
            assert!(pair[0].match_percentage >= pair[1].match_percentage);
        }
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = vec![
            recipe(7, &["a", "b"], "asian", &[]),
            recipe(3, &["a", "b"], "asian", &[]),
            recipe(9, &["a", "b"], "asian", &[]),
        ];
        let results = score_recipes(&set(&["a", "b"]), &catalog, None);
        let ids: Vec<i32> = results.iter().map(|r| r.recipe.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }

    #[test]
    fn no_preferences_means_no_filtering_or_boost() {
        let available = set(&["banana", "milk", "yogurt"]);
        let results = score_recipes(&available, builtin(), None);
        let smoothie = results.iter().find(|r| r.recipe.id == 5).unwrap();
        assert_eq!(smoothie.match_percentage, 50.0);
    }

    #[test]
    fn find_by_id_agrees_with_scorer_input() {
        // Sanity: the catalog passed to the scorer is the same one id lookups
        // resolve against.
        let catalog = builtin();
        let results = score_recipes(
            &set(&["salmon", "broccoli", "carrot", "lemon", "olive oil", "herbs"]),
            catalog,
            None,
        );
        let top = &results[0];
        assert_eq!(
            catalog::find_by_id(catalog, top.recipe.id).unwrap().name,
            top.recipe.name
        );
    }
}
