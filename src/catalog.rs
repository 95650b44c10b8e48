//! The built-in recipe catalog: an immutable list of candidate recipes the
//! matcher scores against. Callers receive it as a value and may substitute
//! their own, so nothing in the crate depends on process-wide state.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Per-serving macros for a catalog entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecipe {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Required ingredient names, already lower-cased.
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    pub dietary_tags: Vec<String>,
    pub nutrition: Nutrition,
}

impl CatalogRecipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in five-entry catalog.
pub fn builtin() -> &'static [CatalogRecipe] {
    static CATALOG: OnceLock<Vec<CatalogRecipe>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            CatalogRecipe {
                id: 1,
                name: "Chicken Stir Fry".to_string(),
                description: "Quick and healthy stir fry with chicken and vegetables".to_string(),
                ingredients: strings(&[
                    "chicken breast",
                    "bell pepper",
                    "onion",
                    "garlic",
                    "soy sauce",
                    "oil",
                ]),
                instructions: strings(&[
                    "Cut chicken into strips",
                    "Heat oil in wok or large pan",
                    "Cook chicken until golden",
                    "Add vegetables and stir fry",
                    "Add soy sauce and seasonings",
                    "Serve hot with rice",
                ]),
                prep_time: 15,
                cook_time: 20,
                servings: 4,
                difficulty: Difficulty::Easy,
                cuisine: "asian".to_string(),
                dietary_tags: strings(&["high-protein", "gluten-free-option"]),
                nutrition: Nutrition {
                    calories: 320,
                    protein: 28,
                    carbs: 12,
                    fat: 18,
                },
            },
            CatalogRecipe {
                id: 2,
                name: "Vegetable Pasta".to_string(),
                description: "Creamy pasta with seasonal vegetables".to_string(),
                ingredients: strings(&[
                    "pasta", "zucchini", "tomato", "garlic", "cream", "parmesan", "basil",
                ]),
                instructions: strings(&[
                    "Cook pasta according to package directions",
                    "Sauté vegetables in olive oil",
                    "Add cream and simmer",
                    "Toss with cooked pasta",
                    "Add parmesan and basil",
                    "Season and serve",
                ]),
                prep_time: 10,
                cook_time: 25,
                servings: 4,
                difficulty: Difficulty::Easy,
                cuisine: "italian".to_string(),
                dietary_tags: strings(&["vegetarian"]),
                nutrition: Nutrition {
                    calories: 420,
                    protein: 15,
                    carbs: 52,
                    fat: 16,
                },
            },
            CatalogRecipe {
                id: 3,
                name: "Apple Cinnamon Oatmeal".to_string(),
                description: "Warm and comforting breakfast with fresh apples".to_string(),
                ingredients: strings(&["oats", "apple", "cinnamon", "milk", "honey", "nuts"]),
                instructions: strings(&[
                    "Dice apple into small pieces",
                    "Cook oats with milk",
                    "Add apple and cinnamon",
                    "Simmer until tender",
                    "Sweeten with honey",
                    "Top with nuts",
                ]),
                prep_time: 5,
                cook_time: 15,
                servings: 2,
                difficulty: Difficulty::Easy,
                cuisine: "american".to_string(),
                dietary_tags: strings(&["vegetarian", "healthy", "breakfast"]),
                nutrition: Nutrition {
                    calories: 280,
                    protein: 8,
                    carbs: 45,
                    fat: 8,
                },
            },
            CatalogRecipe {
                id: 4,
                name: "Salmon with Vegetables".to_string(),
                description: "Baked salmon with roasted seasonal vegetables".to_string(),
                ingredients: strings(&[
                    "salmon",
                    "broccoli",
                    "carrot",
                    "lemon",
                    "olive oil",
                    "herbs",
                ]),
                instructions: strings(&[
                    "Preheat oven to 400°F",
                    "Season salmon with herbs",
                    "Cut vegetables into pieces",
                    "Toss vegetables with oil",
                    "Bake salmon and vegetables",
                    "Serve with lemon",
                ]),
                prep_time: 15,
                cook_time: 25,
                servings: 2,
                difficulty: Difficulty::Medium,
                cuisine: "mediterranean".to_string(),
                dietary_tags: strings(&["high-protein", "healthy", "gluten-free"]),
                nutrition: Nutrition {
                    calories: 380,
                    protein: 32,
                    carbs: 15,
                    fat: 22,
                },
            },
            CatalogRecipe {
                id: 5,
                name: "Banana Smoothie".to_string(),
                description: "Creamy and nutritious breakfast smoothie".to_string(),
                ingredients: strings(&["banana", "milk", "yogurt", "honey", "oats", "berries"]),
                instructions: strings(&[
                    "Peel and slice banana",
                    "Add all ingredients to blender",
                    "Blend until smooth",
                    "Add ice if desired",
                    "Pour into glass",
                    "Garnish with berries",
                ]),
                prep_time: 5,
                cook_time: 0,
                servings: 1,
                difficulty: Difficulty::Easy,
                cuisine: "american".to_string(),
                dietary_tags: strings(&["vegetarian", "healthy", "breakfast", "quick"]),
                nutrition: Nutrition {
                    calories: 320,
                    protein: 12,
                    carbs: 58,
                    fat: 6,
                },
            },
        ]
    })
}

/// Linear scan by id. The catalog is small and fixed, so nothing fancier
/// is warranted.
pub fn find_by_id(catalog: &[CatalogRecipe], id: i32) -> Option<&CatalogRecipe> {
    catalog.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_entries_with_sequential_ids() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 5);
        let ids: Vec<i32> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn every_entry_has_required_ingredients() {
        for recipe in builtin() {
            assert!(
                !recipe.ingredients.is_empty(),
                "{} has no ingredients",
                recipe.name
            );
        }
    }

    #[test]
    fn ingredient_names_are_lower_cased() {
        for recipe in builtin() {
            for ing in &recipe.ingredients {
                assert_eq!(ing, &ing.to_lowercase());
            }
        }
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let catalog = builtin();
        assert_eq!(find_by_id(catalog, 4).map(|r| r.name.as_str()), Some("Salmon with Vegetables"));
        assert!(find_by_id(catalog, 99).is_none());
    }
}
