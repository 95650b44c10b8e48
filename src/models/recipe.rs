use crate::error::ApiError;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A user-created recipe row. The built-in catalog (`crate::catalog`) is a
/// separate, static dataset; these are the records users save themselves.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub difficulty_level: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub servings: i32,
    pub calories_per_serving: Option<i32>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub tags: Option<String>,
    pub nutritional_info: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeIngredient {
    pub id: i32,
    pub recipe_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub is_optional: bool,
}

/// A recipe row together with its owned ingredient rows.
#[derive(Debug, Serialize)]
pub struct RecipeWithIngredients {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

const DIFFICULTY_LEVELS: &[&str] = &["easy", "medium", "hard"];

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_servings() -> i32 {
    4
}

#[derive(Debug, Deserialize)]
pub struct IngredientPayload {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_optional: bool,
}

/// Incoming payload for creating a recipe with its ingredient children.
#[derive(Debug, Deserialize)]
pub struct RecipePayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default)]
    pub prep_time: Option<i32>,
    #[serde(default)]
    pub cook_time: Option<i32>,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    pub calories_per_serving: Option<i32>,
    pub instructions: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub nutritional_info: Option<serde_json::Value>,
    #[serde(default)]
    pub ingredients: Vec<IngredientPayload>,
}

impl RecipePayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Recipe name is required".to_string()));
        }
        if self.instructions.trim().is_empty() {
            return Err(ApiError::Validation(
                "Instructions are required".to_string(),
            ));
        }
        if !DIFFICULTY_LEVELS.contains(&self.difficulty_level.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unknown difficulty level: {}",
                self.difficulty_level
            )));
        }
        if self.servings < 1 {
            return Err(ApiError::Validation(
                "Servings must be at least 1".to_string(),
            ));
        }
        for ing in &self.ingredients {
            if ing.name.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Ingredient name cannot be empty".to_string(),
                ));
            }
            if ing.quantity < 0.0 {
                return Err(ApiError::Validation(
                    "Ingredient quantity must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_rows(self, user_id: i32) -> (NewRecipe, Vec<IngredientPayload>) {
        let total_time = match (self.prep_time, self.cook_time) {
            (Some(p), Some(c)) => Some(p + c),
            _ => None,
        };
        let new_recipe = NewRecipe {
            user_id,
            name: self.name,
            description: self.description,
            cuisine_type: self.cuisine_type.map(|c| c.to_lowercase()),
            difficulty_level: self.difficulty_level,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time,
            servings: self.servings,
            calories_per_serving: self.calories_per_serving,
            instructions: self.instructions,
            image_url: self.image_url,
            tags: self
                .tags
                .map(|t| serde_json::to_string(&t).unwrap_or_else(|_| "[]".to_string())),
            nutritional_info: self.nutritional_info.map(|v| v.to_string()),
        };
        (new_recipe, self.ingredients)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub difficulty_level: String,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub servings: i32,
    pub calories_per_serving: Option<i32>,
    pub instructions: String,
    pub image_url: Option<String>,
    pub tags: Option<String>,
    pub nutritional_info: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub is_optional: bool,
}

impl NewRecipeIngredient {
    pub fn from_payload(recipe_id: i32, payload: IngredientPayload) -> Self {
        NewRecipeIngredient {
            recipe_id,
            name: payload.name,
            quantity: payload.quantity,
            unit: payload.unit,
            notes: payload.notes,
            is_optional: payload.is_optional,
        }
    }
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cuisine_type: Option<String>,
    pub difficulty_level: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub calories_per_serving: Option<i32>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
}

impl RecipeChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Recipe name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(level) = &self.difficulty_level {
            if !DIFFICULTY_LEVELS.contains(&level.as_str()) {
                return Err(ApiError::Validation(format!(
                    "Unknown difficulty level: {}",
                    level
                )));
            }
        }
        if let Some(servings) = self.servings {
            if servings < 1 {
                return Err(ApiError::Validation(
                    "Servings must be at least 1".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Junction row recording a user's relationship with a catalog recipe:
/// favorite flag, rating, cook counter. Unique per (user, recipe).
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::user_recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRecipe {
    pub id: i32,
    pub user_id: i32,
    pub recipe_id: i32,
    pub is_favorite: bool,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub times_cooked: i32,
    pub last_cooked: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_recipes)]
pub struct UserRecipeUpsert {
    pub user_id: i32,
    pub recipe_id: i32,
    pub is_favorite: bool,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

impl UserRecipeUpsert {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(ApiError::Validation(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RecipePayload {
        RecipePayload {
            name: "Weeknight Curry".to_string(),
            description: None,
            cuisine_type: Some("Indian".to_string()),
            difficulty_level: "easy".to_string(),
            prep_time: Some(10),
            cook_time: Some(25),
            servings: 4,
            calories_per_serving: None,
            instructions: "Simmer everything.".to_string(),
            image_url: None,
            tags: Some(vec!["quick".to_string()]),
            nutritional_info: None,
            ingredients: vec![IngredientPayload {
                name: "chickpeas".to_string(),
                quantity: 400.0,
                unit: "g".to_string(),
                notes: None,
                is_optional: false,
            }],
        }
    }

    #[test]
    fn total_time_is_derived_when_both_parts_present() {
        let (row, ingredients) = payload().into_rows(3);
        assert_eq!(row.total_time, Some(35));
        assert_eq!(row.user_id, 3);
        assert_eq!(row.cuisine_type.as_deref(), Some("indian"));
        assert_eq!(ingredients.len(), 1);
    }

    #[test]
    fn missing_cook_time_leaves_total_unset() {
        let mut p = payload();
        p.cook_time = None;
        let (row, _) = p.into_rows(1);
        assert_eq!(row.total_time, None);
    }

    #[test]
    fn validation_rejects_blank_name_and_bad_difficulty() {
        let mut p = payload();
        p.name = " ".to_string();
        assert!(p.validate().is_err());

        let mut p = payload();
        p.difficulty_level = "impossible".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn rating_must_be_one_through_five() {
        let mut upsert = UserRecipeUpsert {
            user_id: 1,
            recipe_id: 1,
            is_favorite: true,
            rating: Some(5),
            notes: None,
        };
        assert!(upsert.validate().is_ok());
        upsert.rating = Some(6);
        assert!(upsert.validate().is_err());
    }
}
