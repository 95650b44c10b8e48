use crate::error::ApiError;
use crate::matching::MatchPreferences;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-user cooking profile. The list-valued columns are stored as JSON
/// text; a column that fails to decode is treated as empty rather than
/// failing the request.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::user_preferences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserPreferences {
    pub id: i32,
    pub user_id: i32,
    pub dietary_restrictions: Option<String>,
    pub allergies: Option<String>,
    pub disliked_ingredients: Option<String>,
    pub preferred_cuisines: Option<String>,
    pub preferred_meal_types: Option<String>,
    pub health_goals: Option<String>,
    pub notification_preferences: Option<String>,
    pub cooking_skill_level: String,
    pub max_prep_time: Option<i32>,
    pub max_cook_time: Option<i32>,
    pub household_size: i32,
    pub budget_preference: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Decode a stored JSON list column, failing closed: malformed or absent
/// data yields an empty set, never an error.
fn decode_list(raw: &Option<String>) -> HashSet<String> {
    raw.as_deref()
        .and_then(|text| serde_json::from_str::<Vec<String>>(text).ok())
        .map(|list| list.into_iter().map(|s| s.to_lowercase()).collect())
        .unwrap_or_default()
}

fn decode_list_vec(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .and_then(|text| serde_json::from_str::<Vec<String>>(text).ok())
        .unwrap_or_default()
}

impl UserPreferences {
    pub fn dietary_restriction_set(&self) -> HashSet<String> {
        decode_list(&self.dietary_restrictions)
    }

    pub fn allergy_set(&self) -> HashSet<String> {
        decode_list(&self.allergies)
    }

    pub fn preferred_cuisine_set(&self) -> HashSet<String> {
        decode_list(&self.preferred_cuisines)
    }

    /// Map the stored profile onto scorer inputs. Restrictions are tags the
    /// recipe must carry (a vegetarian caller sees vegetarian recipes);
    /// allergies are tags the recipe must not carry.
    pub fn to_match_preferences(&self) -> MatchPreferences {
        MatchPreferences {
            excluded_tags: self.allergy_set(),
            required_tags: self.dietary_restriction_set(),
            preferred_cuisines: self.preferred_cuisine_set(),
        }
    }

    pub fn to_response(&self) -> PreferencesResponse {
        PreferencesResponse {
            id: self.id,
            user_id: self.user_id,
            dietary_restrictions: decode_list_vec(&self.dietary_restrictions),
            allergies: decode_list_vec(&self.allergies),
            disliked_ingredients: decode_list_vec(&self.disliked_ingredients),
            preferred_cuisines: decode_list_vec(&self.preferred_cuisines),
            preferred_meal_types: decode_list_vec(&self.preferred_meal_types),
            health_goals: decode_list_vec(&self.health_goals),
            notification_preferences: self
                .notification_preferences
                .as_deref()
                .and_then(|text| serde_json::from_str(text).ok()),
            cooking_skill_level: self.cooking_skill_level.clone(),
            max_prep_time: self.max_prep_time,
            max_cook_time: self.max_cook_time,
            household_size: self.household_size,
            budget_preference: self.budget_preference.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Wire shape for preference reads: list columns decoded into arrays.
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub id: i32,
    pub user_id: i32,
    pub dietary_restrictions: Vec<String>,
    pub allergies: Vec<String>,
    pub disliked_ingredients: Vec<String>,
    pub preferred_cuisines: Vec<String>,
    pub preferred_meal_types: Vec<String>,
    pub health_goals: Vec<String>,
    pub notification_preferences: Option<serde_json::Value>,
    pub cooking_skill_level: String,
    pub max_prep_time: Option<i32>,
    pub max_cook_time: Option<i32>,
    pub household_size: i32,
    pub budget_preference: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const SKILL_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];
const BUDGET_TIERS: &[&str] = &["low", "medium", "high"];

fn default_skill() -> String {
    "beginner".to_string()
}

fn default_budget() -> String {
    "medium".to_string()
}

fn default_household() -> i32 {
    1
}

/// Incoming preference upsert payload.
#[derive(Debug, Deserialize)]
pub struct PreferencesPayload {
    #[serde(default)]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub disliked_ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_cuisines: Option<Vec<String>>,
    #[serde(default)]
    pub preferred_meal_types: Option<Vec<String>>,
    #[serde(default)]
    pub health_goals: Option<Vec<String>>,
    #[serde(default)]
    pub notification_preferences: Option<serde_json::Value>,
    #[serde(default = "default_skill")]
    pub cooking_skill_level: String,
    #[serde(default)]
    pub max_prep_time: Option<i32>,
    #[serde(default)]
    pub max_cook_time: Option<i32>,
    #[serde(default = "default_household")]
    pub household_size: i32,
    #[serde(default = "default_budget")]
    pub budget_preference: String,
}

impl PreferencesPayload {
    pub fn into_upsert(self, user_id: i32) -> Result<PreferencesUpsert, ApiError> {
        if !SKILL_LEVELS.contains(&self.cooking_skill_level.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unknown cooking skill level: {}",
                self.cooking_skill_level
            )));
        }
        if !BUDGET_TIERS.contains(&self.budget_preference.as_str()) {
            return Err(ApiError::Validation(format!(
                "Unknown budget preference: {}",
                self.budget_preference
            )));
        }
        if self.household_size < 1 {
            return Err(ApiError::Validation(
                "Household size must be at least 1".to_string(),
            ));
        }

        Ok(PreferencesUpsert {
            user_id,
            dietary_restrictions: encode_list(self.dietary_restrictions),
            allergies: encode_list(self.allergies),
            disliked_ingredients: encode_list(self.disliked_ingredients),
            preferred_cuisines: encode_list(self.preferred_cuisines),
            preferred_meal_types: encode_list(self.preferred_meal_types),
            health_goals: encode_list(self.health_goals),
            notification_preferences: self
                .notification_preferences
                .as_ref()
                .map(|v| v.to_string()),
            cooking_skill_level: self.cooking_skill_level,
            max_prep_time: self.max_prep_time,
            max_cook_time: self.max_cook_time,
            household_size: self.household_size,
            budget_preference: self.budget_preference,
        })
    }
}

fn encode_list(list: Option<Vec<String>>) -> Option<String> {
    list.map(|entries| {
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    })
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_preferences)]
pub struct PreferencesUpsert {
    pub user_id: i32,
    pub dietary_restrictions: Option<String>,
    pub allergies: Option<String>,
    pub disliked_ingredients: Option<String>,
    pub preferred_cuisines: Option<String>,
    pub preferred_meal_types: Option<String>,
    pub health_goals: Option<String>,
    pub notification_preferences: Option<String>,
    pub cooking_skill_level: String,
    pub max_prep_time: Option<i32>,
    pub max_cook_time: Option<i32>,
    pub household_size: i32,
    pub budget_preference: String,
}
