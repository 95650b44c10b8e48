use crate::error::ApiError;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::meal_plans)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MealPlan {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = crate::schema::meal_plans)]
pub struct NewMealPlan {
    #[serde(skip_deserializing)]
    pub user_id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewMealPlan {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Plan name is required".to_string()));
        }
        if self.end_date < self.start_date {
            return Err(ApiError::Validation(
                "Plan end date must not precede its start date".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::meal_plans)]
pub struct MealPlanChanges {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::meal_plan_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MealPlanItem {
    pub id: i32,
    pub meal_plan_id: i32,
    pub recipe_id: i32,
    pub meal_date: NaiveDate,
    pub meal_type: String,
    pub servings: i32,
    pub is_completed: bool,
    pub notes: Option<String>,
}

fn default_servings() -> i32 {
    1
}

/// Incoming item payload; `meal_type` is validated by the enum before the
/// row is built.
#[derive(Debug, Deserialize)]
pub struct MealPlanItemPayload {
    pub recipe_id: i32,
    pub meal_date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default = "default_servings")]
    pub servings: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MealPlanItemPayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.servings < 1 {
            return Err(ApiError::Validation(
                "Servings must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_row(self, meal_plan_id: i32) -> NewMealPlanItem {
        NewMealPlanItem {
            meal_plan_id,
            recipe_id: self.recipe_id,
            meal_date: self.meal_date,
            meal_type: self.meal_type.as_str().to_string(),
            servings: self.servings,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::meal_plan_items)]
pub struct NewMealPlanItem {
    pub meal_plan_id: i32,
    pub recipe_id: i32,
    pub meal_date: NaiveDate,
    pub meal_type: String,
    pub servings: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::meal_plan_items)]
pub struct MealPlanItemChanges {
    pub meal_date: Option<NaiveDate>,
    pub servings: Option<i32>,
    pub is_completed: Option<bool>,
    pub notes: Option<String>,
}

impl MealPlanItemChanges {
    pub fn is_empty(&self) -> bool {
        self.meal_date.is_none()
            && self.servings.is_none()
            && self.is_completed.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_dates_must_be_ordered() {
        let plan = NewMealPlan {
            user_id: 1,
            name: "Week 32".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 8, 9).unwrap(),
            is_active: true,
        };
        assert!(plan.validate().is_err());
    }

    #[test]
    fn meal_type_parses_from_lowercase() {
        let parsed: MealType = serde_json::from_str(r#""dinner""#).unwrap();
        assert_eq!(parsed, MealType::Dinner);
        assert_eq!(parsed.as_str(), "dinner");
    }

    #[test]
    fn unknown_meal_type_is_rejected_at_parse_time() {
        let parsed: Result<MealType, _> = serde_json::from_str(r#""brunch""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn payload_builds_row_with_owner_plan() {
        let payload = MealPlanItemPayload {
            recipe_id: 2,
            meal_date: NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
            meal_type: MealType::Lunch,
            servings: 2,
            notes: None,
        };
        let row = payload.into_row(9);
        assert_eq!(row.meal_plan_id, 9);
        assert_eq!(row.meal_type, "lunch");
    }
}
