use crate::error::ApiError;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::shopping_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShoppingList {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = crate::schema::shopping_lists)]
pub struct NewShoppingList {
    #[serde(skip_deserializing)]
    pub user_id: i32,
    pub name: String,
}

impl NewShoppingList {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("List name is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::shopping_lists)]
pub struct ShoppingListChanges {
    pub name: Option<String>,
    pub is_completed: Option<bool>,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::shopping_list_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ShoppingListItem {
    pub id: i32,
    pub shopping_list_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: Option<String>,
    pub is_purchased: bool,
    pub estimated_price: Option<f64>,
    pub actual_price: Option<f64>,
    pub notes: Option<String>,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "piece".to_string()
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = crate::schema::shopping_list_items)]
pub struct NewShoppingListItem {
    #[serde(skip_deserializing)]
    pub shopping_list_id: i32,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub category: Option<String>,
    pub estimated_price: Option<f64>,
    pub notes: Option<String>,
}

impl NewShoppingListItem {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Item name is required".to_string()));
        }
        if self.quantity < 0.0 {
            return Err(ApiError::Validation(
                "Quantity must be non-negative".to_string(),
            ));
        }
        if let Some(price) = self.estimated_price {
            if price < 0.0 {
                return Err(ApiError::Validation(
                    "Price must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::shopping_list_items)]
pub struct ShoppingListItemChanges {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub is_purchased: Option<bool>,
    pub estimated_price: Option<f64>,
    pub actual_price: Option<f64>,
    pub notes: Option<String>,
}

impl ShoppingListItemChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.unit.is_none()
            && self.category.is_none()
            && self.is_purchased.is_none()
            && self.estimated_price.is_none()
            && self.actual_price.is_none()
            && self.notes.is_none()
    }
}
