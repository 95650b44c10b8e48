use crate::error::ApiError;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::inventory_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InventoryItem {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub purchase_date: NaiveDateTime,
    pub expiry_date: Option<NaiveDateTime>,
    pub freshness_score: Option<i32>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl InventoryItem {
    /// True when the expiry date lies within the next `days` days. Items
    /// without an expiry date never report as expiring; already-expired
    /// items do.
    pub fn is_expiring_soon(&self, days: i64) -> bool {
        match self.expiry_date {
            Some(expiry) => (expiry - Utc::now().naive_utc()).num_days() <= days,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < Utc::now().naive_utc(),
            None => false,
        }
    }
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    "piece".to_string()
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = crate::schema::inventory_items)]
pub struct NewInventoryItem {
    #[serde(skip_deserializing)]
    pub user_id: i32,
    pub name: String,
    pub category: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Absent means the database default (now).
    pub purchase_date: Option<NaiveDateTime>,
    pub expiry_date: Option<NaiveDateTime>,
    pub freshness_score: Option<i32>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Item name is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("Category is required".to_string()));
        }
        if self.quantity < 0.0 {
            return Err(ApiError::Validation(
                "Quantity must be non-negative".to_string(),
            ));
        }
        if let Some(score) = self.freshness_score {
            if !(1..=10).contains(&score) {
                return Err(ApiError::Validation(
                    "Freshness score must be between 1 and 10".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, AsChangeset, Deserialize)]
#[diesel(table_name = crate::schema::inventory_items)]
pub struct InventoryItemChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub purchase_date: Option<NaiveDateTime>,
    pub expiry_date: Option<NaiveDateTime>,
    pub freshness_score: Option<i32>,
    pub location: Option<String>,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

impl InventoryItemChanges {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation("Item name cannot be empty".to_string()));
            }
        }
        if let Some(quantity) = self.quantity {
            if quantity < 0.0 {
                return Err(ApiError::Validation(
                    "Quantity must be non-negative".to_string(),
                ));
            }
        }
        if let Some(score) = self.freshness_score {
            if !(1..=10).contains(&score) {
                return Err(ApiError::Validation(
                    "Freshness score must be between 1 and 10".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(expiry: Option<NaiveDateTime>) -> InventoryItem {
        let now = Utc::now().naive_utc();
        InventoryItem {
            id: 1,
            user_id: 1,
            name: "Milk".to_string(),
            category: "dairy".to_string(),
            quantity: 1.0,
            unit: "l".to_string(),
            purchase_date: now,
            expiry_date: expiry,
            freshness_score: Some(7),
            location: Some("fridge".to_string()),
            barcode: None,
            image_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn expiring_soon_within_window() {
        let soon = item(Some(Utc::now().naive_utc() + Duration::days(2)));
        assert!(soon.is_expiring_soon(3));
        assert!(!soon.is_expired());
    }

    #[test]
    fn not_expiring_outside_window() {
        let later = item(Some(Utc::now().naive_utc() + Duration::days(10)));
        assert!(!later.is_expiring_soon(3));
    }

    #[test]
    fn expired_items_also_count_as_expiring() {
        let past = item(Some(Utc::now().naive_utc() - Duration::days(1)));
        assert!(past.is_expired());
        assert!(past.is_expiring_soon(3));
    }

    #[test]
    fn no_expiry_date_means_neither() {
        let none = item(None);
        assert!(!none.is_expired());
        assert!(!none.is_expiring_soon(3));
    }

    #[test]
    fn new_item_validation() {
        let mut new_item = NewInventoryItem {
            user_id: 1,
            name: "Eggs".to_string(),
            category: "dairy".to_string(),
            quantity: 12.0,
            unit: "piece".to_string(),
            purchase_date: None,
            expiry_date: None,
            freshness_score: None,
            location: None,
            barcode: None,
            image_url: None,
            notes: None,
        };
        assert!(new_item.validate().is_ok());

        new_item.quantity = -1.0;
        assert!(new_item.validate().is_err());

        new_item.quantity = 1.0;
        new_item.freshness_score = Some(11);
        assert!(new_item.validate().is_err());

        new_item.freshness_score = None;
        new_item.name = "  ".to_string();
        assert!(new_item.validate().is_err());
    }
}
