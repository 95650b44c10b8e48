//! Image-based food recognition behind a swappable strategy. The shipped
//! implementation is a stand-in that returns fixed results; a real vision
//! backend implements [`FoodRecognizer`] and slots in without touching any
//! caller.

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Single,
    Multi,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Single => "single",
            ScanMode::Multi => "multi",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecognizedItem {
    pub name: String,
    pub category: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_expiry: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Bare-bones recipe candidate attached to a multi-item scan.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSketch {
    pub name: String,
    pub description: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub difficulty: crate::catalog::Difficulty,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanOutcome {
    Single {
        item: RecognizedItem,
        confidence: f64,
    },
    Multi {
        items: Vec<RecognizedItem>,
        recipes: Vec<RecipeSketch>,
    },
}

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("No image data provided")]
    EmptyImage,

    #[error("Recognition backend failed: {0}")]
    Backend(String),
}

/// Strategy boundary for image recognition: raw bytes plus a mode in, one of
/// the two response shapes out.
pub trait FoodRecognizer: Send + Sync {
    fn recognize(&self, image: &[u8], mode: ScanMode) -> Result<ScanOutcome, RecognitionError>;
}

/// Placeholder recognizer. Validates the payload and returns fixed results
/// regardless of image content.
pub struct MockRecognizer;

impl FoodRecognizer for MockRecognizer {
    fn recognize(&self, image: &[u8], mode: ScanMode) -> Result<ScanOutcome, RecognitionError> {
        if image.is_empty() {
            return Err(RecognitionError::EmptyImage);
        }

        match mode {
            ScanMode::Single => {
                let item = RecognizedItem {
                    name: "Apple".to_string(),
                    category: "fruits".to_string(),
                    confidence: 0.95,
                    freshness_score: Some(8),
                    estimated_expiry: Some(Utc::now().naive_utc() + Duration::days(7)),
                    quantity: Some(1.0),
                    unit: Some("piece".to_string()),
                };
                let confidence = item.confidence;
                Ok(ScanOutcome::Single { item, confidence })
            }
            ScanMode::Multi => {
                let items = vec![
                    detected("Chicken Breast", "meat", 0.93),
                    detected("Bell Pepper", "vegetables", 0.89),
                    detected("Onion", "vegetables", 0.91),
                    detected("Garlic", "vegetables", 0.87),
                ];
                let recipes = vec![
                    RecipeSketch {
                        name: "Chicken Stir Fry".to_string(),
                        description: "Quick and healthy stir fry with chicken and vegetables"
                            .to_string(),
                        prep_time: 15,
                        cook_time: 20,
                        difficulty: crate::catalog::Difficulty::Easy,
                    },
                    RecipeSketch {
                        name: "Chicken Fajitas".to_string(),
                        description: "Delicious chicken fajitas with peppers and onions"
                            .to_string(),
                        prep_time: 10,
                        cook_time: 15,
                        difficulty: crate::catalog::Difficulty::Easy,
                    },
                ];
                Ok(ScanOutcome::Multi { items, recipes })
            }
        }
    }
}

fn detected(name: &str, category: &str, confidence: f64) -> RecognizedItem {
    RecognizedItem {
        name: name.to_string(),
        category: category.to_string(),
        confidence,
        freshness_score: None,
        estimated_expiry: None,
        quantity: None,
        unit: None,
    }
}

/// Base shelf life in days per food category.
const SHELF_LIFE_DAYS: &[(&str, i64)] = &[
    ("fruits", 7),
    ("vegetables", 5),
    ("dairy", 7),
    ("meat", 3),
    ("fish", 2),
    ("bread", 3),
    ("grains", 365),
    ("canned", 730),
];

const DEFAULT_SHELF_LIFE_DAYS: i64 = 7;

/// Estimate an expiry timestamp from a food category and a 1-10 freshness
/// score: the category's base shelf life scaled by freshness/10.
pub fn estimate_expiry(category: &str, freshness_score: i32) -> NaiveDateTime {
    let key = category.to_lowercase();
    let base_days = SHELF_LIFE_DAYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_SHELF_LIFE_DAYS);

    let adjusted = (base_days as f64 * (freshness_score as f64 / 10.0)) as i64;
    Utc::now().naive_utc() + Duration::days(adjusted)
}
