use crate::db;
use async_trait::async_trait;
use fang::asynk::async_queue::AsyncQueueable;
use fang::{AsyncRunnable, Deserialize, FangError, Scheduled, Serialize};

fn fang_error(description: String) -> FangError {
    FangError { description }
}

/// Subset of the OpenFoodFacts v2 product payload this crate cares about.
#[derive(serde::Deserialize)]
pub struct OpenFoodFactsResponse {
    pub status: i32,
    pub code: Option<String>,
    pub product: Option<ProductInfo>,
}

#[derive(serde::Deserialize)]
pub struct ProductInfo {
    pub product_name: Option<String>,
    pub brands: Option<String>,
    pub image_url: Option<String>,
}

/// Job to look up a barcode on OpenFoodFacts and enrich the matching
/// inventory rows with the product image.
#[derive(Serialize, Deserialize)]
#[serde(crate = "fang::serde")]
pub struct FetchProductJob {
    pub barcode: String,
}

#[typetag::serde]
#[async_trait]
impl AsyncRunnable for FetchProductJob {
    async fn run(&self, _queue: &mut dyn AsyncQueueable) -> Result<(), FangError> {
        log::info!("Processing FetchProductJob for barcode: {}", self.barcode);

        let client = reqwest::Client::new();
        let url = format!(
            "https://world.openfoodfacts.org/api/v2/product/{}",
            self.barcode
        );

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| fang_error(format!("Fetch error: {}", e)))?;
        let payload: OpenFoodFactsResponse = response
            .json()
            .await
            .map_err(|e| fang_error(format!("Parse error: {}", e)))?;

        let Some(product) = payload.product else {
            log::info!(
                "No product found for barcode {} (status {})",
                self.barcode,
                payload.status
            );
            return Ok(());
        };

        log::info!(
            "Barcode {} resolved to {} ({})",
            self.barcode,
            product.product_name.as_deref().unwrap_or("unknown product"),
            product.brands.as_deref().unwrap_or("unknown brand"),
        );

        let Some(image) = product.image_url else {
            return Ok(());
        };

        let barcode = self.barcode.clone();
        let updated = tokio::task::spawn_blocking(move || -> Result<usize, String> {
            use crate::schema::inventory_items::dsl as inv;
            use diesel::prelude::*;

            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| "DATABASE_URL must be set".to_string())?;
            let mut conn =
                db::establish_connection(&database_url).map_err(|e| e.to_string())?;

            diesel::update(
                inv::inventory_items
                    .filter(inv::barcode.eq(barcode))
                    .filter(inv::image_url.is_null()),
            )
            .set(inv::image_url.eq(image))
            .execute(&mut conn)
            .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| fang_error(format!("Join error: {}", e)))?
        .map_err(fang_error)?;

        log::info!(
            "Enriched {} inventory item(s) for barcode {}",
            updated,
            self.barcode
        );
        Ok(())
    }

    fn uniq(&self) -> bool {
        true
    }

    fn task_type(&self) -> String {
        "fetch_product".to_string()
    }

    fn max_retries(&self) -> i32 {
        3
    }

    fn backoff(&self, attempt: u32) -> u32 {
        // Exponential backoff: 60s, 120s, 240s
        60 * (2_u32.pow(attempt))
    }
}

/// How far ahead the expiry scan looks.
const REMINDER_WINDOW_DAYS: i64 = 3;

/// Recurring job that finds inventory items close to expiry and fans out a
/// reminder per item.
#[derive(Serialize, Deserialize)]
#[serde(crate = "fang::serde")]
pub struct ExpiryScanJob {}

#[typetag::serde]
#[async_trait]
impl AsyncRunnable for ExpiryScanJob {
    async fn run(&self, queue: &mut dyn AsyncQueueable) -> Result<(), FangError> {
        log::info!("Running expiry scan");

        let expiring = tokio::task::spawn_blocking(
            move || -> Result<Vec<(i32, String, i64)>, String> {
                use crate::schema::inventory_items::dsl as inv;
                use chrono::{Duration, Utc};
                use diesel::prelude::*;

                let database_url = std::env::var("DATABASE_URL")
                    .map_err(|_| "DATABASE_URL must be set".to_string())?;
                let mut conn =
                    db::establish_connection(&database_url).map_err(|e| e.to_string())?;

                let now = Utc::now().naive_utc();
                let cutoff = now + Duration::days(REMINDER_WINDOW_DAYS);
                let rows: Vec<(i32, String, chrono::NaiveDateTime)> = inv::inventory_items
                    .filter(inv::expiry_date.ge(now))
                    .filter(inv::expiry_date.le(cutoff))
                    .select((inv::user_id, inv::name, inv::expiry_date.assume_not_null()))
                    .load(&mut conn)
                    .map_err(|e| e.to_string())?;

                Ok(rows
                    .into_iter()
                    .map(|(user_id, name, expiry)| (user_id, name, (expiry - now).num_days()))
                    .collect())
            },
        )
        .await
        .map_err(|e| fang_error(format!("Join error: {}", e)))?
        .map_err(fang_error)?;

        log::info!("Expiry scan found {} item(s) near expiry", expiring.len());

        for (user_id, item_name, days_left) in expiring {
            let reminder = ExpiryReminderJob {
                user_id,
                item_name,
                days_left,
            };
            if let Err(e) = queue.insert_task(&reminder).await {
                log::error!("Failed to enqueue expiry reminder: {:?}", e);
            }
        }

        Ok(())
    }

    fn uniq(&self) -> bool {
        true
    }

    fn task_type(&self) -> String {
        "expiry_scan".to_string()
    }

    fn cron(&self) -> Option<Scheduled> {
        // Run every day at 8 AM
        Some(Scheduled::CronPattern("0 8 * * *".to_string()))
    }

    fn max_retries(&self) -> i32 {
        1
    }
}

/// Job to notify a user about an item that is about to expire. The delivery
/// channel (email, push) is an external collaborator; this logs the intent.
#[derive(Serialize, Deserialize)]
#[serde(crate = "fang::serde")]
pub struct ExpiryReminderJob {
    pub user_id: i32,
    pub item_name: String,
    pub days_left: i64,
}

#[typetag::serde]
#[async_trait]
impl AsyncRunnable for ExpiryReminderJob {
    async fn run(&self, _queue: &mut dyn AsyncQueueable) -> Result<(), FangError> {
        log::info!(
            "Reminder for user {}: {} expires in {} day(s)",
            self.user_id,
            self.item_name,
            self.days_left
        );
        Ok(())
    }

    fn uniq(&self) -> bool {
        false // One reminder per expiring item
    }

    fn task_type(&self) -> String {
        "expiry_reminder".to_string()
    }

    fn max_retries(&self) -> i32 {
        5
    }
}
