use super::run_blocking;
use crate::auth::OwnerId;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{NewScanRecord, ScanRecord};
use crate::schema::scan_records::dsl as sr;
use crate::vision::{FoodRecognizer, ScanMode};
use actix_web::{get, post, web, HttpResponse};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(scan_image).service(scan_history);
}

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    #[serde(default)]
    pub mode: ScanMode,
}

/// Raw image bytes in, recognized items out. The history record is written
/// best-effort; the scan result is returned even when the write fails.
#[post("/api/scan")]
async fn scan_image(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    recognizer: web::Data<dyn FoodRecognizer>,
    query: web::Query<ScanQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let mode = query.mode;

    let outcome = recognizer.recognize(&body, mode)?;

    let record = NewScanRecord {
        user_id,
        scan_id: Uuid::new_v4(),
        mode: mode.as_str().to_string(),
        recognized: serde_json::to_string(&outcome)
            .unwrap_or_else(|_| "null".to_string()),
    };
    let write = run_blocking(&pool, move |conn| {
        diesel::insert_into(sr::scan_records)
            .values(&record)
            .execute(conn)
            .map_err(ApiError::from)
    })
    .await;
    if let Err(e) = write {
        log::warn!("Failed to record scan for user {}: {}", user_id, e);
    }

    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/api/scan/history")]
async fn scan_history(owner: OwnerId, pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let records: Vec<ScanRecord> = run_blocking(&pool, move |conn| {
        sr::scan_records
            .filter(sr::user_id.eq(user_id))
            .order(sr::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    let scans: Vec<serde_json::Value> = records.iter().map(ScanRecord::to_response).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "scans": scans,
        "total": scans.len(),
    })))
}
