use super::run_blocking;
use crate::auth::OwnerId;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::jobs::FetchProductJob;
use crate::models::{InventoryItem, InventoryItemChanges, NewInventoryItem};
use crate::schema::inventory_items::dsl as inv;
use crate::vision;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use fang::asynk::async_queue::{AsyncQueue, AsyncQueueable};
use fang::NoTls;
use serde::Deserialize;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // The expiring route must precede the {id} routes so the literal
    // segment wins.
    cfg.service(expiring_items)
        .service(list_items)
        .service(create_item)
        .service(get_item)
        .service(update_item)
        .service(delete_item);
}

#[derive(Debug, Deserialize)]
pub struct InventoryQuery {
    pub category: Option<String>,
    pub location: Option<String>,
    /// Only items whose expiry falls within this many days.
    pub expiring_within: Option<i64>,
}

#[get("/api/inventory")]
async fn list_items(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    query: web::Query<InventoryQuery>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let filters = query.into_inner();

    let items: Vec<InventoryItem> = run_blocking(&pool, move |conn| {
        let mut q = inv::inventory_items
            .filter(inv::user_id.eq(user_id))
            .into_boxed();
        if let Some(category) = &filters.category {
            q = q.filter(inv::category.eq(category.to_lowercase()));
        }
        if let Some(location) = &filters.location {
            q = q.filter(inv::location.eq(location.to_lowercase()));
        }
        if let Some(days) = filters.expiring_within {
            let cutoff = Utc::now().naive_utc() + Duration::days(days);
            q = q.filter(inv::expiry_date.le(cutoff));
        }
        q.order(inv::name.asc())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "items": items,
        "total": items.len(),
    })))
}

#[post("/api/inventory")]
async fn create_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    queue: Option<web::Data<AsyncQueue<NoTls>>>,
    body: web::Json<NewInventoryItem>,
) -> Result<HttpResponse, ApiError> {
    let mut new_item = body.into_inner();
    new_item.user_id = owner.0;
    new_item.validate()?;

    // Derive an expiry from the shelf-life table when the caller supplied
    // a freshness score but no explicit date.
    if new_item.expiry_date.is_none() {
        if let Some(score) = new_item.freshness_score {
            new_item.expiry_date = Some(vision::estimate_expiry(&new_item.category, score));
        }
    }

    let barcode = new_item.barcode.clone();
    let item: InventoryItem = run_blocking(&pool, move |conn| {
        diesel::insert_into(inv::inventory_items)
            .values(&new_item)
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    if let (Some(barcode), Some(queue)) = (barcode, queue) {
        let mut queue = queue.get_ref().clone();
        if let Err(e) = queue.insert_task(&FetchProductJob { barcode }).await {
            log::warn!("Failed to enqueue product lookup: {:?}", e);
        }
    }

    Ok(HttpResponse::Created().json(item))
}

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

#[get("/api/inventory/expiring")]
async fn expiring_items(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    query: web::Query<ExpiringQuery>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let days = query.days.unwrap_or(3);
    if days < 0 {
        return Err(ApiError::Validation(
            "Days must be non-negative".to_string(),
        ));
    }

    let mut items: Vec<InventoryItem> = run_blocking(&pool, move |conn| {
        inv::inventory_items
            .filter(inv::user_id.eq(user_id))
            .filter(inv::expiry_date.is_not_null())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    items.retain(|item| item.is_expiring_soon(days));
    items.sort_by_key(|item| item.expiry_date);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "items": items,
        "total": items.len(),
        "days": days,
    })))
}

#[get("/api/inventory/{id}")]
async fn get_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let item_id = path.into_inner();

    let item: InventoryItem = run_blocking(&pool, move |conn| {
        inv::inventory_items
            .filter(inv::id.eq(item_id))
            .filter(inv::user_id.eq(user_id))
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(item))
}

#[put("/api/inventory/{id}")]
async fn update_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<InventoryItemChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let item_id = path.into_inner();
    let changes = body.into_inner();
    changes.validate()?;

    let item: InventoryItem = run_blocking(&pool, move |conn| {
        diesel::update(
            inv::inventory_items
                .filter(inv::id.eq(item_id))
                .filter(inv::user_id.eq(user_id)),
        )
        .set((&changes, inv::updated_at.eq(Utc::now().naive_utc())))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/inventory/{id}")]
async fn delete_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let item_id = path.into_inner();

    run_blocking(&pool, move |conn| {
        let deleted = diesel::delete(
            inv::inventory_items
                .filter(inv::id.eq(item_id))
                .filter(inv::user_id.eq(user_id)),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Inventory item not found".to_string()));
        }
        Ok(())
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Inventory item deleted",
        "id": item_id,
    })))
}
