use super::run_blocking;
use crate::auth::OwnerId;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{PreferencesPayload, UserPreferences};
use crate::schema::user_preferences::dsl as up;
use actix_web::{get, put, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_preferences).service(upsert_preferences);
}

#[get("/api/preferences")]
async fn get_preferences(
    owner: OwnerId,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let prefs: UserPreferences = run_blocking(&pool, move |conn| {
        up::user_preferences
            .filter(up::user_id.eq(user_id))
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("Preferences not set".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(prefs.to_response()))
}

#[put("/api/preferences")]
async fn upsert_preferences(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    body: web::Json<PreferencesPayload>,
) -> Result<HttpResponse, ApiError> {
    let upsert = body.into_inner().into_upsert(owner.0)?;

    let prefs: UserPreferences = run_blocking(&pool, move |conn| {
        diesel::insert_into(up::user_preferences)
            .values(&upsert)
            .on_conflict(up::user_id)
            .do_update()
            .set((&upsert, up::updated_at.eq(Utc::now().naive_utc())))
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(prefs.to_response()))
}
