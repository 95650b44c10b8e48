pub mod inventory;
pub mod meal_plans;
pub mod preferences;
pub mod recipes;
pub mod scanner;
pub mod shopping_lists;

use crate::db::DbPool;
use crate::error::ApiError;
use actix_web::{get, web, HttpResponse, Responder};
use diesel::PgConnection;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Larder API is running".to_string(),
    })
}

/// Run a Diesel closure on the blocking thread pool with a pooled
/// connection.
pub(crate) async fn run_blocking<F, T>(pool: &web::Data<DbPool>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut PgConnection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    web::block(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await?
}
