use super::run_blocking;
use crate::auth::OwnerId;
use crate::catalog;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{
    MealPlan, MealPlanChanges, MealPlanItem, MealPlanItemChanges, MealPlanItemPayload,
    NewMealPlan,
};
use crate::schema::meal_plan_items::dsl as mpi;
use crate::schema::meal_plans::dsl as mp;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::Deserialize;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_plans)
        .service(create_plan)
        .service(get_plan)
        .service(update_plan)
        .service(delete_plan)
        .service(add_item)
        .service(update_item)
        .service(delete_item);
}

fn plan_for_owner(
    conn: &mut PgConnection,
    plan_id: i32,
    user_id: i32,
) -> Result<MealPlan, ApiError> {
    mp::meal_plans
        .filter(mp::id.eq(plan_id))
        .filter(mp::user_id.eq(user_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Meal plan not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct PlanListQuery {
    pub active: Option<bool>,
}

#[get("/api/meal-plans")]
async fn list_plans(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    query: web::Query<PlanListQuery>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let active = query.active;

    let plans: Vec<MealPlan> = run_blocking(&pool, move |conn| {
        let mut q = mp::meal_plans.filter(mp::user_id.eq(user_id)).into_boxed();
        if let Some(active) = active {
            q = q.filter(mp::is_active.eq(active));
        }
        q.order(mp::start_date.desc())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meal_plans": plans,
        "total": plans.len(),
    })))
}

#[post("/api/meal-plans")]
async fn create_plan(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    body: web::Json<NewMealPlan>,
) -> Result<HttpResponse, ApiError> {
    let mut new_plan = body.into_inner();
    new_plan.user_id = owner.0;
    new_plan.validate()?;

    let plan: MealPlan = run_blocking(&pool, move |conn| {
        diesel::insert_into(mp::meal_plans)
            .values(&new_plan)
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Created().json(plan))
}

#[get("/api/meal-plans/{id}")]
async fn get_plan(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let plan_id = path.into_inner();

    let (plan, items): (MealPlan, Vec<MealPlanItem>) = run_blocking(&pool, move |conn| {
        let plan = plan_for_owner(conn, plan_id, user_id)?;
        let items = mpi::meal_plan_items
            .filter(mpi::meal_plan_id.eq(plan.id))
            .order((mpi::meal_date.asc(), mpi::id.asc()))
            .load(conn)?;
        Ok((plan, items))
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meal_plan": plan,
        "items": items,
    })))
}

#[put("/api/meal-plans/{id}")]
async fn update_plan(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<MealPlanChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let plan_id = path.into_inner();
    let changes = body.into_inner();

    if let (Some(start), Some(end)) = (changes.start_date, changes.end_date) {
        if end < start {
            return Err(ApiError::Validation(
                "Plan end date must not precede its start date".to_string(),
            ));
        }
    }

    let plan: MealPlan = run_blocking(&pool, move |conn| {
        diesel::update(
            mp::meal_plans
                .filter(mp::id.eq(plan_id))
                .filter(mp::user_id.eq(user_id)),
        )
        .set((&changes, mp::updated_at.eq(Utc::now().naive_utc())))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Meal plan not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(plan))
}

#[delete("/api/meal-plans/{id}")]
async fn delete_plan(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let plan_id = path.into_inner();

    run_blocking(&pool, move |conn| {
        conn.transaction(|conn| {
            plan_for_owner(conn, plan_id, user_id)?;
            // Items share their parent's lifecycle.
            diesel::delete(mpi::meal_plan_items.filter(mpi::meal_plan_id.eq(plan_id)))
                .execute(conn)?;
            diesel::delete(mp::meal_plans.filter(mp::id.eq(plan_id))).execute(conn)?;
            Ok(())
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Meal plan deleted",
        "id": plan_id,
    })))
}

#[post("/api/meal-plans/{id}/items")]
async fn add_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<MealPlanItemPayload>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let plan_id = path.into_inner();
    let payload = body.into_inner();
    payload.validate()?;

    if catalog::find_by_id(catalog::builtin(), payload.recipe_id).is_none() {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    }

    let item: MealPlanItem = run_blocking(&pool, move |conn| {
        plan_for_owner(conn, plan_id, user_id)?;
        diesel::insert_into(mpi::meal_plan_items)
            .values(&payload.into_row(plan_id))
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Created().json(item))
}

#[put("/api/meal-plans/{plan_id}/items/{item_id}")]
async fn update_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<(i32, i32)>,
    body: web::Json<MealPlanItemChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let (plan_id, item_id) = path.into_inner();
    let changes = body.into_inner();

    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    if let Some(servings) = changes.servings {
        if servings < 1 {
            return Err(ApiError::Validation(
                "Servings must be at least 1".to_string(),
            ));
        }
    }

    let item: MealPlanItem = run_blocking(&pool, move |conn| {
        plan_for_owner(conn, plan_id, user_id)?;
        diesel::update(
            mpi::meal_plan_items
                .filter(mpi::id.eq(item_id))
                .filter(mpi::meal_plan_id.eq(plan_id)),
        )
        .set(&changes)
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Meal plan item not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/meal-plans/{plan_id}/items/{item_id}")]
async fn delete_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let (plan_id, item_id) = path.into_inner();

    run_blocking(&pool, move |conn| {
        plan_for_owner(conn, plan_id, user_id)?;
        let deleted = diesel::delete(
            mpi::meal_plan_items
                .filter(mpi::id.eq(item_id))
                .filter(mpi::meal_plan_id.eq(plan_id)),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound("Meal plan item not found".to_string()));
        }
        Ok(())
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Meal plan item deleted",
        "id": item_id,
    })))
}
