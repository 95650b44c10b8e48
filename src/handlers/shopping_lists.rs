use super::run_blocking;
use crate::auth::OwnerId;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::models::{
    NewShoppingList, NewShoppingListItem, ShoppingList, ShoppingListChanges, ShoppingListItem,
    ShoppingListItemChanges,
};
use crate::schema::shopping_list_items::dsl as sli;
use crate::schema::shopping_lists::dsl as sl;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_lists)
        .service(create_list)
        .service(get_list)
        .service(update_list)
        .service(delete_list)
        .service(add_item)
        .service(update_item)
        .service(delete_item);
}

fn list_for_owner(
    conn: &mut PgConnection,
    list_id: i32,
    user_id: i32,
) -> Result<ShoppingList, ApiError> {
    sl::shopping_lists
        .filter(sl::id.eq(list_id))
        .filter(sl::user_id.eq(user_id))
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Shopping list not found".to_string()))
}

#[get("/api/shopping-lists")]
async fn list_lists(owner: OwnerId, pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let lists: Vec<ShoppingList> = run_blocking(&pool, move |conn| {
        sl::shopping_lists
            .filter(sl::user_id.eq(user_id))
            .order(sl::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "shopping_lists": lists,
        "total": lists.len(),
    })))
}

#[post("/api/shopping-lists")]
async fn create_list(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    body: web::Json<NewShoppingList>,
) -> Result<HttpResponse, ApiError> {
    let mut new_list = body.into_inner();
    new_list.user_id = owner.0;
    new_list.validate()?;

    let list: ShoppingList = run_blocking(&pool, move |conn| {
        diesel::insert_into(sl::shopping_lists)
            .values(&new_list)
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Created().json(list))
}

#[get("/api/shopping-lists/{id}")]
async fn get_list(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let list_id = path.into_inner();

    let (list, items): (ShoppingList, Vec<ShoppingListItem>) =
        run_blocking(&pool, move |conn| {
            let list = list_for_owner(conn, list_id, user_id)?;
            let items = sli::shopping_list_items
                .filter(sli::shopping_list_id.eq(list.id))
                .order(sli::id.asc())
                .load(conn)?;
            Ok((list, items))
        })
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "shopping_list": list,
        "items": items,
    })))
}

#[put("/api/shopping-lists/{id}")]
async fn update_list(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<ShoppingListChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let list_id = path.into_inner();
    let changes = body.into_inner();

    if let Some(name) = &changes.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("List name cannot be empty".to_string()));
        }
    }

    let list: ShoppingList = run_blocking(&pool, move |conn| {
        diesel::update(
            sl::shopping_lists
                .filter(sl::id.eq(list_id))
                .filter(sl::user_id.eq(user_id)),
        )
        .set((&changes, sl::updated_at.eq(Utc::now().naive_utc())))
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Shopping list not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(list))
}

#[delete("/api/shopping-lists/{id}")]
async fn delete_list(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let list_id = path.into_inner();

    run_blocking(&pool, move |conn| {
        conn.transaction(|conn| {
            list_for_owner(conn, list_id, user_id)?;
            // Items share their parent's lifecycle.
            diesel::delete(sli::shopping_list_items.filter(sli::shopping_list_id.eq(list_id)))
                .execute(conn)?;
            diesel::delete(sl::shopping_lists.filter(sl::id.eq(list_id))).execute(conn)?;
            Ok(())
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Shopping list deleted",
        "id": list_id,
    })))
}

#[post("/api/shopping-lists/{id}/items")]
async fn add_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<NewShoppingListItem>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let list_id = path.into_inner();
    let mut new_item = body.into_inner();
    new_item.shopping_list_id = list_id;
    new_item.validate()?;

    let item: ShoppingListItem = run_blocking(&pool, move |conn| {
        list_for_owner(conn, list_id, user_id)?;
        diesel::insert_into(sli::shopping_list_items)
            .values(&new_item)
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Created().json(item))
}

#[put("/api/shopping-lists/{list_id}/items/{item_id}")]
async fn update_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<(i32, i32)>,
    body: web::Json<ShoppingListItemChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let (list_id, item_id) = path.into_inner();
    let changes = body.into_inner();

    if changes.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    if let Some(quantity) = changes.quantity {
        if quantity < 0.0 {
            return Err(ApiError::Validation(
                "Quantity must be non-negative".to_string(),
            ));
        }
    }

    let item: ShoppingListItem = run_blocking(&pool, move |conn| {
        list_for_owner(conn, list_id, user_id)?;
        diesel::update(
            sli::shopping_list_items
                .filter(sli::id.eq(item_id))
                .filter(sli::shopping_list_id.eq(list_id)),
        )
        .set(&changes)
        .get_result(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Shopping list item not found".to_string()))
    })
    .await?;

    Ok(HttpResponse::Ok().json(item))
}

#[delete("/api/shopping-lists/{list_id}/items/{item_id}")]
async fn delete_item(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let (list_id, item_id) = path.into_inner();

    run_blocking(&pool, move |conn| {
        list_for_owner(conn, list_id, user_id)?;
        let deleted = diesel::delete(
            sli::shopping_list_items
                .filter(sli::id.eq(item_id))
                .filter(sli::shopping_list_id.eq(list_id)),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Err(ApiError::NotFound(
                "Shopping list item not found".to_string(),
            ));
        }
        Ok(())
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Shopping list item deleted",
        "id": item_id,
    })))
}
