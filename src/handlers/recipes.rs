use super::run_blocking;
use crate::auth::OwnerId;
use crate::catalog::{self, CatalogRecipe};
use crate::db::DbPool;
use crate::error::ApiError;
use crate::matching;
use crate::models::{
    NewRecipeIngredient, Recipe, RecipeChanges, RecipeIngredient, RecipePayload,
    RecipeWithIngredients, UserPreferences, UserRecipe, UserRecipeUpsert,
};
use crate::schema::inventory_items::dsl as inv;
use crate::schema::recipe_ingredients::dsl as ri;
use crate::schema::recipes::dsl as rec;
use crate::schema::user_preferences::dsl as up;
use crate::schema::user_recipes::dsl as ur;
use crate::substitutions;
use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use diesel::prelude::*;
use serde::Deserialize;
use std::collections::HashSet;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments (generate, substitute, favorites, custom) must be
    // registered ahead of the {id} routes.
    cfg.service(generate_recipes)
        .service(substitute_ingredient)
        .service(favorite_recipes)
        .service(list_custom_recipes)
        .service(create_custom_recipe)
        .service(get_custom_recipe)
        .service(update_custom_recipe)
        .service(delete_custom_recipe)
        .service(list_recipes)
        .service(toggle_favorite)
        .service(mark_cooked)
        .service(recipe_nutrition)
        .service(get_recipe);
}

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    /// Comma-separated list; a recipe matches when it carries any of them.
    pub dietary_tags: Option<String>,
    pub max_time: Option<u32>,
    pub search: Option<String>,
}

#[get("/api/recipes")]
async fn list_recipes(
    _owner: OwnerId,
    query: web::Query<RecipeListQuery>,
) -> Result<HttpResponse, ApiError> {
    let q = query.into_inner();
    let mut recipes: Vec<&CatalogRecipe> = catalog::builtin().iter().collect();

    if let Some(cuisine) = &q.cuisine {
        let cuisine = cuisine.to_lowercase();
        recipes.retain(|r| r.cuisine == cuisine);
    }
    if let Some(difficulty) = &q.difficulty {
        let difficulty = difficulty.to_lowercase();
        recipes.retain(|r| r.difficulty.as_str() == difficulty);
    }
    if let Some(tags) = &q.dietary_tags {
        let wanted: Vec<String> = tags
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if !wanted.is_empty() {
            recipes.retain(|r| wanted.iter().any(|t| r.dietary_tags.contains(t)));
        }
    }
    if let Some(max_time) = q.max_time {
        recipes.retain(|r| r.total_time() <= max_time);
    }
    if let Some(search) = &q.search {
        let needle = search.to_lowercase();
        if !needle.is_empty() {
            recipes.retain(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r.ingredients.iter().any(|i| i.contains(&needle))
            });
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "recipes": recipes,
        "total": recipes.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Explicit pantry; absent means derive from the caller's inventory.
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

#[post("/api/recipes/generate")]
async fn generate_recipes(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    body: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let available: HashSet<String> = match body.into_inner().ingredients {
        Some(list) => {
            if list.iter().any(|i| i.trim().is_empty()) {
                return Err(ApiError::Validation(
                    "Ingredient names cannot be empty".to_string(),
                ));
            }
            list.into_iter().map(|i| i.trim().to_lowercase()).collect()
        }
        None => {
            let names: Vec<String> = run_blocking(&pool, move |conn| {
                inv::inventory_items
                    .filter(inv::user_id.eq(user_id))
                    .select(inv::name)
                    .load(conn)
                    .map_err(ApiError::from)
            })
            .await?;
            names.into_iter().map(|n| n.to_lowercase()).collect()
        }
    };

    // Preference data fails closed: when it cannot be loaded it is treated
    // as absent, never as a request failure.
    let match_prefs = match run_blocking(&pool, move |conn| {
        up::user_preferences
            .filter(up::user_id.eq(user_id))
            .first::<UserPreferences>(conn)
            .optional()
            .map_err(ApiError::from)
    })
    .await
    {
        Ok(prefs) => prefs.map(|p| p.to_match_preferences()),
        Err(e) => {
            log::warn!("Skipping preferences for user {}: {}", user_id, e);
            None
        }
    };

    let suggestions = matching::score_recipes(&available, catalog::builtin(), match_prefs.as_ref());

    let mut available: Vec<String> = available.into_iter().collect();
    available.sort();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "suggestions": suggestions,
        "available_ingredients": available,
        "total": suggestions.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct SubstituteRequest {
    #[serde(default)]
    pub ingredient: String,
}

#[post("/api/recipes/substitute")]
async fn substitute_ingredient(
    _owner: OwnerId,
    body: web::Json<SubstituteRequest>,
) -> Result<HttpResponse, ApiError> {
    let ingredient = body.ingredient.trim().to_lowercase();
    if ingredient.is_empty() {
        return Err(ApiError::Validation("Ingredient is required".to_string()));
    }

    let substitutions = substitutions::substitutes_for(&ingredient);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ingredient": ingredient,
        "substitutions": substitutions,
    })))
}

#[get("/api/recipes/favorites")]
async fn favorite_recipes(
    owner: OwnerId,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let rows: Vec<UserRecipe> = run_blocking(&pool, move |conn| {
        ur::user_recipes
            .filter(ur::user_id.eq(user_id))
            .filter(ur::is_favorite.eq(true))
            .order(ur::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    })
    .await?;

    let catalog = catalog::builtin();
    let favorites: Vec<serde_json::Value> = rows
        .iter()
        .filter_map(|row| {
            catalog::find_by_id(catalog, row.recipe_id).map(|recipe| {
                serde_json::json!({
                    "recipe": recipe,
                    "rating": row.rating,
                    "times_cooked": row.times_cooked,
                    "last_cooked": row.last_cooked,
                })
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "favorites": favorites,
        "total": favorites.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    /// Absent means toggle the current state.
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[post("/api/recipes/{id}/favorite")]
async fn toggle_favorite(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<FavoriteRequest>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let recipe_id = path.into_inner();
    let request = body.into_inner();

    if catalog::find_by_id(catalog::builtin(), recipe_id).is_none() {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    }

    let row: UserRecipe = run_blocking(&pool, move |conn| {
        let existing: Option<UserRecipe> = ur::user_recipes
            .filter(ur::user_id.eq(user_id))
            .filter(ur::recipe_id.eq(recipe_id))
            .first(conn)
            .optional()?;

        let is_favorite = request
            .is_favorite
            .unwrap_or_else(|| !existing.as_ref().map(|e| e.is_favorite).unwrap_or(false));

        let upsert = UserRecipeUpsert {
            user_id,
            recipe_id,
            is_favorite,
            rating: request.rating.or(existing.as_ref().and_then(|e| e.rating)),
            notes: request
                .notes
                .or(existing.as_ref().and_then(|e| e.notes.clone())),
        };
        upsert.validate()?;

        diesel::insert_into(ur::user_recipes)
            .values(&upsert)
            .on_conflict((ur::user_id, ur::recipe_id))
            .do_update()
            .set(&upsert)
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Recipe favorite status updated",
        "recipe_id": recipe_id,
        "favorite": row,
    })))
}

#[post("/api/recipes/{id}/cooked")]
async fn mark_cooked(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let recipe_id = path.into_inner();

    if catalog::find_by_id(catalog::builtin(), recipe_id).is_none() {
        return Err(ApiError::NotFound("Recipe not found".to_string()));
    }

    let row: UserRecipe = run_blocking(&pool, move |conn| {
        let now = Utc::now().naive_utc();
        diesel::insert_into(ur::user_recipes)
            .values((
                ur::user_id.eq(user_id),
                ur::recipe_id.eq(recipe_id),
                ur::times_cooked.eq(1),
                ur::last_cooked.eq(now),
            ))
            .on_conflict((ur::user_id, ur::recipe_id))
            .do_update()
            .set((
                ur::times_cooked.eq(ur::times_cooked + 1),
                ur::last_cooked.eq(now),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(row))
}

#[get("/api/recipes/{id}/nutrition")]
async fn recipe_nutrition(
    _owner: OwnerId,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let recipe_id = path.into_inner();
    let recipe = catalog::find_by_id(catalog::builtin(), recipe_id)
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    let nutrition = &recipe.nutrition;
    // Percentage daily values against a 2000 kcal reference diet.
    let round1 = |v: f64| (v * 10.0).round() / 10.0;
    let daily_values = serde_json::json!({
        "calories": round1(nutrition.calories as f64 / 2000.0 * 100.0),
        "protein": round1(nutrition.protein as f64 / 50.0 * 100.0),
        "carbs": round1(nutrition.carbs as f64 / 300.0 * 100.0),
        "fat": round1(nutrition.fat as f64 / 65.0 * 100.0),
    });

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "recipe_id": recipe_id,
        "nutrition": nutrition,
        "daily_values": daily_values,
        "servings": recipe.servings,
    })))
}

#[get("/api/recipes/{id}")]
async fn get_recipe(_owner: OwnerId, path: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let recipe_id = path.into_inner();
    let recipe = catalog::find_by_id(catalog::builtin(), recipe_id)
        .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "recipe": recipe })))
}

#[get("/api/recipes/custom")]
async fn list_custom_recipes(
    owner: OwnerId,
    pool: web::Data<DbPool>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;

    let recipes: Vec<RecipeWithIngredients> = run_blocking(&pool, move |conn| {
        let rows: Vec<Recipe> = rec::recipes
            .filter(rec::user_id.eq(user_id))
            .order(rec::updated_at.desc())
            .load(conn)?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut children: Vec<RecipeIngredient> = ri::recipe_ingredients
            .filter(ri::recipe_id.eq_any(&ids))
            .order(ri::id.asc())
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|recipe| {
                let (mine, rest): (Vec<_>, Vec<_>) = children
                    .drain(..)
                    .partition(|ing| ing.recipe_id == recipe.id);
                children = rest;
                RecipeWithIngredients {
                    recipe,
                    ingredients: mine,
                }
            })
            .collect())
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "recipes": recipes,
        "total": recipes.len(),
    })))
}

#[post("/api/recipes/custom")]
async fn create_custom_recipe(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    body: web::Json<RecipePayload>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();
    payload.validate()?;
    let (new_recipe, ingredient_payloads) = payload.into_rows(owner.0);

    let created: RecipeWithIngredients = run_blocking(&pool, move |conn| {
        conn.transaction(|conn| {
            let recipe: Recipe = diesel::insert_into(rec::recipes)
                .values(&new_recipe)
                .get_result(conn)?;

            let rows: Vec<NewRecipeIngredient> = ingredient_payloads
                .into_iter()
                .map(|p| NewRecipeIngredient::from_payload(recipe.id, p))
                .collect();
            let ingredients: Vec<RecipeIngredient> = diesel::insert_into(ri::recipe_ingredients)
                .values(&rows)
                .get_results(conn)?;

            Ok(RecipeWithIngredients {
                recipe,
                ingredients,
            })
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(created))
}

#[get("/api/recipes/custom/{id}")]
async fn get_custom_recipe(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let recipe_id = path.into_inner();

    let found: RecipeWithIngredients = run_blocking(&pool, move |conn| {
        let recipe: Recipe = rec::recipes
            .filter(rec::id.eq(recipe_id))
            .filter(rec::user_id.eq(user_id))
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

        let ingredients: Vec<RecipeIngredient> = ri::recipe_ingredients
            .filter(ri::recipe_id.eq(recipe.id))
            .order(ri::id.asc())
            .load(conn)?;

        Ok(RecipeWithIngredients {
            recipe,
            ingredients,
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(found))
}

#[put("/api/recipes/custom/{id}")]
async fn update_custom_recipe(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<RecipeChanges>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let recipe_id = path.into_inner();
    let changes = body.into_inner();
    changes.validate()?;

    let updated: Recipe = run_blocking(&pool, move |conn| {
        conn.transaction(|conn| {
            let current: Recipe = rec::recipes
                .filter(rec::id.eq(recipe_id))
                .filter(rec::user_id.eq(user_id))
                .first(conn)
                .optional()?
                .ok_or_else(|| ApiError::NotFound("Recipe not found".to_string()))?;

            // total_time tracks the other two whenever either changes.
            let prep = changes.prep_time.or(current.prep_time);
            let cook = changes.cook_time.or(current.cook_time);
            let total = match (prep, cook) {
                (Some(p), Some(c)) => Some(p + c),
                _ => None,
            };

            diesel::update(rec::recipes.filter(rec::id.eq(current.id)))
                .set((
                    &changes,
                    rec::total_time.eq(total),
                    rec::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result(conn)
                .map_err(ApiError::from)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/recipes/custom/{id}")]
async fn delete_custom_recipe(
    owner: OwnerId,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let OwnerId(user_id) = owner;
    let recipe_id = path.into_inner();

    run_blocking(&pool, move |conn| {
        conn.transaction(|conn| {
            let owned: Option<i32> = rec::recipes
                .filter(rec::id.eq(recipe_id))
                .filter(rec::user_id.eq(user_id))
                .select(rec::id)
                .first(conn)
                .optional()?;
            if owned.is_none() {
                return Err(ApiError::NotFound("Recipe not found".to_string()));
            }

            // Ingredient rows share their parent's lifecycle.
            diesel::delete(ri::recipe_ingredients.filter(ri::recipe_id.eq(recipe_id)))
                .execute(conn)?;
            diesel::delete(rec::recipes.filter(rec::id.eq(recipe_id))).execute(conn)?;
            Ok(())
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Recipe deleted",
        "id": recipe_id,
    })))
}
