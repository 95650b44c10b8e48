mod common;

use actix_web::{test, web, App};
use larder::handlers;

macro_rules! recipes_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(common::unreachable_pool()))
                .configure(handlers::recipes::configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_list_recipes_returns_full_catalog() {
    let app = recipes_app!();

    let req = test::TestRequest::get()
        .uri("/api/recipes")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 5);
    assert_eq!(body["recipes"][0]["name"], "Chicken Stir Fry");
}

#[actix_rt::test]
async fn test_list_recipes_requires_owner_header() {
    let app = recipes_app!();

    let req = test::TestRequest::get().uri("/api/recipes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_list_recipes_filters() {
    let app = recipes_app!();

    let req = test::TestRequest::get()
        .uri("/api/recipes?cuisine=italian")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["name"], "Vegetable Pasta");

    let req = test::TestRequest::get()
        .uri("/api/recipes?dietary_tags=vegetarian")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);

    let req = test::TestRequest::get()
        .uri("/api/recipes?max_time=20")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);

    let req = test::TestRequest::get()
        .uri("/api/recipes?search=smoothie")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["name"], "Banana Smoothie");
}

#[actix_rt::test]
async fn test_get_recipe_by_id_and_not_found() {
    let app = recipes_app!();

    let req = test::TestRequest::get()
        .uri("/api/recipes/4")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["recipe"]["name"], "Salmon with Vegetables");

    let req = test::TestRequest::get()
        .uri("/api/recipes/99")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_generate_with_full_pantry_scores_one_hundred() {
    let app = recipes_app!();

    let req = test::TestRequest::post()
        .uri("/api/recipes/generate")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({
            "ingredients": [
                "chicken breast", "bell pepper", "onion",
                "garlic", "soy sauce", "oil"
            ]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let top = &body["suggestions"][0];
    assert_eq!(top["name"], "Chicken Stir Fry");
    assert_eq!(top["match_percentage"], 100.0);
    assert_eq!(top["missing_ingredients"].as_array().unwrap().len(), 0);
    assert_eq!(top["available_ingredients"].as_array().unwrap().len(), 6);
    assert_eq!(body["available_ingredients"].as_array().unwrap().len(), 6);
}

#[actix_rt::test]
async fn test_generate_excludes_below_threshold() {
    let app = recipes_app!();

    // 2 of Vegetable Pasta's 7 ingredients ≈ 28.57%, under the 30% bar.
    let req = test::TestRequest::post()
        .uri("/api/recipes/generate")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({ "ingredients": ["pasta", "tomato"] }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 0);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_generate_rejects_empty_ingredient_names() {
    let app = recipes_app!();

    let req = test::TestRequest::post()
        .uri("/api/recipes/generate")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({ "ingredients": ["chicken breast", "  "] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_substitute_known_ingredient() {
    let app = recipes_app!();

    let req = test::TestRequest::post()
        .uri("/api/recipes/substitute")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({ "ingredient": "Chicken" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ingredient"], "chicken");
    let subs = body["substitutions"].as_array().unwrap();
    let names: Vec<&str> = subs
        .iter()
        .map(|s| s["ingredient"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["turkey", "tofu", "tempeh", "seitan"]);
    assert_eq!(subs[0]["ratio"], "1:1");
    assert_eq!(subs[0]["notes"], "Good substitute for chicken");
    assert_eq!(subs[0]["category"], "direct");
}

#[actix_rt::test]
async fn test_substitute_unknown_ingredient_is_empty_not_error() {
    let app = recipes_app!();

    let req = test::TestRequest::post()
        .uri("/api/recipes/substitute")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({ "ingredient": "kale" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["substitutions"].as_array().unwrap().len(), 0);
}

#[actix_rt::test]
async fn test_substitute_requires_ingredient() {
    let app = recipes_app!();

    let req = test::TestRequest::post()
        .uri("/api/recipes/substitute")
        .insert_header(("X-User-Id", "1"))
        .set_json(serde_json::json!({ "ingredient": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_recipe_nutrition_daily_values() {
    let app = recipes_app!();

    let req = test::TestRequest::get()
        .uri("/api/recipes/1/nutrition")
        .insert_header(("X-User-Id", "1"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["nutrition"]["calories"], 320);
    // Against the 2000 kcal / 50 g / 300 g / 65 g reference values.
    assert_eq!(body["daily_values"]["calories"], 16.0);
    assert_eq!(body["daily_values"]["protein"], 56.0);
    assert_eq!(body["daily_values"]["carbs"], 4.0);
    assert_eq!(body["daily_values"]["fat"], 27.7);
    assert_eq!(body["servings"], 4);
}
