use axum::http::StatusCode;
use serde_json::Value;

use foodgram_testing::auth::MockAuth;

use crate::helpers::{WithAuth, create_recipe, register, seed_ingredients, spawn_app};

fn sorted_names(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_owned())
        .collect();
    names.sort();
    names
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_by_case_insensitive_prefix() {
    let app = spawn_app().await;
    seed_ingredients(
        &app,
        &[("Sugar", "g"), ("salt", "g"), ("soy sauce", "ml"), ("flour", "g")],
    )
    .await;

    let body: Value = app
        .server
        .get("/ingredients/")
        .add_query_param("name", "s")
        .await
        .json();
    assert_eq!(sorted_names(&body), ["Sugar", "salt", "soy sauce"]);

    let all: Value = app.server.get("/ingredients/").await.json();
    assert_eq!(all.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn should_match_wildcards_literally() {
    let app = spawn_app().await;
    seed_ingredients(&app, &[("milk 3%", "ml"), ("milk 35", "ml"), ("mi_so", "g")]).await;

    let percent: Value = app
        .server
        .get("/ingredients/")
        .add_query_param("name", "milk 3%")
        .await
        .json();
    assert_eq!(sorted_names(&percent), ["milk 3%"]);

    let underscore: Value = app
        .server
        .get("/ingredients/")
        .add_query_param("name", "mi_")
        .await
        .json();
    assert_eq!(sorted_names(&underscore), ["mi_so"]);
}

#[tokio::test]
async fn should_get_ingredient_by_id() {
    let app = spawn_app().await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;

    let response = app
        .server
        .get(&format!("/ingredients/{}/", ids["flour"]))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "flour");
    assert_eq!(body["measurement_unit"], "g");

    let missing = app.server.get("/ingredients/999/").await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["kind"], "INGREDIENT_NOT_FOUND");
}

// ── Delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_ingredient_delete_for_non_admin() {
    let app = spawn_app().await;
    let user = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;

    app.server
        .delete(&format!("/ingredients/{}/", ids["flour"]))
        .with_auth(MockAuth::user(user))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_reject_deleting_referenced_ingredient() {
    let app = spawn_app().await;
    let user = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g"), ("salt", "g")]).await;
    create_recipe(&app, MockAuth::user(user), "Bread", &[(ids["flour"], 500)]).await;
    let admin = MockAuth::admin(user);

    let response = app
        .server
        .delete(&format!("/ingredients/{}/", ids["flour"]))
        .with_auth(admin)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INGREDIENT_IN_USE");

    app.server
        .delete(&format!("/ingredients/{}/", ids["salt"]))
        .with_auth(admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&format!("/ingredients/{}/", ids["salt"]))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_ignore_duplicate_ingredients_on_bulk_load() {
    let app = spawn_app().await;
    seed_ingredients(&app, &[("flour", "g")]).await;
    let ids = seed_ingredients(&app, &[("flour", "g"), ("flour", "kg")]).await;

    let all: Value = app.server.get("/ingredients/").await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert!(ids.contains_key("flour"));
}
