use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use foodgram_testing::auth::MockAuth;

use crate::helpers::{
    PUBLIC_URL, WithAuth, create_recipe, recipe_body, register, result_ids, seed_ingredients,
    spawn_app,
};

// ── Create ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_recipe_with_nested_author_and_ingredients() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g"), ("eggs", "pcs")]).await;

    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(author))
        .json(&recipe_body("Pancakes", &[(ids["flour"], 200), (ids["eggs"], 2)]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["name"], "Pancakes");
    assert_eq!(body["cooking_time"], 30);
    assert_eq!(body["author"]["id"], author);
    assert_eq!(body["is_favorited"], false);
    assert_eq!(body["is_in_shopping_cart"], false);
    let image = body["image"].as_str().unwrap();
    assert!(image.starts_with(&format!("{PUBLIC_URL}/media/recipes/images/")));

    let ingredients = body["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 2);
    let flour = ingredients
        .iter()
        .find(|i| i["name"] == "flour")
        .unwrap();
    assert_eq!(flour["id"], ids["flour"]);
    assert_eq!(flour["measurement_unit"], "g");
    assert_eq!(flour["amount"], 200);
}

#[tokio::test]
async fn should_require_identity_to_create_recipe() {
    let app = spawn_app().await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    app.server
        .post("/recipes/")
        .json(&recipe_body("Bread", &[(ids["flour"], 500)]))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_404_when_author_has_no_account() {
    let app = spawn_app().await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(999))
        .json(&recipe_body("Bread", &[(ids["flour"], 500)]))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_recipe_without_image_as_validation() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let mut body = recipe_body("Bread", &[(ids["flour"], 500)]);
    body.as_object_mut().unwrap().remove("image");

    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(author))
        .json(&body)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "image");
}

#[tokio::test]
async fn should_reject_mistyped_cooking_time_on_update() {
    let app = spawn_app().await;
    let author = MockAuth::user(register(&app, "chef").await);
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let recipe = create_recipe(&app, author, "Bread", &[(ids["flour"], 500)]).await;

    let response = app
        .server
        .patch(&format!("/recipes/{recipe}/"))
        .with_auth(author)
        .json(&json!({ "cooking_time": "ten" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "cooking_time");
}

#[tokio::test]
async fn should_reject_duplicate_ingredients_naming_them() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g"), ("eggs", "pcs")]).await;
    let flour = ids["flour"];

    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(author))
        .json(&recipe_body(
            "Bread",
            &[(flour, 100), (ids["eggs"], 1), (flour, 200)],
        ))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "ingredients");
    assert_eq!(
        body["message"],
        format!("duplicate ingredient ids: {flour}").as_str()
    );
}

#[tokio::test]
async fn should_reject_unknown_ingredient() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;

    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(author))
        .json(&recipe_body("Bread", &[(4242, 1)]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "ingredients");
}

#[tokio::test]
async fn should_reject_zero_cooking_time() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let mut body = recipe_body("Bread", &[(ids["flour"], 500)]);
    body["cooking_time"] = json!(0);

    let response = app
        .server
        .post("/recipes/")
        .with_auth(MockAuth::user(author))
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "cooking_time");
}

// ── Update / delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_ingredients_on_patch() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g"), ("sugar", "g")]).await;
    let recipe = create_recipe(&app, MockAuth::user(author), "Cake", &[(ids["flour"], 300)]).await;

    let response = app
        .server
        .patch(&format!("/recipes/{recipe}/"))
        .with_auth(MockAuth::user(author))
        .json(&json!({
            "name": "Sweet cake",
            "ingredients": [{ "id": ids["sugar"], "amount": 150 }],
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Sweet cake");
    assert_eq!(body["text"], "Mix and bake.");
    let ingredients = body["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["name"], "sugar");
    assert_eq!(ingredients[0]["amount"], 150);
}

#[tokio::test]
async fn should_require_ingredients_on_patch() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let recipe = create_recipe(&app, MockAuth::user(author), "Cake", &[(ids["flour"], 300)]).await;

    let response = app
        .server
        .patch(&format!("/recipes/{recipe}/"))
        .with_auth(MockAuth::user(author))
        .json(&json!({ "name": "Renamed" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "ingredients");
}

#[tokio::test]
async fn should_forbid_non_author_changes() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let stranger = register(&app, "stranger").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let recipe = create_recipe(&app, MockAuth::user(author), "Cake", &[(ids["flour"], 300)]).await;

    app.server
        .patch(&format!("/recipes/{recipe}/"))
        .with_auth(MockAuth::user(stranger))
        .json(&json!({ "ingredients": [{ "id": ids["flour"], "amount": 1 }] }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .delete(&format!("/recipes/{recipe}/"))
        .with_auth(MockAuth::user(stranger))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_delete_recipe_and_return_404_afterwards() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let recipe = create_recipe(&app, MockAuth::user(author), "Cake", &[(ids["flour"], 300)]).await;

    app.server
        .delete(&format!("/recipes/{recipe}/"))
        .with_auth(MockAuth::user(author))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&format!("/recipes/{recipe}/"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_newest_first_and_filter_by_author() {
    let app = spawn_app().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let flour = ids["flour"];
    let first = create_recipe(&app, MockAuth::user(alice), "First", &[(flour, 1)]).await;
    let second = create_recipe(&app, MockAuth::user(bob), "Second", &[(flour, 1)]).await;
    let third = create_recipe(&app, MockAuth::user(alice), "Third", &[(flour, 1)]).await;

    let all: Value = app.server.get("/recipes/").await.json();
    assert_eq!(all["count"], 3);
    assert_eq!(
        result_ids(&all),
        [i64::from(third), i64::from(second), i64::from(first)]
    );

    let by_alice: Value = app
        .server
        .get("/recipes/")
        .add_query_param("author", alice)
        .await
        .json();
    assert_eq!(result_ids(&by_alice), [i64::from(third), i64::from(first)]);
}

#[tokio::test]
async fn should_reject_flag_values_other_than_zero_or_one() {
    let app = spawn_app().await;
    let response = app
        .server
        .get("/recipes/")
        .add_query_param("is_favorited", "yes")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

// ── Short links ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_and_follow_short_link() {
    let app = spawn_app().await;
    let author = register(&app, "chef").await;
    let ids = seed_ingredients(&app, &[("flour", "g")]).await;
    let recipe = create_recipe(&app, MockAuth::user(author), "Cake", &[(ids["flour"], 300)]).await;

    let response = app
        .server
        .get(&format!("/recipes/{recipe}/get-link/"))
        .await;
    response.assert_status_ok();
    let link = response.json::<Value>()["short-link"]
        .as_str()
        .unwrap()
        .to_owned();
    assert_eq!(link, format!("{PUBLIC_URL}/s/{recipe}/"));

    let redirect = app.server.get(&format!("/s/{recipe}/")).await;
    redirect.assert_status(StatusCode::FOUND);
    assert_eq!(
        redirect.header(header::LOCATION),
        format!("/recipes/{recipe}")
    );
}

#[tokio::test]
async fn should_return_404_for_short_link_to_missing_recipe() {
    let app = spawn_app().await;
    app.server
        .get("/s/77/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/recipes/77/get-link/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
