use std::collections::HashMap;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum_test::{TestRequest, TestServer};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use uuid::Uuid;

use foodgram_api::domain::repository::IngredientRepository;
use foodgram_api::domain::types::NewIngredient;
use foodgram_api::infra::db::DbIngredientRepository;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_api_migration::{Migrator, MigratorTrait};
use foodgram_testing::auth::MockAuth;
use foodgram_testing::media::PNG_DATA_URL;

pub const PUBLIC_URL: &str = "http://foodgram.test";
pub const PAGE_SIZE: u32 = 6;

/// A router over a fresh in-memory database.
pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub media_root: PathBuf,
}

pub async fn spawn_app() -> TestApp {
    // A single connection keeps every query on the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let media_root = std::env::temp_dir().join(format!("foodgram-it-{}", Uuid::new_v4()));
    let state = AppState::new(db.clone(), &media_root, PUBLIC_URL, PAGE_SIZE);
    let server = TestServer::new(build_router(state)).unwrap();
    TestApp {
        server,
        db,
        media_root,
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

pub trait WithAuth {
    fn with_auth(self, auth: MockAuth) -> Self;
}

impl WithAuth for TestRequest {
    fn with_auth(self, auth: MockAuth) -> Self {
        let (id_name, id_value) = auth.user_id_header();
        let (role_name, role_value) = auth.role_header();
        self.add_header(id_name, id_value)
            .add_header(role_name, role_value)
    }
}

// ── Seeding ──────────────────────────────────────────────────────────────────

/// Register a user through the API and return its id.
pub async fn register(app: &TestApp, username: &str) -> i32 {
    let response = app
        .server
        .post("/users/")
        .json(&json!({
            "email": format!("{username}@example.com"),
            "username": username,
            "first_name": "Test",
            "last_name": "User",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap() as i32
}

/// Insert ingredients and return their ids keyed by name.
pub async fn seed_ingredients(app: &TestApp, items: &[(&str, &str)]) -> HashMap<String, i32> {
    let repo = DbIngredientRepository { db: app.db.clone() };
    let items: Vec<NewIngredient> = items
        .iter()
        .map(|(name, unit)| NewIngredient {
            name: (*name).to_owned(),
            measurement_unit: (*unit).to_owned(),
        })
        .collect();
    repo.insert_many(&items).await.unwrap();
    repo.search(None)
        .await
        .unwrap()
        .into_iter()
        .map(|i| (i.name, i.id))
        .collect()
}

/// Create a recipe as `author` and return its id.
pub async fn create_recipe(
    app: &TestApp,
    author: MockAuth,
    name: &str,
    ingredients: &[(i32, i32)],
) -> i32 {
    let response = app
        .server
        .post("/recipes/")
        .with_auth(author)
        .json(&recipe_body(name, ingredients))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap() as i32
}

pub fn recipe_body(name: &str, ingredients: &[(i32, i32)]) -> Value {
    let ingredients: Vec<Value> = ingredients
        .iter()
        .map(|(id, amount)| json!({ "id": id, "amount": amount }))
        .collect();
    json!({
        "ingredients": ingredients,
        "image": PNG_DATA_URL,
        "name": name,
        "text": "Mix and bake.",
        "cooking_time": 30,
    })
}

pub fn result_ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
