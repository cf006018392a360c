use axum::http::StatusCode;
use serde_json::{Value, json};

use foodgram_testing::auth::MockAuth;
use foodgram_testing::media::{BROKEN_DATA_URL, PNG_DATA_URL};

use crate::helpers::{PUBLIC_URL, WithAuth, register, result_ids, spawn_app};

// ── Registration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_and_return_public_fields() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/users/")
        .json(&json!({
            "email": "chef@example.com",
            "username": "chef",
            "first_name": "Julia",
            "last_name": "Child",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "chef");
    assert_eq!(body["email"], "chef@example.com");
    assert!(body["id"].as_i64().unwrap() > 0);
    assert!(body.get("is_subscribed").is_none());
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let app = spawn_app().await;
    register(&app, "chef").await;

    let response = app
        .server
        .post("/users/")
        .json(&json!({
            "email": "other@example.com",
            "username": "chef",
            "first_name": "A",
            "last_name": "B",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_reserved_username() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/users/")
        .json(&json!({
            "email": "me@example.com",
            "username": "me",
            "first_name": "A",
            "last_name": "B",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "username");
}

#[tokio::test]
async fn should_reject_registration_with_missing_fields() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/users/")
        .json(&json!({ "email": "chef@example.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "username");
}

#[tokio::test]
async fn should_reject_registration_with_unparsable_body() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/users/")
        .text("{not json")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "body");
}

// ── Profiles ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_identity_for_me() {
    let app = spawn_app().await;
    let response = app.server.get("/users/me/").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_own_profile() {
    let app = spawn_app().await;
    let id = register(&app, "chef").await;

    let response = app
        .server
        .get("/users/me/")
        .with_auth(MockAuth::user(id))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id);
    assert_eq!(body["is_subscribed"], false);
    assert_eq!(body["avatar"], Value::Null);
}

#[tokio::test]
async fn should_return_404_for_unknown_user() {
    let app = spawn_app().await;
    let response = app.server.get("/users/999/").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_list_users_by_username_with_page_links() {
    let app = spawn_app().await;
    for name in ["carol", "alice", "bob"] {
        register(&app, name).await;
    }

    let response = app
        .server
        .get("/users/")
        .add_query_param("limit", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 3);
    let names: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alice", "bob"]);
    assert_eq!(
        body["next"],
        format!("{PUBLIC_URL}/users/?limit=2&page=2").as_str()
    );
    assert_eq!(body["previous"], Value::Null);

    let second = app
        .server
        .get("/users/")
        .add_query_param("limit", 2)
        .add_query_param("page", 2)
        .await
        .json::<Value>();
    assert_eq!(result_ids(&second).len(), 1);
    assert_eq!(second["next"], Value::Null);
    assert_eq!(
        second["previous"],
        format!("{PUBLIC_URL}/users/?limit=2").as_str()
    );
}

#[tokio::test]
async fn should_reject_malformed_page_parameter() {
    let app = spawn_app().await;
    let response = app
        .server
        .get("/users/")
        .add_query_param("page", "first")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "query");
}

// ── Avatar ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_set_serve_and_remove_avatar() {
    let app = spawn_app().await;
    let id = register(&app, "chef").await;
    let auth = MockAuth::user(id);

    let response = app
        .server
        .put("/users/me/avatar/")
        .with_auth(auth)
        .json(&json!({ "avatar": PNG_DATA_URL }))
        .await;
    response.assert_status_ok();
    let url = response.json::<Value>()["avatar"]
        .as_str()
        .unwrap()
        .to_owned();
    let media_path = url
        .strip_prefix(PUBLIC_URL)
        .unwrap()
        .to_owned();
    assert!(media_path.starts_with("/media/users/avatars/"));
    assert!(media_path.ends_with(".png"));

    app.server.get(&media_path).await.assert_status_ok();
    let stored = app
        .media_root
        .join(media_path.trim_start_matches("/media/"));
    assert!(stored.is_file());

    let me: Value = app
        .server
        .get("/users/me/")
        .with_auth(auth)
        .await
        .json();
    assert_eq!(me["avatar"], url.as_str());

    app.server
        .delete("/users/me/avatar/")
        .with_auth(auth)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&media_path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(!stored.exists());
    let me: Value = app
        .server
        .get("/users/me/")
        .with_auth(auth)
        .await
        .json();
    assert_eq!(me["avatar"], Value::Null);
}

#[tokio::test]
async fn should_reject_undecodable_avatar() {
    let app = spawn_app().await;
    let id = register(&app, "chef").await;

    let response = app
        .server
        .put("/users/me/avatar/")
        .with_auth(MockAuth::user(id))
        .json(&json!({ "avatar": BROKEN_DATA_URL }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["field"], "avatar");
}

#[tokio::test]
async fn should_reject_avatar_body_without_avatar_field() {
    let app = spawn_app().await;
    let id = register(&app, "chef").await;

    let response = app
        .server
        .put("/users/me/avatar/")
        .with_auth(MockAuth::user(id))
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["field"], "avatar");
}

// ── Admin stats ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_stats_for_non_admin() {
    let app = spawn_app().await;
    let id = register(&app, "chef").await;
    app.server
        .get("/admin/users/stats/")
        .with_auth(MockAuth::user(id))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_report_subscription_counts_for_admin() {
    let app = spawn_app().await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    app.server
        .post(&format!("/users/{bob}/subscribe/"))
        .with_auth(MockAuth::user(alice))
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get("/admin/users/stats/")
        .with_auth(MockAuth::admin(alice))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
    let rows = body["results"].as_array().unwrap();
    let row = |id: i32| rows.iter().find(|r| r["id"] == id).unwrap().clone();
    assert_eq!(row(alice)["subscriptions_count"], 1);
    assert_eq!(row(alice)["subscribers_count"], 0);
    assert_eq!(row(bob)["subscribers_count"], 1);
    assert_eq!(row(bob)["recipes_count"], 0);
}
