use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use foodgram_core::error::not_found;
use foodgram_core::health::{healthz, readyz};
use foodgram_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::user_stats,
    ingredient::{delete_ingredient, get_ingredient, list_ingredients},
    recipe::{
        add_favorite, add_to_shopping_cart, create_recipe, delete_recipe, download_shopping_cart,
        get_link, get_recipe, list_recipes, remove_favorite, remove_from_shopping_cart,
        update_recipe,
    },
    short_link::follow_short_link,
    user::{
        create_user, delete_avatar, get_me, get_user, list_subscriptions, list_users, set_avatar,
        subscribe, unsubscribe,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.media_root);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users/", get(list_users).post(create_user))
        .route("/users/me/", get(get_me))
        .route("/users/me/avatar/", put(set_avatar).delete(delete_avatar))
        .route("/users/subscriptions/", get(list_subscriptions))
        .route("/users/{id}/", get(get_user))
        .route("/users/{id}/subscribe/", post(subscribe).delete(unsubscribe))
        // Ingredients
        .route("/ingredients/", get(list_ingredients))
        .route(
            "/ingredients/{id}/",
            get(get_ingredient).delete(delete_ingredient),
        )
        // Recipes
        .route("/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/recipes/{id}/",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route(
            "/recipes/{id}/favorite/",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart/",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .route("/recipes/{id}/get-link/", get(get_link))
        // Short links
        .route("/s/{id}/", get(follow_short_link))
        // Reporting
        .route("/admin/users/stats/", get(user_stats))
        // Media
        .nest_service("/media", media)
        .fallback(not_found)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
