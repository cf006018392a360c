use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{AuthorWithRecipes, EdgeKind, NewUser, UserProfile};
use crate::error::FoodgramError;
use crate::handlers::extract::JsonBody;
use crate::handlers::pagination::{Paginated, parse_query};
use crate::handlers::recipe::ShortRecipeResponse;
use crate::state::AppState;
use crate::usecase::avatar::{RemoveAvatarUseCase, SetAvatarUseCase};
use crate::usecase::relation::{AddRelationUseCase, RemoveRelationUseCase};
use crate::usecase::subscription::{GetSubscribedAuthorUseCase, ListSubscriptionsUseCase};
use crate::usecase::user::{CreateUserUseCase, GetUserProfileUseCase, ListUsersUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn new(profile: UserProfile, state: &AppState) -> Self {
        let UserProfile {
            user,
            is_subscribed,
        } = profile;
        Self {
            avatar: user.avatar.as_deref().map(|path| state.media_url(path)),
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<ShortRecipeResponse>,
    pub recipes_count: u64,
}

impl SubscriptionResponse {
    fn new(author: AuthorWithRecipes, state: &AppState) -> Self {
        Self {
            user: UserResponse::new(author.profile, state),
            recipes: author
                .recipes
                .into_iter()
                .map(|recipe| ShortRecipeResponse::new(recipe, state))
                .collect(),
            recipes_count: author.recipes_count,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SubscriptionListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u64>,
}

// ── GET /users/ ──────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<UserResponse>>, FoodgramError> {
    let query: UserListQuery = parse_query(raw_query.as_deref())?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
        edges: state.edge_repo(),
    };
    let users = usecase
        .execute(page, identity.map(|i| i.user_id))
        .await?
        .map(|profile| UserResponse::new(profile, &state));
    Ok(Json(Paginated::new(users, page, &state.public_url, &uri)))
}

// ── POST /users/ ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub email: String,
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), FoodgramError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(NewUser {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }),
    ))
}

// ── GET /users/{id}/ ─────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let usecase = GetUserProfileUseCase {
        repo: state.user_repo(),
        edges: state.edge_repo(),
    };
    let profile = usecase
        .execute(user_id, identity.map(|i| i.user_id))
        .await?;
    Ok(Json(UserResponse::new(profile, &state)))
}

// ── GET /users/me/ ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let usecase = GetUserProfileUseCase {
        repo: state.user_repo(),
        edges: state.edge_repo(),
    };
    let profile = usecase
        .execute(identity.user_id, Some(identity.user_id))
        .await?;
    Ok(Json(UserResponse::new(profile, &state)))
}

// ── PUT/DELETE /users/me/avatar/ ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

pub async fn set_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AvatarRequest>,
) -> Result<Json<AvatarResponse>, FoodgramError> {
    let usecase = SetAvatarUseCase {
        users: state.user_repo(),
        media: state.media_store(),
    };
    let path = usecase.execute(identity.user_id, &body.avatar).await?;
    Ok(Json(AvatarResponse {
        avatar: state.media_url(&path),
    }))
}

pub async fn delete_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = RemoveAvatarUseCase {
        users: state.user_repo(),
        media: state.media_store(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/subscriptions/ ────────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<SubscriptionResponse>>, FoodgramError> {
    let query: SubscriptionListQuery = parse_query(raw_query.as_deref())?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let usecase = ListSubscriptionsUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let authors = usecase
        .execute(identity.user_id, page, query.recipes_limit)
        .await?
        .map(|author| SubscriptionResponse::new(author, &state));
    Ok(Json(Paginated::new(authors, page, &state.public_url, &uri)))
}

// ── POST/DELETE /users/{id}/subscribe/ ───────────────────────────────────────

pub async fn subscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
    RawQuery(raw_query): RawQuery,
) -> Result<(StatusCode, Json<SubscriptionResponse>), FoodgramError> {
    let query: RecipesLimitQuery = parse_query(raw_query.as_deref())?;
    let usecase = AddRelationUseCase {
        edges: state.edge_repo(),
    };
    usecase
        .execute(EdgeKind::Subscription, identity.user_id, author_id)
        .await?;

    let usecase = GetSubscribedAuthorUseCase {
        users: state.user_repo(),
        recipes: state.recipe_repo(),
    };
    let author = usecase.execute(author_id, query.recipes_limit).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(author, &state)),
    ))
}

pub async fn unsubscribe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(author_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = RemoveRelationUseCase {
        edges: state.edge_repo(),
    };
    usecase
        .execute(EdgeKind::Subscription, identity.user_id, author_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
