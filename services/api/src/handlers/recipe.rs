use axum::{
    Json,
    extract::{OriginalUri, Path, RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::flag::BinaryFlag;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::{
    EdgeKind, IngredientAmount, Recipe, RecipeDetail, RecipeFilter, RecipeIngredientLine,
};
use crate::error::FoodgramError;
use crate::handlers::extract::JsonBody;
use crate::handlers::pagination::{Paginated, parse_query};
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, FindRecipeUseCase, GetRecipeUseCase,
    ListRecipesUseCase, RecipeInput, RecipePatch, UpdateRecipeUseCase,
};
use crate::usecase::relation::{AddRelationUseCase, RemoveRelationUseCase};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

const SHOPPING_LIST_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const SHOPPING_LIST_DISPOSITION: &str = "attachment; filename=\"shopping_list.txt\"";

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl From<RecipeIngredientLine> for RecipeIngredientResponse {
    fn from(line: RecipeIngredientLine) -> Self {
        Self {
            id: line.ingredient_id,
            name: line.name,
            measurement_unit: line.measurement_unit,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: i32,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
}

impl RecipeResponse {
    pub fn new(detail: RecipeDetail, state: &AppState) -> Self {
        let RecipeDetail {
            recipe,
            author,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
        } = detail;
        Self {
            id: recipe.id,
            author: UserResponse::new(author, state),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            is_favorited,
            is_in_shopping_cart,
            image: state.media_url(&recipe.image),
            name: recipe.name,
            text: recipe.text,
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Compact form used by favorites, the shopping cart and subscriptions.
#[derive(Debug, Serialize)]
pub struct ShortRecipeResponse {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl ShortRecipeResponse {
    pub fn new(recipe: Recipe, state: &AppState) -> Self {
        Self {
            id: recipe.id,
            image: state.media_url(&recipe.image),
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IngredientAmountRequest {
    pub id: i32,
    pub amount: i32,
}

fn into_amounts(items: Vec<IngredientAmountRequest>) -> Vec<IngredientAmount> {
    items
        .into_iter()
        .map(|item| IngredientAmount {
            ingredient_id: item.id,
            amount: item.amount,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub ingredients: Vec<IngredientAmountRequest>,
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    pub is_favorited: Option<BinaryFlag>,
    pub is_in_shopping_cart: Option<BinaryFlag>,
}

// ── GET /recipes/ ────────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<RecipeResponse>>, FoodgramError> {
    let query: RecipeListQuery = parse_query(raw_query.as_deref())?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let filter = RecipeFilter {
        author: query.author,
        is_favorited: query.is_favorited.map(|flag| flag.0),
        is_in_shopping_cart: query.is_in_shopping_cart.map(|flag| flag.0),
    };
    let usecase = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        edges: state.edge_repo(),
    };
    let recipes = usecase
        .execute(filter, identity.map(|i| i.user_id), page)
        .await?
        .map(|detail| RecipeResponse::new(detail, &state));
    Ok(Json(Paginated::new(recipes, page, &state.public_url, &uri)))
}

// ── POST /recipes/ ───────────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let usecase = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        media: state.media_store(),
    };
    let recipe = usecase
        .execute(
            identity.user_id,
            RecipeInput {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: into_amounts(body.ingredients),
            },
        )
        .await?;
    let detail = recipe_detail(&state, recipe.id, identity.user_id).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn recipe_detail(
    state: &AppState,
    recipe_id: i32,
    viewer: i32,
) -> Result<RecipeResponse, FoodgramError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        edges: state.edge_repo(),
    };
    let detail = usecase.execute(recipe_id, Some(viewer)).await?;
    Ok(RecipeResponse::new(detail, state))
}

// ── GET /recipes/{id}/ ───────────────────────────────────────────────────────

pub async fn get_recipe(
    identity: Option<IdentityHeaders>,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let usecase = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        edges: state.edge_repo(),
    };
    let detail = usecase
        .execute(recipe_id, identity.map(|i| i.user_id))
        .await?;
    Ok(Json(RecipeResponse::new(detail, &state)))
}

// ── PATCH /recipes/{id}/ ─────────────────────────────────────────────────────

pub async fn update_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
    JsonBody(body): JsonBody<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let usecase = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        ingredients: state.ingredient_repo(),
        media: state.media_store(),
    };
    usecase
        .execute(
            identity.user_id,
            recipe_id,
            RecipePatch {
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
                image: body.image,
                ingredients: body.ingredients.map(into_amounts),
            },
        )
        .await?;
    let detail = recipe_detail(&state, recipe_id, identity.user_id).await?;
    Ok(Json(detail))
}

// ── DELETE /recipes/{id}/ ────────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let usecase = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        media: state.media_store(),
    };
    usecase.execute(identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Favorites / shopping cart ────────────────────────────────────────────────

async fn add_recipe_edge(
    kind: EdgeKind,
    identity: IdentityHeaders,
    state: &AppState,
    recipe_id: i32,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), FoodgramError> {
    let usecase = AddRelationUseCase {
        edges: state.edge_repo(),
    };
    usecase.execute(kind, identity.user_id, recipe_id).await?;
    let usecase = FindRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ShortRecipeResponse::new(recipe, state)),
    ))
}

async fn remove_recipe_edge(
    kind: EdgeKind,
    identity: IdentityHeaders,
    state: &AppState,
    recipe_id: i32,
) -> Result<StatusCode, FoodgramError> {
    let usecase = RemoveRelationUseCase {
        edges: state.edge_repo(),
    };
    usecase.execute(kind, identity.user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), FoodgramError> {
    add_recipe_edge(EdgeKind::Favorite, identity, &state, recipe_id).await
}

pub async fn remove_favorite(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_recipe_edge(EdgeKind::Favorite, identity, &state, recipe_id).await
}

pub async fn add_to_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<(StatusCode, Json<ShortRecipeResponse>), FoodgramError> {
    add_recipe_edge(EdgeKind::ShoppingCart, identity, &state, recipe_id).await
}

pub async fn remove_from_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_recipe_edge(EdgeKind::ShoppingCart, identity, &state, recipe_id).await
}

// ── GET /recipes/download_shopping_cart/ ─────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, FoodgramError> {
    let usecase = DownloadShoppingListUseCase {
        recipes: state.recipe_repo(),
    };
    let body = usecase.execute(identity.user_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, SHOPPING_LIST_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, SHOPPING_LIST_DISPOSITION),
        ],
        body,
    )
        .into_response())
}

// ── GET /recipes/{id}/get-link/ ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, FoodgramError> {
    let usecase = FindRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(recipe_id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: format!("{}/s/{}/", state.public_url, recipe.id),
    }))
}
