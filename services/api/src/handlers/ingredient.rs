use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::domain::types::Ingredient;
use crate::error::FoodgramError;
use crate::handlers::pagination::parse_query;
use crate::state::AppState;
use crate::usecase::ingredient::{
    DeleteIngredientUseCase, GetIngredientUseCase, SearchIngredientsUseCase,
};

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct IngredientSearchQuery {
    pub name: Option<String>,
}

// ── GET /ingredients/ ────────────────────────────────────────────────────────

pub async fn list_ingredients(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let query: IngredientSearchQuery = parse_query(raw_query.as_deref())?;
    let usecase = SearchIngredientsUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredients = usecase.execute(query.name.as_deref()).await?;
    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

// ── GET /ingredients/{id}/ ───────────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let usecase = GetIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    let ingredient = usecase.execute(ingredient_id).await?;
    Ok(Json(ingredient.into()))
}

// ── DELETE /ingredients/{id}/ ────────────────────────────────────────────────

pub async fn delete_ingredient(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    if !identity.is_admin() {
        return Err(FoodgramError::Forbidden);
    }
    let usecase = DeleteIngredientUseCase {
        repo: state.ingredient_repo(),
    };
    usecase.execute(ingredient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
