use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::recipe::FindRecipeUseCase;

/// `GET /s/{id}/`: redirect a short link to the recipe page.
pub async fn follow_short_link(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<impl IntoResponse, FoodgramError> {
    let usecase = FindRecipeUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe = usecase.execute(recipe_id).await?;
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/recipes/{}", recipe.id))],
    ))
}
