use crate::domain::repository::RecipeRepository;
use crate::domain::types::{aggregate_shopping_list, render_shopping_list};
use crate::error::FoodgramError;

/// Render the viewer's cart as a plain-text shopping list.
pub struct DownloadShoppingListUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> DownloadShoppingListUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<String, FoodgramError> {
        let rows = self.recipes.shopping_rows(user_id).await?;
        let items = aggregate_shopping_list(rows);
        tracing::debug!(user_id, items = items.len(), "shopping list built");
        Ok(render_shopping_list(&items))
    }
}
