#![allow(async_fn_in_trait)]

use std::collections::{HashMap, HashSet};

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    DecodedImage, EdgeKind, Ingredient, MediaKind, NewIngredient, NewUser, Recipe, RecipeChanges,
    RecipeDraft, RecipeIngredientLine, RecipeQuery, ShoppingRow, User, UserStats,
};
use crate::error::FoodgramError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError>;
    async fn find_many(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError>;
    /// `true` when another user already holds this email or username.
    async fn is_taken(&self, email: &str, username: &str) -> Result<bool, FoodgramError>;
    /// Fails with `UserAlreadyExists` if a unique constraint is hit.
    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError>;
    /// Ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError>;
    /// Authors followed by `subscriber_id`, ordered by username.
    async fn list_subscribed_authors(
        &self,
        subscriber_id: i32,
        page: PageRequest,
    ) -> Result<Page<User>, FoodgramError>;
    async fn set_avatar(&self, id: i32, avatar: Option<&str>) -> Result<(), FoodgramError>;
    async fn stats(&self, page: PageRequest) -> Result<Page<UserStats>, FoodgramError>;
}

/// Repository for the ingredient catalogue.
pub trait IngredientRepository: Send + Sync {
    /// Case-insensitive prefix search ordered by name. `None` lists all.
    async fn search(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError>;
    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError>;
    async fn is_referenced(&self, id: i32) -> Result<bool, FoodgramError>;
    /// Fails with `IngredientInUse` if a recipe still references it.
    async fn delete(&self, id: i32) -> Result<bool, FoodgramError>;
    /// Insert skipping existing `(name, unit)` pairs. Returns rows inserted.
    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, FoodgramError>;
}

/// Repository for recipes and their ingredient lines.
pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError>;
    /// Newest first.
    async fn list(
        &self,
        query: &RecipeQuery,
        page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError>;
    /// Newest first, at most `limit` when given.
    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError>;
    async fn count_by_author(&self, author_id: i32) -> Result<u64, FoodgramError>;
    /// Ingredient lines per recipe id, each list ordered by ingredient name.
    async fn ingredient_lines(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredientLine>>, FoodgramError>;
    /// Recipe row plus ingredient lines, in one transaction.
    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<Recipe, FoodgramError>;
    /// Apply changes and replace all ingredient lines, in one transaction.
    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, FoodgramError>;
    async fn delete(&self, id: i32) -> Result<bool, FoodgramError>;
    /// Un-aggregated ingredient rows for every recipe in the user's cart.
    async fn shopping_rows(&self, user_id: i32) -> Result<Vec<ShoppingRow>, FoodgramError>;
}

/// Favorite, shopping-cart and subscription edges.
pub trait EdgeRepository: Send + Sync {
    /// Whether the edge's target (recipe or author) exists.
    async fn target_exists(&self, kind: EdgeKind, target_id: i32) -> Result<bool, FoodgramError>;
    /// Insert if absent. `false` means the edge already existed.
    async fn insert(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, FoodgramError>;
    /// `false` means there was no edge to delete.
    async fn delete(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<bool, FoodgramError>;
    /// Subset of `target_ids` that `user_id` has an edge to.
    async fn targets_among(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_ids: &[i32],
    ) -> Result<HashSet<i32>, FoodgramError>;
}

/// Storage for uploaded images. Paths are relative to the media root.
pub trait MediaStore: Send + Sync {
    async fn save(&self, kind: MediaKind, image: &DecodedImage) -> Result<String, FoodgramError>;
    /// Best-effort removal; failures are logged, not returned.
    async fn remove(&self, path: &str);
}
