use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::anyhow;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{
    EdgeRepository, IngredientRepository, MediaStore, RecipeRepository, UserRepository,
};
use crate::domain::types::{
    DecodedImage, EdgeKind, IngredientAmount, MediaKind, Recipe, RecipeChanges, RecipeDetail,
    RecipeDraft, RecipeFilter, validate_cooking_time, validate_ingredient_amounts,
    validate_recipe_name, validate_recipe_text,
};
use crate::error::FoodgramError;
use crate::usecase::user::profiles_for;

/// Build the viewer-specific payload for each recipe, preserving order.
pub async fn assemble_details<R, U, E>(
    recipes: &R,
    users: &U,
    edges: &E,
    list: Vec<Recipe>,
    viewer: Option<i32>,
) -> Result<Vec<RecipeDetail>, FoodgramError>
where
    R: RecipeRepository,
    U: UserRepository,
    E: EdgeRepository,
{
    if list.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = list.iter().map(|r| r.id).collect();
    let author_ids: Vec<i32> = list
        .iter()
        .map(|r| r.author_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut lines = recipes.ingredient_lines(&ids).await?;
    let authors = users.find_many(&author_ids).await?;
    let profiles: HashMap<i32, _> = profiles_for(edges, authors, viewer)
        .await?
        .into_iter()
        .map(|p| (p.user.id, p))
        .collect();
    let (favorited, in_cart) = match viewer {
        Some(viewer) => (
            edges.targets_among(EdgeKind::Favorite, viewer, &ids).await?,
            edges
                .targets_among(EdgeKind::ShoppingCart, viewer, &ids)
                .await?,
        ),
        None => (HashSet::new(), HashSet::new()),
    };

    list.into_iter()
        .map(|recipe| {
            let author = match profiles.get(&recipe.author_id) {
                Some(profile) => profile.clone(),
                None => {
                    return Err(FoodgramError::Internal(anyhow!(
                        "author {} of recipe {} is missing",
                        recipe.author_id,
                        recipe.id
                    )));
                }
            };
            Ok(RecipeDetail {
                ingredients: lines.remove(&recipe.id).unwrap_or_default(),
                is_favorited: favorited.contains(&recipe.id),
                is_in_shopping_cart: in_cart.contains(&recipe.id),
                author,
                recipe,
            })
        })
        .collect()
}

/// Every referenced ingredient id must exist.
async fn ensure_ingredients_exist<I: IngredientRepository>(
    ingredients: &I,
    items: &[IngredientAmount],
) -> Result<(), FoodgramError> {
    let ids: Vec<i32> = items.iter().map(|i| i.ingredient_id).collect();
    let existing = ingredients.existing_ids(&ids).await?;
    let missing: BTreeSet<i32> = ids.into_iter().filter(|id| !existing.contains(id)).collect();
    if missing.is_empty() {
        return Ok(());
    }
    let ids = missing
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Err(FoodgramError::validation(
        "ingredients",
        format!("unknown ingredient ids: {ids}"),
    ))
}

// ── FindRecipe ───────────────────────────────────────────────────────────────

pub struct FindRecipeUseCase<R: RecipeRepository> {
    pub recipes: R,
}

impl<R: RecipeRepository> FindRecipeUseCase<R> {
    pub async fn execute(&self, recipe_id: i32) -> Result<Recipe, FoodgramError> {
        self.recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── GetRecipe ────────────────────────────────────────────────────────────────

pub struct GetRecipeUseCase<R: RecipeRepository, U: UserRepository, E: EdgeRepository> {
    pub recipes: R,
    pub users: U,
    pub edges: E,
}

impl<R, U, E> GetRecipeUseCase<R, U, E>
where
    R: RecipeRepository,
    U: UserRepository,
    E: EdgeRepository,
{
    pub async fn execute(
        &self,
        recipe_id: i32,
        viewer: Option<i32>,
    ) -> Result<RecipeDetail, FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        let mut details =
            assemble_details(&self.recipes, &self.users, &self.edges, vec![recipe], viewer)
                .await?;
        details.pop().ok_or(FoodgramError::RecipeNotFound)
    }
}

// ── ListRecipes ──────────────────────────────────────────────────────────────

pub struct ListRecipesUseCase<R: RecipeRepository, U: UserRepository, E: EdgeRepository> {
    pub recipes: R,
    pub users: U,
    pub edges: E,
}

impl<R, U, E> ListRecipesUseCase<R, U, E>
where
    R: RecipeRepository,
    U: UserRepository,
    E: EdgeRepository,
{
    pub async fn execute(
        &self,
        filter: RecipeFilter,
        viewer: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<RecipeDetail>, FoodgramError> {
        let Some(query) = filter.resolve(viewer) else {
            return Ok(Page::empty());
        };
        let Page { items, count } = self.recipes.list(&query, page).await?;
        let items =
            assemble_details(&self.recipes, &self.users, &self.edges, items, viewer).await?;
        Ok(Page { items, count })
    }
}

// ── CreateRecipe ─────────────────────────────────────────────────────────────

pub struct RecipeInput {
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Base64 data URL.
    pub image: String,
    pub ingredients: Vec<IngredientAmount>,
}

pub struct CreateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, M: MediaStore> {
    pub recipes: R,
    pub ingredients: I,
    pub media: M,
}

impl<R, I, M> CreateRecipeUseCase<R, I, M>
where
    R: RecipeRepository,
    I: IngredientRepository,
    M: MediaStore,
{
    pub async fn execute(&self, author_id: i32, input: RecipeInput) -> Result<Recipe, FoodgramError> {
        validate_ingredient_amounts(&input.ingredients)?;
        validate_recipe_name(&input.name)?;
        validate_recipe_text(&input.text)?;
        validate_cooking_time(input.cooking_time)?;
        let image = DecodedImage::from_data_url("image", &input.image)?;
        ensure_ingredients_exist(&self.ingredients, &input.ingredients).await?;

        let image = self.media.save(MediaKind::RecipeImage, &image).await?;
        let draft = RecipeDraft {
            name: input.name,
            text: input.text,
            cooking_time: input.cooking_time,
            image,
            ingredients: input.ingredients,
        };
        match self.recipes.create(author_id, &draft).await {
            Ok(recipe) => {
                tracing::info!(recipe_id = recipe.id, author_id, "recipe created");
                Ok(recipe)
            }
            Err(e) => {
                self.media.remove(&draft.image).await;
                Err(e)
            }
        }
    }
}

// ── UpdateRecipe ─────────────────────────────────────────────────────────────

pub struct RecipePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    /// Base64 data URL.
    pub image: Option<String>,
    /// Required: ingredients are always replaced wholesale.
    pub ingredients: Option<Vec<IngredientAmount>>,
}

pub struct UpdateRecipeUseCase<R: RecipeRepository, I: IngredientRepository, M: MediaStore> {
    pub recipes: R,
    pub ingredients: I,
    pub media: M,
}

impl<R, I, M> UpdateRecipeUseCase<R, I, M>
where
    R: RecipeRepository,
    I: IngredientRepository,
    M: MediaStore,
{
    pub async fn execute(
        &self,
        user_id: i32,
        recipe_id: i32,
        patch: RecipePatch,
    ) -> Result<Recipe, FoodgramError> {
        let current = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if current.author_id != user_id {
            return Err(FoodgramError::Forbidden);
        }

        let ingredients = patch
            .ingredients
            .ok_or_else(|| FoodgramError::validation("ingredients", "ingredients is required"))?;
        validate_ingredient_amounts(&ingredients)?;
        if let Some(name) = &patch.name {
            validate_recipe_name(name)?;
        }
        if let Some(text) = &patch.text {
            validate_recipe_text(text)?;
        }
        if let Some(cooking_time) = patch.cooking_time {
            validate_cooking_time(cooking_time)?;
        }
        let image = patch
            .image
            .as_deref()
            .map(|raw| DecodedImage::from_data_url("image", raw))
            .transpose()?;
        ensure_ingredients_exist(&self.ingredients, &ingredients).await?;

        let new_image = match image {
            Some(image) => Some(self.media.save(MediaKind::RecipeImage, &image).await?),
            None => None,
        };
        let changes = RecipeChanges {
            name: patch.name,
            text: patch.text,
            cooking_time: patch.cooking_time,
            image: new_image,
            ingredients,
        };
        let updated = match self.recipes.update(recipe_id, &changes).await {
            Ok(recipe) => recipe,
            Err(e) => {
                if let Some(path) = &changes.image {
                    self.media.remove(path).await;
                }
                return Err(e);
            }
        };
        if changes.image.is_some() {
            self.media.remove(&current.image).await;
        }
        Ok(updated)
    }
}

// ── DeleteRecipe ─────────────────────────────────────────────────────────────

pub struct DeleteRecipeUseCase<R: RecipeRepository, M: MediaStore> {
    pub recipes: R,
    pub media: M,
}

impl<R: RecipeRepository, M: MediaStore> DeleteRecipeUseCase<R, M> {
    pub async fn execute(&self, user_id: i32, recipe_id: i32) -> Result<(), FoodgramError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(FoodgramError::RecipeNotFound)?;
        if recipe.author_id != user_id {
            return Err(FoodgramError::Forbidden);
        }
        if !self.recipes.delete(recipe_id).await? {
            return Err(FoodgramError::RecipeNotFound);
        }
        self.media.remove(&recipe.image).await;
        tracing::info!(recipe_id, "recipe deleted");
        Ok(())
    }
}
