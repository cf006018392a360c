//! In-memory repository doubles shared by use-case unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::Utc;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{IngredientRepository, MediaStore, RecipeRepository};
use crate::domain::types::{
    DecodedImage, Ingredient, MediaKind, NewIngredient, Recipe, RecipeChanges, RecipeDraft,
    RecipeIngredientLine, RecipeQuery, ShoppingRow,
};
use crate::error::FoodgramError;

pub fn test_recipe(id: i32, author_id: i32) -> Recipe {
    Recipe {
        id,
        author_id,
        name: format!("Recipe {id}"),
        text: "Cook it.".into(),
        cooking_time: 10,
        image: format!("recipes/images/original-{id}.png"),
        created_at: Utc::now(),
    }
}

// ── MockRecipeRepo ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRecipeRepo {
    pub recipes: Mutex<Vec<Recipe>>,
    pub lines: HashMap<i32, Vec<RecipeIngredientLine>>,
    pub shopping: Vec<ShoppingRow>,
}

impl MockRecipeRepo {
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            ..Self::default()
        }
    }

    pub fn with_shopping_rows(shopping: Vec<ShoppingRow>) -> Self {
        Self {
            shopping,
            ..Self::default()
        }
    }
}

impl RecipeRepository for MockRecipeRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, FoodgramError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        query: &RecipeQuery,
        _page: PageRequest,
    ) -> Result<Page<Recipe>, FoodgramError> {
        let items: Vec<Recipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| query.author.is_none_or(|a| a == r.author_id))
            .cloned()
            .collect();
        let count = items.len() as u64;
        Ok(Page { items, count })
    }

    async fn list_by_author(
        &self,
        author_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let limit = limit.map_or(usize::MAX, |l| l as usize);
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_by_author(&self, author_id: i32) -> Result<u64, FoodgramError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id)
            .count() as u64)
    }

    async fn ingredient_lines(
        &self,
        recipe_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<RecipeIngredientLine>>, FoodgramError> {
        Ok(self
            .lines
            .iter()
            .filter(|(id, _)| recipe_ids.contains(id))
            .map(|(id, lines)| (*id, lines.clone()))
            .collect())
    }

    async fn create(&self, author_id: i32, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let mut recipes = self.recipes.lock().unwrap();
        let recipe = Recipe {
            id: recipes.len() as i32 + 1,
            author_id,
            name: draft.name.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            image: draft.image.clone(),
            created_at: Utc::now(),
        };
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, FoodgramError> {
        let mut recipes = self.recipes.lock().unwrap();
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(FoodgramError::RecipeNotFound)?;
        if let Some(name) = &changes.name {
            recipe.name = name.clone();
        }
        if let Some(text) = &changes.text {
            recipe.text = text.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        if let Some(image) = &changes.image {
            recipe.image = image.clone();
        }
        Ok(recipe.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        let mut recipes = self.recipes.lock().unwrap();
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        Ok(recipes.len() < before)
    }

    async fn shopping_rows(&self, _user_id: i32) -> Result<Vec<ShoppingRow>, FoodgramError> {
        Ok(self.shopping.clone())
    }
}

// ── MockIngredientRepo ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockIngredientRepo {
    pub ingredients: Vec<Ingredient>,
    pub referenced: HashSet<i32>,
    pub deleted: Mutex<Vec<i32>>,
    pub inserted: Mutex<Vec<NewIngredient>>,
}

impl MockIngredientRepo {
    pub fn with_ids(ids: &[i32]) -> Self {
        Self {
            ingredients: ids
                .iter()
                .map(|&id| Ingredient {
                    id,
                    name: format!("ingredient {id}"),
                    measurement_unit: "g".into(),
                })
                .collect(),
            ..Self::default()
        }
    }
}

impl IngredientRepository for MockIngredientRepo {
    async fn search(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name_prefix.unwrap_or_default().to_lowercase();
        Ok(self
            .ingredients
            .iter()
            .filter(|i| i.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, FoodgramError> {
        Ok(self.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<HashSet<i32>, FoodgramError> {
        Ok(self
            .ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn is_referenced(&self, id: i32) -> Result<bool, FoodgramError> {
        Ok(self.referenced.contains(&id))
    }

    async fn delete(&self, id: i32) -> Result<bool, FoodgramError> {
        self.deleted.lock().unwrap().push(id);
        Ok(self.ingredients.iter().any(|i| i.id == id))
    }

    async fn insert_many(&self, items: &[NewIngredient]) -> Result<u64, FoodgramError> {
        let mut inserted = self.inserted.lock().unwrap();
        let mut count = 0;
        for item in items {
            if !inserted.contains(item) {
                inserted.push(item.clone());
                count += 1;
            }
        }
        Ok(count)
    }
}

// ── MockMediaStore ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockMediaStore {
    pub saved: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

impl MediaStore for MockMediaStore {
    async fn save(&self, kind: MediaKind, image: &DecodedImage) -> Result<String, FoodgramError> {
        let mut saved = self.saved.lock().unwrap();
        let path = format!(
            "{}/saved-{}.{}",
            kind.directory(),
            saved.len() + 1,
            image.extension
        );
        saved.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, path: &str) {
        self.removed.lock().unwrap().push(path.to_owned());
    }
}
