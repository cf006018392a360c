use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, NewIngredient};
use crate::error::FoodgramError;

// ── SearchIngredients ────────────────────────────────────────────────────────

pub struct SearchIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> SearchIngredientsUseCase<I> {
    pub async fn execute(&self, name: Option<&str>) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name.map(str::trim).filter(|s| !s.is_empty());
        self.repo.search(prefix).await
    }
}

// ── GetIngredient ────────────────────────────────────────────────────────────

pub struct GetIngredientUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> GetIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, FoodgramError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FoodgramError::IngredientNotFound)
    }
}

// ── DeleteIngredient ─────────────────────────────────────────────────────────

pub struct DeleteIngredientUseCase<I: IngredientRepository> {
    pub repo: I,
}

impl<I: IngredientRepository> DeleteIngredientUseCase<I> {
    pub async fn execute(&self, id: i32) -> Result<(), FoodgramError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(FoodgramError::IngredientNotFound);
        }
        if self.repo.is_referenced(id).await? {
            return Err(FoodgramError::IngredientInUse);
        }
        if !self.repo.delete(id).await? {
            return Err(FoodgramError::IngredientNotFound);
        }
        tracing::info!(ingredient_id = id, "ingredient deleted");
        Ok(())
    }
}

// ── LoadIngredients ──────────────────────────────────────────────────────────

/// Bulk import for the catalogue. Invalid rows are skipped and counted.
pub struct LoadIngredientsUseCase<I: IngredientRepository> {
    pub repo: I,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: u64,
    pub skipped_invalid: usize,
}

impl<I: IngredientRepository> LoadIngredientsUseCase<I> {
    pub async fn execute(&self, items: Vec<NewIngredient>) -> Result<LoadReport, FoodgramError> {
        let total = items.len();
        let valid: Vec<NewIngredient> = items
            .into_iter()
            .map(|item| NewIngredient {
                name: item.name.trim().to_owned(),
                measurement_unit: item.measurement_unit.trim().to_owned(),
            })
            .filter(|item| item.validate().is_ok())
            .collect();
        let skipped_invalid = total - valid.len();
        let inserted = self.repo.insert_many(&valid).await?;
        Ok(LoadReport {
            inserted,
            skipped_invalid,
        })
    }
}
