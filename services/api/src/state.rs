use std::path::PathBuf;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbEdgeRepository, DbIngredientRepository, DbRecipeRepository, DbUserRepository,
};
use crate::infra::media::FsMediaStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media_root: PathBuf,
    /// Base URL for absolute links, without a trailing slash.
    pub public_url: String,
    pub page_size: u32,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        media_root: impl Into<PathBuf>,
        public_url: &str,
        page_size: u32,
    ) -> Self {
        Self {
            db,
            media_root: media_root.into(),
            public_url: public_url.trim_end_matches('/').to_owned(),
            page_size,
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn edge_repo(&self) -> DbEdgeRepository {
        DbEdgeRepository {
            db: self.db.clone(),
        }
    }

    pub fn media_store(&self) -> FsMediaStore {
        FsMediaStore {
            root: self.media_root.clone(),
        }
    }

    /// Absolute URL for a stored media path.
    pub fn media_url(&self, path: &str) -> String {
        format!("{}/media/{path}", self.public_url)
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
