use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Foodgram API domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("recipe is already in favorites")]
    AlreadyFavorited,
    #[error("recipe is not in favorites")]
    NotFavorited,
    #[error("recipe is already in the shopping cart")]
    AlreadyInShoppingCart,
    #[error("recipe is not in the shopping cart")]
    NotInShoppingCart,
    #[error("already subscribed to this author")]
    AlreadySubscribed,
    #[error("not subscribed to this author")]
    NotSubscribed,
    #[error("cannot subscribe to yourself")]
    SelfSubscription,
    #[error("ingredient is used by at least one recipe")]
    IngredientInUse,
    #[error("user with this email or username already exists")]
    UserAlreadyExists,
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::NotFavorited => "NOT_FAVORITED",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::SelfSubscription => "SELF_SUBSCRIPTION",
            Self::IngredientInUse => "INGREDIENT_IN_USE",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Validation { .. } => "VALIDATION",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::RecipeNotFound | Self::IngredientNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyFavorited
            | Self::NotFavorited
            | Self::AlreadyInShoppingCart
            | Self::NotInShoppingCart
            | Self::AlreadySubscribed
            | Self::NotSubscribed
            | Self::SelfSubscription
            | Self::IngredientInUse
            | Self::UserAlreadyExists
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation { field, .. } = &self {
            body["field"] = serde_json::Value::from(*field);
        }
        (status, axum::Json(body)).into_response()
    }
}
