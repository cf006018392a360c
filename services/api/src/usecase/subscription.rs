use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{RecipeRepository, UserRepository};
use crate::domain::types::{AuthorWithRecipes, User, UserProfile};
use crate::error::FoodgramError;

async fn with_recipes<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<AuthorWithRecipes, FoodgramError> {
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(author.id).await?;
    Ok(AuthorWithRecipes {
        // Only authors the viewer follows are ever rendered this way.
        profile: UserProfile {
            user: author,
            is_subscribed: true,
        },
        recipes: preview,
        recipes_count,
    })
}

// ── GetSubscribedAuthor ──────────────────────────────────────────────────────

/// Author payload returned right after subscribing.
pub struct GetSubscribedAuthorUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> GetSubscribedAuthorUseCase<U, R> {
    pub async fn execute(
        &self,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<AuthorWithRecipes, FoodgramError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        with_recipes(&self.recipes, author, recipes_limit).await
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> ListSubscriptionsUseCase<U, R> {
    pub async fn execute(
        &self,
        subscriber_id: i32,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<AuthorWithRecipes>, FoodgramError> {
        let Page { items, count } = self
            .users
            .list_subscribed_authors(subscriber_id, page)
            .await?;
        let mut authors = Vec::with_capacity(items.len());
        for author in items {
            authors.push(with_recipes(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page {
            items: authors,
            count,
        })
    }
}
