use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{EdgeRepository, UserRepository};
use crate::domain::types::{EdgeKind, NewUser, User, UserProfile, UserStats};
use crate::error::FoodgramError;

/// Attach `is_subscribed` for `viewer` to each user, preserving order.
pub async fn profiles_for<E: EdgeRepository>(
    edges: &E,
    users: Vec<User>,
    viewer: Option<i32>,
) -> Result<Vec<UserProfile>, FoodgramError> {
    let subscribed = match viewer {
        Some(viewer) if !users.is_empty() => {
            let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
            edges
                .targets_among(EdgeKind::Subscription, viewer, &ids)
                .await?
        }
        _ => Default::default(),
    };
    Ok(users
        .into_iter()
        .map(|user| UserProfile {
            is_subscribed: subscribed.contains(&user.id),
            user,
        })
        .collect())
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: NewUser) -> Result<User, FoodgramError> {
        input.validate()?;
        if self.repo.is_taken(&input.email, &input.username).await? {
            return Err(FoodgramError::UserAlreadyExists);
        }
        let user = self.repo.create(&input).await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }
}

// ── GetUserProfile ───────────────────────────────────────────────────────────

pub struct GetUserProfileUseCase<R: UserRepository, E: EdgeRepository> {
    pub repo: R,
    pub edges: E,
}

impl<R: UserRepository, E: EdgeRepository> GetUserProfileUseCase<R, E> {
    pub async fn execute(
        &self,
        user_id: i32,
        viewer: Option<i32>,
    ) -> Result<UserProfile, FoodgramError> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        let mut profiles = profiles_for(&self.edges, vec![user], viewer).await?;
        profiles.pop().ok_or(FoodgramError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository, E: EdgeRepository> {
    pub repo: R,
    pub edges: E,
}

impl<R: UserRepository, E: EdgeRepository> ListUsersUseCase<R, E> {
    pub async fn execute(
        &self,
        page: PageRequest,
        viewer: Option<i32>,
    ) -> Result<Page<UserProfile>, FoodgramError> {
        let Page { items, count } = self.repo.list(page).await?;
        let items = profiles_for(&self.edges, items, viewer).await?;
        Ok(Page { items, count })
    }
}

// ── UserStats ────────────────────────────────────────────────────────────────

pub struct UserStatsUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UserStatsUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<UserStats>, FoodgramError> {
        self.repo.stats(page).await
    }
}
