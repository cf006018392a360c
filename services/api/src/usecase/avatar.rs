use crate::domain::repository::{MediaStore, UserRepository};
use crate::domain::types::{DecodedImage, MediaKind};
use crate::error::FoodgramError;

// ── SetAvatar ────────────────────────────────────────────────────────────────

pub struct SetAvatarUseCase<U: UserRepository, M: MediaStore> {
    pub users: U,
    pub media: M,
}

impl<U: UserRepository, M: MediaStore> SetAvatarUseCase<U, M> {
    /// Returns the new avatar's media path.
    pub async fn execute(&self, user_id: i32, data_url: &str) -> Result<String, FoodgramError> {
        let image = DecodedImage::from_data_url("avatar", data_url)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;

        let path = self.media.save(MediaKind::Avatar, &image).await?;
        if let Err(e) = self.users.set_avatar(user_id, Some(&path)).await {
            self.media.remove(&path).await;
            return Err(e);
        }
        if let Some(old) = user.avatar {
            self.media.remove(&old).await;
        }
        Ok(path)
    }
}

// ── RemoveAvatar ─────────────────────────────────────────────────────────────

pub struct RemoveAvatarUseCase<U: UserRepository, M: MediaStore> {
    pub users: U,
    pub media: M,
}

impl<U: UserRepository, M: MediaStore> RemoveAvatarUseCase<U, M> {
    /// Idempotent: removing an absent avatar succeeds.
    pub async fn execute(&self, user_id: i32) -> Result<(), FoodgramError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(FoodgramError::UserNotFound)?;
        let Some(old) = user.avatar else {
            return Ok(());
        };
        self.users.set_avatar(user_id, None).await?;
        self.media.remove(&old).await;
        Ok(())
    }
}
