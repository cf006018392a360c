use tracing::debug;

use crate::domain::repository::EdgeRepository;
use crate::domain::types::EdgeKind;
use crate::error::FoodgramError;

// ── AddRelation ──────────────────────────────────────────────────────────────

/// Create a favorite, shopping-cart or subscription edge.
pub struct AddRelationUseCase<E: EdgeRepository> {
    pub edges: E,
}

impl<E: EdgeRepository> AddRelationUseCase<E> {
    pub async fn execute(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<(), FoodgramError> {
        if kind == EdgeKind::Subscription && user_id == target_id {
            return Err(FoodgramError::SelfSubscription);
        }
        if !self.edges.target_exists(kind, target_id).await? {
            return Err(kind.target_not_found());
        }
        if !self.edges.insert(kind, user_id, target_id).await? {
            return Err(kind.already_exists());
        }
        debug!(kind = kind.as_str(), user_id, target_id, "edge created");
        Ok(())
    }
}

// ── RemoveRelation ───────────────────────────────────────────────────────────

pub struct RemoveRelationUseCase<E: EdgeRepository> {
    pub edges: E,
}

impl<E: EdgeRepository> RemoveRelationUseCase<E> {
    pub async fn execute(
        &self,
        kind: EdgeKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<(), FoodgramError> {
        if !self.edges.target_exists(kind, target_id).await? {
            return Err(kind.target_not_found());
        }
        if !self.edges.delete(kind, user_id, target_id).await? {
            return Err(kind.not_found());
        }
        debug!(kind = kind.as_str(), user_id, target_id, "edge removed");
        Ok(())
    }
}
