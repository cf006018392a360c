use axum::{
    Json,
    extract::{OriginalUri, RawQuery, State},
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::IdentityHeaders;
use foodgram_domain::pagination::PageRequest;

use crate::domain::types::UserStats;
use crate::error::FoodgramError;
use crate::handlers::pagination::{Paginated, parse_query};
use crate::state::AppState;
use crate::usecase::user::UserStatsUseCase;

#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub id: i32,
    pub username: String,
    pub recipes_count: u64,
    pub subscriptions_count: u64,
    pub subscribers_count: u64,
}

impl From<UserStats> for UserStatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            id: stats.user_id,
            username: stats.username,
            recipes_count: stats.recipes_count,
            subscriptions_count: stats.subscriptions_count,
            subscribers_count: stats.subscribers_count,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StatsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

// ── GET /admin/users/stats/ ──────────────────────────────────────────────────

pub async fn user_stats(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<UserStatsResponse>>, FoodgramError> {
    if !identity.is_admin() {
        return Err(FoodgramError::Forbidden);
    }
    let query: StatsQuery = parse_query(raw_query.as_deref())?;
    let page = PageRequest::new(query.page, query.limit, state.page_size);
    let usecase = UserStatsUseCase {
        repo: state.user_repo(),
    };
    let stats = usecase.execute(page).await?.map(UserStatsResponse::from);
    Ok(Json(Paginated::new(stats, page, &state.public_url, &uri)))
}
