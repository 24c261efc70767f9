//! Keyword proxy handler.

use axum::extract::{Query, State};

use crate::error::ApiError;
use crate::proxy::ProxiedReply;
use crate::schema::say::SayQuery;
use crate::state::AppState;

/// `GET /say?keyword=X`
pub async fn say(
    State(state): State<AppState>,
    Query(query): Query<SayQuery>,
) -> Result<ProxiedReply, ApiError> {
    state.proxy.say(query.keyword).await
}
