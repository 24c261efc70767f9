//! Keyword proxy request types.

use serde::{Deserialize, Serialize};

/// Query string of `GET /say`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SayQuery {
    pub keyword: Option<String>,
}

/// Body forwarded to the keyword service.
#[derive(Debug, Clone, Serialize)]
pub struct SayRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}
