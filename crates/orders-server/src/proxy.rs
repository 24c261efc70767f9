//! Client for the external keyword service behind `GET /say`.
//!
//! The keyword is posted as `{"keyword": ...}` and a successful reply is
//! relayed verbatim: upstream body bytes and content type, status 200.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::schema::say::SayRequest;

#[derive(Clone)]
pub struct KeywordProxy {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

/// A relayed upstream reply.
#[derive(Debug)]
pub struct ProxiedReply {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for ProxiedReply {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, self.body).into_response();
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

impl KeywordProxy {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        KeywordProxy {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub async fn say(&self, keyword: Option<String>) -> Result<ProxiedReply, ApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&SayRequest { keyword })
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("POST {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Upstream(format!(
                "POST {} returned {}",
                self.endpoint, status
            )));
        }

        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                ApiError::Upstream(format!("reading reply from {} failed: {}", self.endpoint, e))
            })?;

        Ok(ProxiedReply { content_type, body })
    }
}
