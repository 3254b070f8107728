//! Stateless request builder and response classifier for `/auth/me`.
//!
//! # Design
//! `AuthClient` holds the base URL and the bearer token and carries no state
//! between calls. `build_verify` produces the one `HttpRequest` the verifier
//! ever sends; `parse_verify` turns the matching `HttpResponse` into a
//! `Verdict`. The host performs the round-trip in between.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Verdict;

pub const DEFAULT_BASE_URL: &str = "https://api.prjx.com";
pub const VERIFY_PATH: &str = "/auth/me";

/// Token shipped in the original template. Sending it always yields a 401.
pub const PLACEHOLDER_TOKEN: &str = "TON_JWT_ICI";

#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    token: String,
}

impl AuthClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        if token.is_empty() {
            return Err(ApiError::InvalidToken("token is empty".to_string()));
        }
        if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ApiError::InvalidToken(
                "token contains whitespace or control characters".to_string(),
            ));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn url(&self) -> String {
        format!("{}{VERIFY_PATH}", self.base_url)
    }

    pub fn uses_placeholder_token(&self) -> bool {
        self.token == PLACEHOLDER_TOKEN
    }

    pub fn build_verify(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.token)),
                ("Accept".to_string(), "*/*".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: None,
        }
    }

    /// Only status 200 is accepted; every other status is reported as-is.
    pub fn parse_verify(&self, response: HttpResponse) -> Result<Verdict, ApiError> {
        if response.status != 200 {
            return Ok(Verdict::Rejected {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body)
            .map(Verdict::Accepted)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}
