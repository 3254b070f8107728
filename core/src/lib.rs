//! Verifier core for the `/auth/me` endpoint.
//!
//! # Overview
//! Builds the single authenticated `HttpRequest` and classifies the returned
//! `HttpResponse` without touching the network (host-does-IO pattern). The
//! host executes the round-trip, so everything here is deterministic.
//!
//! # Design
//! - `AuthClient` is stateless; it holds only the base URL and token.
//! - The operation is split into `build_verify` and `parse_verify`, so the
//!   I/O boundary is explicit.
//! - A non-200 status is a `Verdict`, not an error. Only malformed JSON on a
//!   200 and unusable tokens surface as `ApiError`.

pub mod client;
pub mod error;
pub mod http;
pub mod render;
pub mod types;

pub use client::{AuthClient, DEFAULT_BASE_URL, PLACEHOLDER_TOKEN, VERIFY_PATH};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{OutputFormat, Verdict};
