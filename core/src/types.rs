//! Outcome and output types for a verification call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::render::to_repr;

/// How an accepted profile is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Mapping notation: `{'id': 1}`, `True`, `None`.
    #[default]
    Repr,
    /// Compact JSON.
    Json,
    /// Indented JSON.
    Pretty,
}

/// Classification of one `/auth/me` response.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Status 200 with a JSON body.
    Accepted(Value),
    /// Any other status. The body is kept verbatim.
    Rejected { status: u16, body: String },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    /// Text written to stdout for this verdict.
    ///
    /// `Rejected` ignores `format` and always renders as
    /// `Erreur {status}: {body}`.
    pub fn render(&self, format: OutputFormat) -> Result<String, ApiError> {
        match self {
            Verdict::Accepted(value) => match format {
                OutputFormat::Repr => Ok(to_repr(value)),
                OutputFormat::Json => serde_json::to_string(value)
                    .map_err(|e| ApiError::Serialization(e.to_string())),
                OutputFormat::Pretty => serde_json::to_string_pretty(value)
                    .map_err(|e| ApiError::Serialization(e.to_string())),
            },
            Verdict::Rejected { status, body } => Ok(format!("Erreur {status}: {body}")),
        }
    }
}
