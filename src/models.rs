use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

// --- Domain types ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Code,
    Error,
    Tool,
    Pattern,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl AnalysisRequest {
    // A request needs text or an image before it can go out.
    pub fn is_submittable(&self) -> bool {
        let has_input = self
            .input
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        let has_image = self.image_data.as_deref().is_some_and(|s| !s.is_empty());
        has_input || has_image
    }

    /// Decodes the attached image, accepting either a bare base64 payload or
    /// a `data:<mime>;base64,` URL.
    pub fn decoded_image(&self) -> Result<Option<Vec<u8>>, String> {
        let Some(data) = self.image_data.as_deref() else {
            return Ok(None);
        };

        let payload = match data.split_once(";base64,") {
            Some((_, rest)) => rest,
            None => data,
        };

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| format!("Invalid image payload: {}", e))?;
        Ok(Some(bytes))
    }
}

/// Structured guidance for one request. Only `summary` is guaranteed; every
/// other section is rendered only when the classifier filled it in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_can_call: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_changes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mistakes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl AnalysisResult {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details: None,
            who_can_call: None,
            state_changes: None,
            behaviors: Vec::new(),
            mistakes: Vec::new(),
            explanation: None,
            why: None,
            how_to_fix: None,
            next_step: None,
            query_type: None,
            timestamp: None,
        }
    }
}

/// The single documented failure shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub category: String,
    pub description: String,
    pub when_to_use: String,
}
