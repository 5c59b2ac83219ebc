use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use tracing::warn;

use crate::models::{AnalysisRequest, AnalysisResult, ErrorBody, QueryType};

/// Where the current submission stands. Exactly one submission can be in
/// flight; every completion path, network failure included, leaves `InFlight`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(String),
}

/// Client-side request composer: collects the selector, free text, and an
/// optional image, and issues one analysis call per submission.
pub struct Composer {
    endpoint: String,
    client: Client,
    query_type: Option<QueryType>,
    input: String,
    image_data: Option<String>,
    state: RequestState,
}

impl Composer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            endpoint: format!("{}/api/analyze", base_url.into().trim_end_matches('/')),
            client: Client::new(),
            query_type: None,
            input: String::new(),
            image_data: None,
            state: RequestState::Idle,
        }
    }

    // Changing the selector discards the previous outcome.
    pub fn select(&mut self, query_type: QueryType) {
        self.query_type = Some(query_type);
        if !self.is_busy() {
            self.state = RequestState::Idle;
        }
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Reads an image file and carries it as a `data:<mime>;base64,` payload.
    pub fn attach_image(&mut self, path: &Path) -> Result<(), String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let mime = match path.extension().and_then(|e| e.to_str()) {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/png",
        };

        self.image_data = Some(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)));
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image_data = None;
    }

    pub fn is_submittable(&self) -> bool {
        self.build_request().is_submittable()
    }

    pub fn is_busy(&self) -> bool {
        self.state == RequestState::InFlight
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Submits the composed request. A no-op while a call is outstanding or
    /// when there is nothing to submit; otherwise the state moves to
    /// `InFlight` and then to `Succeeded` or `Failed`.
    pub async fn submit(&mut self) {
        if self.is_busy() {
            warn!("Submission ignored: a request is already in flight");
            return;
        }

        let request = self.build_request();
        if !request.is_submittable() {
            return;
        }

        self.state = RequestState::InFlight;

        self.state = match self.send(&request).await {
            Ok(result) => RequestState::Succeeded(result),
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                RequestState::Failed(e)
            }
        };
    }

    fn build_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            input: (!self.input.trim().is_empty()).then(|| self.input.clone()),
            query_type: self.query_type,
            image_data: self.image_data.clone(),
        }
    }

    async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResult, String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Analysis request failed: {}", e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read analysis response: {}", e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(format!("Analysis failed ({}): {}", status, message));
        }

        serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse analysis response: {}", e))
    }
}
