use std::str::FromStr;
use std::sync::Arc;

use crate::models::{AnalysisRequest, AnalysisResult, QueryType};

/// The seam where real inference would plug in. Implementations interpret a
/// request and return structured guidance; the composer and the HTTP handler
/// never know which one is behind the trait.
pub trait Classifier: Send + Sync {
    fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    Placeholder,
    Guidance,
}

impl ClassifierKind {
    pub fn build(self) -> Arc<dyn Classifier> {
        match self {
            ClassifierKind::Placeholder => Arc::new(Placeholder),
            ClassifierKind::Guidance => Arc::new(Guidance),
        }
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placeholder" => Ok(ClassifierKind::Placeholder),
            "guidance" => Ok(ClassifierKind::Guidance),
            other => Err(format!("Unknown classifier '{}'", other)),
        }
    }
}

/// Fixed acknowledgment regardless of input. This is the behavior a deployment
/// gets until a real provider is wired in.
pub struct Placeholder;

impl Classifier for Placeholder {
    fn classify(&self, _request: &AnalysisRequest) -> Result<AnalysisResult, String> {
        let mut result = AnalysisResult::new("Analysis completed successfully");
        result.details =
            Some("This is a placeholder response. Integrate with your AI provider.".to_string());
        Ok(result)
    }
}

/// Canned guidance keyed by the query-type selector.
pub struct Guidance;

impl Classifier for Guidance {
    fn classify(&self, request: &AnalysisRequest) -> Result<AnalysisResult, String> {
        let result = match request.query_type {
            Some(QueryType::Code) => code_guidance(),
            Some(QueryType::Error) => error_guidance(),
            // Tool and pattern questions share the tooling walkthrough, as
            // does a request with no selector at all.
            _ => tool_guidance(),
        };
        Ok(result)
    }
}

fn code_guidance() -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "This function allows a user to transfer a specified amount of tokens to a recipient.",
    );
    result.who_can_call = Some("Any user can call this function.".to_string());
    result.state_changes =
        Some("Reduces the sender's balance by the transfer amount.".to_string());
    result.behaviors = vec![
        "Checks if the sender has enough balance before transferring".to_string(),
        "Calls an external token contract to perform the transfer".to_string(),
    ];
    result.mistakes = vec![
        "Forgetting to check balance before transfer".to_string(),
        "Not handling possible transfer failures".to_string(),
    ];
    result.next_step = Some("Ensure the token contract handles transfers securely".to_string());
    result
}

fn error_guidance() -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "This error occurs when trying to call a function that doesn't exist in the contract.",
    );
    result.why = Some(
        "The function name might be misspelled, or the contract hasn't been deployed yet."
            .to_string(),
    );
    result.how_to_fix = Some(
        "Double-check the function name matches exactly what's in your contract. \
         If deploying, ensure the contract is deployed before calling."
            .to_string(),
    );
    result.next_step =
        Some("Use Clarinet to verify your contract compiles and the function exists".to_string());
    result
}

fn tool_guidance() -> AnalysisResult {
    let mut result = AnalysisResult::new(
        "Clarinet is the local development environment for Clarity smart contracts.",
    );
    result.explanation = Some(
        "Use Clarinet when you want to write, test, and debug contracts locally before deployment."
            .to_string(),
    );
    result.behaviors = vec![
        "Provides a REPL for interactive testing".to_string(),
        "Runs unit tests against your contracts".to_string(),
        "Simulates blockchain state locally".to_string(),
    ];
    result.next_step =
        Some("Install Clarinet and run `clarinet new` to create a new project".to_string());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(query_type: Option<QueryType>) -> AnalysisRequest {
        AnalysisRequest {
            input: Some("(define-public (transfer ...))".to_string()),
            query_type,
            image_data: None,
        }
    }

    #[test]
    fn placeholder_ignores_the_request() {
        let with_code = Placeholder
            .classify(&request_with(Some(QueryType::Code)))
            .unwrap();
        let with_nothing = Placeholder.classify(&AnalysisRequest::default()).unwrap();

        assert_eq!(with_code, with_nothing);
        assert_eq!(with_code.summary, "Analysis completed successfully");
        assert!(with_code.details.is_some());
        assert!(with_code.behaviors.is_empty());
    }

    #[test]
    fn guidance_branches_on_code() {
        let result = Guidance
            .classify(&request_with(Some(QueryType::Code)))
            .unwrap();
        assert!(result.summary.contains("transfer"));
        assert!(result.who_can_call.is_some());
        assert_eq!(result.behaviors.len(), 2);
        assert_eq!(result.mistakes.len(), 2);
    }

    #[test]
    fn guidance_branches_on_error() {
        let result = Guidance
            .classify(&request_with(Some(QueryType::Error)))
            .unwrap();
        assert!(result.why.is_some());
        assert!(result.how_to_fix.is_some());
        assert!(result.who_can_call.is_none());
    }

    #[test]
    fn guidance_falls_back_to_tooling_walkthrough() {
        let tool = Guidance
            .classify(&request_with(Some(QueryType::Tool)))
            .unwrap();
        let pattern = Guidance
            .classify(&request_with(Some(QueryType::Pattern)))
            .unwrap();
        let unselected = Guidance.classify(&request_with(None)).unwrap();

        assert!(tool.summary.contains("Clarinet"));
        assert_eq!(tool, pattern);
        assert_eq!(tool, unselected);
    }

    #[test]
    fn kind_parses_known_names() {
        assert_eq!(
            "placeholder".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::Placeholder
        );
        assert_eq!(
            "guidance".parse::<ClassifierKind>().unwrap(),
            ClassifierKind::Guidance
        );
        assert!("deepseek".parse::<ClassifierKind>().is_err());
    }
}
