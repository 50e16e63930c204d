use serde_json::{Value, json};

use crate::completion::CompletionError;
use crate::decoder::ParseError;
use crate::fetcher::FetchError;
use crate::prompts::PromptError;

/// Anything that can abort a request pipeline. Every variant ends up in the
/// same `{"status": "error", "message": ...}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Prompt(_) => "prompt",
            AppError::Completion(_) => "completion",
            AppError::Parse(_) => "parse",
        }
    }

    pub fn to_envelope(&self) -> Value {
        json!({ "status": "error", "message": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_display_text() {
        let err = AppError::from(ParseError::MissingContent);
        let envelope = err.to_envelope();
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["message"], err.to_string());
        assert_eq!(err.kind(), "parse");
    }
}
