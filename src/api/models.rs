use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct FetchJobParams {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AskQuestionParams {
    pub url: String,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct FetchImageParams {
    pub url: String,
}

/// Success body of each route, keyed by the field it lands in.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Data(Value),
    Answer(String),
    Image(String),
}

/// Outcome of one request. Always answered with HTTP 200; the envelope's
/// `status` field says whether the pipeline succeeded.
#[derive(Debug)]
pub struct QueryResult(pub Result<Payload, AppError>);

impl QueryResult {
    pub fn into_envelope(self) -> Value {
        match self.0 {
            Ok(Payload::Data(data)) => json!({ "status": "success", "data": data }),
            Ok(Payload::Answer(answer)) => json!({ "status": "success", "answer": answer }),
            Ok(Payload::Image(image)) => json!({ "status": "success", "image": image }),
            Err(e) => e.to_envelope(),
        }
    }
}

impl From<Result<Payload, AppError>> for QueryResult {
    fn from(result: Result<Payload, AppError>) -> Self {
        QueryResult(result)
    }
}

impl IntoResponse for QueryResult {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.into_envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;

    #[test]
    fn test_success_envelopes() {
        let data = QueryResult(Ok(Payload::Data(json!({"role": "SRE"})))).into_envelope();
        assert_eq!(data, json!({"status": "success", "data": {"role": "SRE"}}));

        let answer = QueryResult(Ok(Payload::Answer("yes".into()))).into_envelope();
        assert_eq!(answer, json!({"status": "success", "answer": "yes"}));

        let image = QueryResult(Ok(Payload::Image(String::new()))).into_envelope();
        assert_eq!(image, json!({"status": "success", "image": ""}));
    }

    #[test]
    fn test_error_envelope() {
        let err = AppError::from(FetchError::NoDocument {
            url: "http://a.test".into(),
        });
        let envelope = QueryResult(Err(err)).into_envelope();
        assert_eq!(
            envelope,
            json!({"status": "error", "message": "http://a.test returned no document"})
        );
    }
}
