use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Category shared by every error the gate emits
pub const AUTHENTICATION_ERROR: &str = "Authentication error";

/// A single client-facing error entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Reason")]
    pub reason: String,
}

impl ValidationError {
    pub fn authentication(reason: impl Into<String>) -> Self {
        Self {
            kind: AUTHENTICATION_ERROR.to_string(),
            reason: reason.into(),
        }
    }
}

/// Response body for a rejected request: `{"errors":[...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<ValidationError>,
}

/// A rejection: status code plus the errors to report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub status: StatusCode,
    pub errors: Vec<ValidationError>,
}

impl Denial {
    pub fn new(status: StatusCode, error: ValidationError) -> Self {
        Self {
            status,
            errors: vec![error],
        }
    }

    /// Reason of the first reported error
    pub fn reason(&self) -> Option<&str> {
        self.errors.first().map(|e| e.reason.as_str())
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        // Json sets `Content-Type: application/json`
        (
            self.status,
            Json(ErrorEnvelope {
                errors: self.errors,
            }),
        )
            .into_response()
    }
}

/// Result of evaluating an access spec against a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allow,
    Deny(Denial),
}

impl Outcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Outcome::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[tokio::test]
    async fn test_denial_response() {
        let denial = Denial::new(
            StatusCode::UNAUTHORIZED,
            ValidationError::authentication("This route needs authentication."),
        );

        let response = denial.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": [
                    {"Type": "Authentication error", "Reason": "This route needs authentication."}
                ]
            })
        );
    }
}
