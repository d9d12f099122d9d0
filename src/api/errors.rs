use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::application::errors::UseCaseError;
use crate::sql::InvalidInput;

/// API error response, rendered as `{"error": {"message", "status"}}`.
///
/// A single message is rendered as a string, several as an array.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    messages: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            messages: vec![message.into()],
        }
    }

    pub fn with_messages(status: StatusCode, messages: Vec<String>) -> Self {
        Self { status, messages }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self.messages.as_slice() {
            [single] => Value::String(single.clone()),
            many => json!(many),
        };

        let body = Json(json!({
            "error": {
                "message": message,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<InvalidInput> for ApiError {
    fn from(err: InvalidInput) -> Self {
        ApiError::with_messages(StatusCode::BAD_REQUEST, err.messages().to_vec())
    }
}

impl From<UseCaseError> for ApiError {
    fn from(err: UseCaseError) -> Self {
        match err {
            UseCaseError::InvalidInput(e) => e.into(),
            UseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            UseCaseError::NotFound(msg) => ApiError::not_found(msg),
            UseCaseError::Duplicate(msg) => ApiError::bad_request(msg),
            UseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Request failed");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RepositoryError;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: ApiError = UseCaseError::InvalidInput(InvalidInput::new("No data")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.messages(), ["No data"]);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = UseCaseError::NotFound("No job: 0".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_downstream_error_is_not_leaked() {
        let err: ApiError =
            UseCaseError::Repository(RepositoryError::Downstream(sqlx::Error::PoolTimedOut)).into();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.messages(), ["Internal server error"]);
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_multiple_messages_render_as_array() {
        let response = ApiError::with_messages(
            StatusCode::BAD_REQUEST,
            vec!["a".to_string(), "b".to_string()],
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": { "message": ["a", "b"], "status": 400 } })
        );
    }

    #[tokio::test]
    async fn test_single_message_renders_as_string() {
        let response = ApiError::not_found("No job: 0").into_response();

        assert_eq!(
            body_json(response).await,
            json!({ "error": { "message": "No job: 0", "status": 404 } })
        );
    }
}
