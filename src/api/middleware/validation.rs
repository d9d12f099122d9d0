use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::application::dto::PatchRequest;
use crate::sql::UpdatePayload;

/// JSON request body that must be an object; rejections use the API error shape
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;

        match value {
            Value::Object(object) => Ok(Self(object)),
            _ => Err(ApiError::bad_request("Request body must be a JSON object")),
        }
    }
}

/// Validate a payload, collecting one message per failed field rule
pub fn validate_payload<T>(payload: &T) -> Result<(), ApiError>
where
    T: Validate,
{
    payload.validate().map_err(|validation_errors| {
        let mut messages: Vec<String> = validation_errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        messages.sort();

        ApiError::with_messages(StatusCode::BAD_REQUEST, messages)
    })
}

/// Deserialize and validate a creation body
pub fn parse_create<T>(object: Map<String, Value>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let request: T = serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_payload(&request)?;
    Ok(request)
}

/// Check a PATCH body against its typed schema, then keep it as an ordered payload
pub fn parse_update<T>(object: Map<String, Value>) -> Result<UpdatePayload, ApiError>
where
    T: PatchRequest,
{
    let nulls: Vec<String> = T::NON_NULLABLE
        .iter()
        .filter(|field| object.get(**field).is_some_and(Value::is_null))
        .map(|field| format!("{field} cannot be null"))
        .collect();
    if !nulls.is_empty() {
        return Err(ApiError::with_messages(StatusCode::BAD_REQUEST, nulls));
    }

    let typed: T = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_payload(&typed)?;

    Ok(UpdatePayload::from_json_object(object)?)
}
