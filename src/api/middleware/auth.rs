use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::domain::authorization::{AuthorizationError, UserContext};

/// Tokens minted by [`JwtKeys::create_token`] are valid for a day
const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    pub is_admin: bool,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signing and verification keys derived from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn create_token(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            username: username.to_string(),
            is_admin,
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthorizationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthorizationError::InvalidToken(e.to_string()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Attach a [`UserContext`] when the request carries a valid bearer token.
///
/// Never rejects; routes that need a user check for the context themselves.
pub async fn authenticate(
    State(keys): State<Arc<JwtKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match keys.verify(token) {
            Ok(claims) => {
                request
                    .extensions_mut()
                    .insert(UserContext::new(claims.username, claims.is_admin));
            }
            Err(e) => debug!(error = %e, "Ignoring unverifiable token"),
        }
    }

    next.run(request).await
}

/// Reject the request with 401 unless an admin is logged in
pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let denied = match request.extensions().get::<UserContext>() {
        Some(user) if user.can_manage_listings() => None,
        Some(_) => Some(AuthorizationError::AdminRequired),
        None => Some(AuthorizationError::AuthenticationRequired),
    };

    match denied {
        None => Ok(next.run(request).await),
        Some(e) => {
            debug!(reason = %e, "Rejecting admin route");
            Err(ApiError::unauthorized())
        }
    }
}
