use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;

use crate::errors::{AppError, Result};
use crate::models::user::Claims;
use crate::state::AppState;

/// Id of the authenticated caller, placed in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub ObjectId);

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Authorization header is required"))?;

    let user_id = verify_token(token, &state.jwt_secret)?;

    request.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(request).await)
}

pub fn verify_token(token: &str, secret: &str) -> Result<ObjectId> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    let token_data = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected access token");
            AppError::unauthorized("Invalid access key")
        })?;

    ObjectId::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::unauthorized("Invalid access key"))
}

pub fn issue_token(user_id: ObjectId, secret: &str, ttl_seconds: i64) -> Result<String> {
    let claims = Claims {
        sub: user_id.to_hex(),
        exp: (Utc::now().timestamp() + ttl_seconds) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
}
