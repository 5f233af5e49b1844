/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Json, Response};
use chrono::{Duration, Utc};
use compass_core::consts::JWT_EXPIRY_HOURS;
use compass_core::types::*;
use entity::user::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
}

type AuthError = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, error: &str) -> AuthError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details: None,
        }),
    )
}

/// Resolves the bearer token to a user and only lets administrators through.
/// The user is stored as a request extension.
pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AuthError> {
    let auth_header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(header) => header
            .to_str()
            .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Authorization header empty"))?,
        None => {
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                "Authorization header not found",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();
    let token = match (header.next(), header.next()) {
        (Some("Bearer"), Some(token)) => token.to_string(),
        _ => {
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header",
            ));
        }
    };

    let token_data = decode_jwt(&state.jwt_secret, &token)
        .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Unable to decode token"))?;

    let current_user = EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await
        .map_err(|e| {
            tracing::error!("Database error during authorization: {}", e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        })?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "User not found"))?;

    if current_user.role != UserRole::Admin {
        tracing::debug!(user = %current_user.id, "Rejected non-admin request");
        return Err(reject(StatusCode::FORBIDDEN, "Administrator role required"));
    }

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

pub fn encode_jwt(secret: &str, id: Uuid) -> Result<String, StatusCode> {
    let now = Utc::now();
    let exp = (now + Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = Claims { iat, exp, id };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn decode_jwt(secret: &str, jwt: &str) -> Result<TokenData<Claims>, StatusCode> {
    if secret.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    decode(
        jwt,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)
}
