use crate::config::EnvConfig;
use crate::db::postgres_service::PostgresService;
use crate::types::account::{DetailRes, RLogout};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::TokenKind;
use crate::utils::token::decode_token;
use crate::utils::webutils::AuthedUser;
use actix_web::{post, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Single-use logout: the presented refresh token is denylisted and can
/// never be exchanged again. A malformed or already-dead token is the
/// caller's mistake, not ours.
#[post("/logout")]
async fn logout(
    _req: actix_web::HttpRequest,
    _user: AuthedUser,
    config: web::Data<EnvConfig>,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RLogout>,
) -> ApiResult<DetailRes> {
    let claims = decode_token(&config, &body.refresh, TokenKind::Refresh)
        .map_err(|_| AppError::BadRequest("Invalid refresh token.".to_string()))?;

    if db.token_revoked(claims.jti).await? {
        return Err(AppError::BadRequest("Invalid refresh token.".to_string()));
    }

    let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
    db.revoke_token(claims.jti, claims.sub, expires_at).await?;

    Ok(ApiResponse::ResetContent(DetailRes {
        detail: "Logout successful.".to_string(),
    }))
}
