use crate::config::EnvConfig;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{RTokenRefresh, TokenKind, TokenRefreshRes};
use crate::utils::token::{decode_token, issue_access, issue_pair};
use actix_web::{post, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Exchange a refresh token for a new access token. With rotation on, the
/// presented token is denylisted and a fresh pair comes back; a revoked or
/// otherwise dead token is a uniform 401.
#[post("/token/refresh")]
async fn refresh(
    _req: actix_web::HttpRequest,
    config: web::Data<EnvConfig>,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RTokenRefresh>,
) -> ApiResult<TokenRefreshRes> {
    let claims = decode_token(&config, &body.refresh, TokenKind::Refresh)?;

    if db.token_revoked(claims.jti).await? {
        return Err(AppError::Unauthorized);
    }

    let user = match db.get_user_by_id(&claims.sub).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };
    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    if config.rotate_refresh_tokens {
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
        db.revoke_token(claims.jti, claims.sub, expires_at).await?;

        let pair = issue_pair(&config, user.id, &user.role)?;
        Ok(ApiResponse::Ok(TokenRefreshRes {
            access: pair.access,
            refresh: pair.refresh,
        }))
    } else {
        let access = issue_access(&config, user.id, &user.role)?;
        Ok(ApiResponse::Ok(TokenRefreshRes {
            access,
            refresh: body.refresh.clone(),
        }))
    }
}
