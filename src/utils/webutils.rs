use crate::config::EnvConfig;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::token::TokenKind;
use crate::utils::token::decode_token;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated caller, pulled out of a `Bearer` access token.
/// Handlers that take this parameter are the ones behind the bearer wall.
#[derive(Clone, Debug)]
pub struct AuthedUser {
    pub id: Uuid,
    pub role: String,
}

impl AuthedUser {
    pub fn is_teacher(&self) -> bool {
        self.role == "teacher"
    }
}

async fn authed_user_from(req: HttpRequest) -> Result<AuthedUser, AppError> {
    let config = req
        .app_data::<web::Data<EnvConfig>>()
        .ok_or_else(|| AppError::Internal("EnvConfig not registered".to_string()))?;
    let db = req
        .app_data::<web::Data<Arc<PostgresService>>>()
        .ok_or_else(|| AppError::Internal("PostgresService not registered".to_string()))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let claims = decode_token(config, token, TokenKind::Access)?;

    // A valid signature is not enough: the account behind the token must
    // still exist and still be active, so soft-disabling cuts access on the
    // next request instead of at token expiry.
    let user = match db.get_user_by_id(&claims.sub).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };
    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    Ok(AuthedUser {
        id: user.id,
        role: user.role,
    })
}

impl FromRequest for AuthedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(authed_user_from(req))
    }
}
