use crate::config::EnvConfig;
use crate::types::error::AppError;
use crate::types::token::{Claims, TokenKind, TokenPair};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

fn issue(
    config: &EnvConfig,
    user_id: Uuid,
    role: &str,
    kind: TokenKind,
) -> Result<String, AppError> {
    let now = Utc::now();
    let lifetime = match kind {
        TokenKind::Access => Duration::minutes(config.access_token_lifetime_mins),
        TokenKind::Refresh => Duration::days(config.refresh_token_lifetime_days),
    };
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        token_type: kind,
        jti: Uuid::new_v4(),
        iat: now.timestamp(),
        exp: (now + lifetime).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))
}

pub fn issue_access(config: &EnvConfig, user_id: Uuid, role: &str) -> Result<String, AppError> {
    issue(config, user_id, role, TokenKind::Access)
}

pub fn issue_pair(config: &EnvConfig, user_id: Uuid, role: &str) -> Result<TokenPair, AppError> {
    Ok(TokenPair {
        access: issue(config, user_id, role, TokenKind::Access)?,
        refresh: issue(config, user_id, role, TokenKind::Refresh)?,
    })
}

/// Decode and verify a token, requiring the expected kind. Anything wrong
/// with it (signature, expiry, shape, kind) comes back as Unauthorized;
/// callers that want a 400 instead remap it.
pub fn decode_token(
    config: &EnvConfig,
    token: &str,
    expected: TokenKind,
) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    if data.claims.token_type != expected {
        return Err(AppError::Unauthorized);
    }
    Ok(data.claims)
}
