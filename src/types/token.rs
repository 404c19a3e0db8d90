use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by both halves of a pair. `jti` is what the denylist keys
/// on; access tokens are never denylisted and simply age out.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub token_type: TokenKind,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize, Deserialize)]
pub struct RTokenRefresh {
    pub refresh: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenRefreshRes {
    pub access: String,
    pub refresh: String,
}
