use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use chrono::{DateTime, Utc};
use entity::revoked_token::{ActiveModel as RevokedActive, Entity as RevokedToken};
use sea_orm::{EntityTrait, PaginatorTrait, Set, SqlErr};
use uuid::Uuid;

impl PostgresService {
    /// Put a refresh token's jti on the denylist. Revoking twice is a no-op.
    pub async fn revoke_token(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let result = RevokedToken::insert(RevokedActive {
            jti: Set(jti),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            revoked_at: Set(Utc::now()),
        })
        .exec(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(()),
                _ => Err(e.into()),
            },
        }
    }

    pub async fn token_revoked(&self, jti: Uuid) -> Result<bool, AppError> {
        Ok(RevokedToken::find_by_id(jti).count(&self.db).await? > 0)
    }
}
