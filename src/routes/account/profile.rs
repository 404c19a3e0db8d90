use crate::db::postgres_service::PostgresService;
use crate::types::account::{RUserCreate, RUserUpdate, UserDetail};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;
use crate::utils::webutils::AuthedUser;
use actix_web::{get, post, put, web};
use std::sync::Arc;

#[get("")]
async fn me(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<UserDetail> {
    let user = db.get_user_by_id(&user.id).await?;
    Ok(ApiResponse::Ok(user.into()))
}

/// Generic create: role comes from the body, role-gated fields validated
/// accordingly. No bearer token required, it doubles as a signup form.
#[post("")]
async fn create(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserDetail> {
    let account = validate::generic_account(body.into_inner())?;
    let uid = db.create_account(account).await?;
    let user = db.get_user_by_id(&uid).await?;

    Ok(ApiResponse::Created(user.into()))
}

#[put("")]
async fn update(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RUserUpdate>,
) -> ApiResult<UserDetail> {
    let current = db.get_user_by_id(&user.id).await?;
    let patch = validate::account_patch(body.into_inner(), &current)?;
    let updated = db.update_account(user.id, patch).await?;

    Ok(ApiResponse::Ok(updated.into()))
}
