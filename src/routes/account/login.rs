use crate::config::EnvConfig;
use crate::db::postgres_service::PostgresService;
use crate::types::account::{RStudentLogin, RTeacherLogin, Role, TokenPairRes};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::{password, token};
use actix_web::{post, web};
use entity::user::Model as UserModel;
use std::sync::Arc;

/// Every failure mode (unknown credential, wrong password, wrong role,
/// disabled account) is the same Unauthorized so nothing leaks.
fn check_login(user: &UserModel, raw_password: &str, expected_role: Role) -> Result<(), AppError> {
    if user.role != expected_role.to_string() || !user.is_active {
        return Err(AppError::Unauthorized);
    }
    match password::verify(raw_password, &user.password_hash) {
        Ok(true) => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

fn pair_for(config: &EnvConfig, user: &UserModel) -> Result<TokenPairRes, AppError> {
    let pair = token::issue_pair(config, user.id, &user.role)?;
    Ok(TokenPairRes {
        access: pair.access,
        refresh: pair.refresh,
        role: user.role.clone(),
    })
}

#[post("/student")]
async fn student(
    _req: actix_web::HttpRequest,
    config: web::Data<EnvConfig>,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RStudentLogin>,
) -> ApiResult<TokenPairRes> {
    let user = match db.get_student_by_varsity_id(&body.varsity_id).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };
    check_login(&user, &body.password, Role::Student)?;

    Ok(ApiResponse::Ok(pair_for(&config, &user)?))
}

#[post("/teacher")]
async fn teacher(
    _req: actix_web::HttpRequest,
    config: web::Data<EnvConfig>,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RTeacherLogin>,
) -> ApiResult<TokenPairRes> {
    let user = match db.get_user_by_email(&body.email).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };
    check_login(&user, &body.password, Role::Teacher)?;

    Ok(ApiResponse::Ok(pair_for(&config, &user)?))
}
