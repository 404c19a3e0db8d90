use crate::config::EnvConfig;
use crate::db::postgres_service::PostgresService;
use crate::types::account::{MessageRes, RStudentRegister, RTeacherRegister};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;
use actix_web::{post, web};
use std::sync::Arc;

#[post("/student")]
async fn student(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RStudentRegister>,
) -> ApiResult<MessageRes> {
    let account = validate::student_account(body.into_inner())?;
    db.create_account(account).await?;

    Ok(ApiResponse::Created(MessageRes {
        message: "Student registered successfully.".to_string(),
    }))
}

#[post("/teacher")]
async fn teacher(
    _req: actix_web::HttpRequest,
    config: web::Data<EnvConfig>,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RTeacherRegister>,
) -> ApiResult<MessageRes> {
    let account = validate::teacher_account(body.into_inner(), &config)?;
    db.create_account(account).await?;

    Ok(ApiResponse::Created(MessageRes {
        message: "Teacher registered successfully.".to_string(),
    }))
}
