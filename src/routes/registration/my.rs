use crate::db::postgres_service::PostgresService;
use crate::types::registration::{
    MyRegistrationRes, RRegistrationCreate, RRegistrationUpdate, UserSnapshot,
};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::validate;
use crate::utils::webutils::AuthedUser;
use actix_web::{get, post, put, web};
use std::sync::Arc;

#[get("/my")]
async fn get_my(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<MyRegistrationRes> {
    let account = db.get_user_by_id(&user.id).await?;
    let snapshot = UserSnapshot::from(&account);

    let res = match db.get_registration_for_user(account.id).await? {
        Some(reg) => MyRegistrationRes {
            registered: true,
            registration: Some(reg.into()),
            user: Some(snapshot),
        },
        None => MyRegistrationRes {
            registered: false,
            registration: None,
            user: Some(snapshot),
        },
    };
    Ok(ApiResponse::Ok(res))
}

#[post("/my")]
async fn create_my(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RRegistrationCreate>,
) -> ApiResult<MyRegistrationRes> {
    let body = body.into_inner();
    validate::registration_create(&body)?;

    let account = db.get_user_by_id(&user.id).await?;
    let reg = db.create_registration(&account, body).await?;

    Ok(ApiResponse::Created(MyRegistrationRes {
        registered: true,
        registration: Some(reg.into()),
        user: None,
    }))
}

#[put("/my")]
async fn update_my(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RRegistrationUpdate>,
) -> ApiResult<MyRegistrationRes> {
    let body = body.into_inner();
    validate::registration_update(&body)?;

    let account = db.get_user_by_id(&user.id).await?;
    let reg = db.update_registration(&account, body).await?;

    Ok(ApiResponse::Ok(MyRegistrationRes {
        registered: true,
        registration: Some(reg.into()),
        user: None,
    }))
}
