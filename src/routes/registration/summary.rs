use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::registration::SummaryRow;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::AuthedUser;
use actix_web::{get, web};
use std::sync::Arc;

/// Teacher-only aggregate view. The only role-keyed check in the API;
/// everything else is ownership-scoped.
#[get("/exam-registration-summary")]
async fn summary(
    _req: actix_web::HttpRequest,
    user: AuthedUser,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<SummaryRow>> {
    if !user.is_teacher() {
        return Err(AppError::Forbidden);
    }

    let rows = db
        .list_registrations()
        .await?
        .into_iter()
        .filter_map(|(reg, owner)| {
            owner.map(|owner| SummaryRow {
                registration: reg.into(),
                user: owner.into(),
            })
        })
        .collect();

    Ok(ApiResponse::Ok(rows))
}
