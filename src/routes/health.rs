use crate::types::response::{ApiResponse, ApiResult};
use actix_web::get;

/// Liveness probe: an empty 200 means the process is up and routing.
#[get("")]
async fn health(_req: actix_web::HttpRequest) -> ApiResult<()> {
    Ok(ApiResponse::EmptyOk)
}
