use actix_web::{web, App};
use cupcp_backend::config::EnvConfig;
use cupcp_backend::db::postgres_service::PostgresService;
use std::sync::Arc;

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub config: EnvConfig,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>, config: EnvConfig) -> Self {
        TestClient { db, config }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .configure(cupcp_backend::routes::configure_routes)
    }
}
