use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use cupcp_backend::config::EnvConfig;
use cupcp_backend::db::postgres_service::PostgresService;
use cupcp_backend::routes::configure_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );

    log::info!("Starting server on {}", addr);
    if config.debug {
        log::debug!("Allowed hosts: {:?}", config.allowed_hosts);
        log::debug!("Teacher allow-list: {:?}", config.allowed_teacher_emails);
    }

    let config_data = web::Data::new(config.clone());

    HttpServer::new(move || {
        let cors = config
            .cors_allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(config_data.clone())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
