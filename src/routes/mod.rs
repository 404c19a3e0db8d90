use actix_web::web;

pub mod account;
pub mod health;
pub mod registration;
pub mod token;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").service(health::health));

    cfg.service(
        web::scope("/register")
            .service(account::register::student)
            .service(account::register::teacher),
    );
    cfg.service(
        web::scope("/login")
            .service(account::login::student)
            .service(account::login::teacher),
    );
    cfg.service(account::logout::logout);
    cfg.service(token::refresh);

    cfg.service(
        web::scope("/user")
            .service(account::profile::me)
            .service(account::profile::create)
            .service(account::profile::update),
    );

    cfg.service(
        web::scope("/exam-registration")
            .service(registration::my::get_my)
            .service(registration::my::create_my)
            .service(registration::my::update_my),
    );
    cfg.service(registration::summary::summary);
}
