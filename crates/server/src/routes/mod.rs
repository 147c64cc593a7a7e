use actix_web::web;

pub mod draft;
pub mod form;
pub mod system;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(form::index)
        .service(form::submit)
        .service(draft::create_draft)
        .service(system::health);
}
