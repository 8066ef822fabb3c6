use super::controller::{get_group, list_groups};
use actix_web::web;

pub fn group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/groups")
            .route("", web::get().to(list_groups))
            .route("/{group_id}", web::get().to(get_group)),
    );
}
