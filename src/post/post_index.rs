use super::post_controller::{
    create_post, delete_post, get_post, list_posts, partial_update_post, update_post,
};
use crate::comment::index::comment_routes;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .configure(comment_routes)
            .route("", web::get().to(list_posts))
            .route("", web::post().to(create_post))
            .route("/{id}", web::get().to(get_post))
            .route("/{id}", web::put().to(update_post))
            .route("/{id}", web::patch().to(partial_update_post))
            .route("/{id}", web::delete().to(delete_post)),
    );
}
