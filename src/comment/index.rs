use super::controller::{
    create_comment, delete_comment, get_comment, get_post_comments, partial_update_comment,
    update_comment,
};
use actix_web::web;

/// Mounted inside the `/posts` scope.
pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/{post_id}/comments")
            .route("", web::get().to(get_post_comments))
            .route("", web::post().to(create_comment))
            .route("/{comment_id}", web::get().to(get_comment))
            .route("/{comment_id}", web::put().to(update_comment))
            .route("/{comment_id}", web::patch().to(partial_update_comment))
            .route("/{comment_id}", web::delete().to(delete_comment)),
    );
}
