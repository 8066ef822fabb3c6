use crate::comment::model::{CommentRequest, CommentView};
use crate::comment::service::CommentService;
use crate::middleware::auth::Principal;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use crate::utils::validation::UpdateMode;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Get all comments for a post
/// GET /posts/{post_id}/comments
pub async fn get_post_comments(
    comment_service: web::Data<CommentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, CustomError> {
    let comments: Vec<CommentView> = comment_service
        .get_comments_for_post(path.into_inner())
        .await?
        .into_iter()
        .map(CommentView::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Comments retrieved successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "count": comments.len(),
        "data": comments
    })))
}

/// Create a new comment on a post
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    principal: Principal,
    comment_service: web::Data<CommentService>,
    path: web::Path<i64>,
    body: web::Json<CommentRequest>,
) -> Result<HttpResponse, CustomError> {
    let comment = comment_service
        .add_comment(&principal, path.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Comment created successfully",
        "httpStatusCode": 201,
        "service": service_name(),
        "data": CommentView::from(comment)
    })))
}

/// GET /posts/{post_id}/comments/{comment_id}
pub async fn get_comment(
    comment_service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, CustomError> {
    let (post_id, comment_id) = path.into_inner();
    let comment = comment_service.get_comment(post_id, comment_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Comment retrieved successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "data": CommentView::from(comment)
    })))
}

async fn update(
    principal: Principal,
    comment_service: &CommentService,
    (post_id, comment_id): (i64, i64),
    body: CommentRequest,
    mode: UpdateMode,
) -> Result<HttpResponse, CustomError> {
    let comment = comment_service
        .update_comment(&principal, post_id, comment_id, body, mode)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Comment updated successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "data": CommentView::from(comment)
    })))
}

/// PUT /posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    principal: Principal,
    comment_service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
    body: web::Json<CommentRequest>,
) -> Result<HttpResponse, CustomError> {
    update(
        principal,
        &comment_service,
        path.into_inner(),
        body.into_inner(),
        UpdateMode::Full,
    )
    .await
}

/// PATCH /posts/{post_id}/comments/{comment_id}
pub async fn partial_update_comment(
    principal: Principal,
    comment_service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
    body: web::Json<CommentRequest>,
) -> Result<HttpResponse, CustomError> {
    update(
        principal,
        &comment_service,
        path.into_inner(),
        body.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

/// DELETE /posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    principal: Principal,
    comment_service: web::Data<CommentService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, CustomError> {
    let (post_id, comment_id) = path.into_inner();
    comment_service
        .delete_comment(&principal, post_id, comment_id)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
