use crate::middleware::auth::Principal;
use crate::post::post_model::{PostRequest, PostView};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use crate::utils::validation::UpdateMode;
use actix_web::{HttpResponse, web};
use serde_json::json;

pub async fn list_posts(post_service: web::Data<PostService>) -> Result<HttpResponse, CustomError> {
    let posts: Vec<PostView> = post_service
        .list_posts()
        .await?
        .into_iter()
        .map(PostView::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Posts fetched successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "count": posts.len(),
        "data": posts
    })))
}

pub async fn create_post(
    principal: Principal,
    post_service: web::Data<PostService>,
    body: web::Json<PostRequest>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .create_post(&principal, body.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Post created successfully",
        "httpStatusCode": 201,
        "service": service_name(),
        "data": PostView::from(post)
    })))
}

pub async fn get_post(
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get_post(post_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post fetched successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "data": PostView::from(post)
    })))
}

async fn update(
    principal: Principal,
    post_id: i64,
    post_service: &PostService,
    body: PostRequest,
    mode: UpdateMode,
) -> Result<HttpResponse, CustomError> {
    let post = post_service
        .update_post(&principal, post_id, body, mode)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post updated successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "data": PostView::from(post)
    })))
}

/// PUT /posts/{id}
pub async fn update_post(
    principal: Principal,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
    body: web::Json<PostRequest>,
) -> Result<HttpResponse, CustomError> {
    update(
        principal,
        post_id.into_inner(),
        &post_service,
        body.into_inner(),
        UpdateMode::Full,
    )
    .await
}

/// PATCH /posts/{id}
pub async fn partial_update_post(
    principal: Principal,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
    body: web::Json<PostRequest>,
) -> Result<HttpResponse, CustomError> {
    update(
        principal,
        post_id.into_inner(),
        &post_service,
        body.into_inner(),
        UpdateMode::Partial,
    )
    .await
}

pub async fn delete_post(
    principal: Principal,
    post_id: web::Path<i64>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, CustomError> {
    post_service
        .delete_post(&principal, post_id.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
