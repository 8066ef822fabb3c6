use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::user::model::{CredentialsRequest, UserView};
use crate::user::service::UserService;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;

pub async fn register_user(
    user_service: web::Data<UserService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, CustomError> {
    let user = user_service.create_user(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User created successfully",
        "httpStatusCode": 201,
        "service": service_name(),
        "data": UserView::from(user)
    })))
}

pub async fn obtain_token(
    user_service: web::Data<UserService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, CustomError> {
    let token = user_service.obtain_token(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "httpStatusCode": 200,
        "service": service_name(),
        "token": token
    })))
}
