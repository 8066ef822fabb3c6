use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, error::PathError};
use serde_json::json;

use crate::comment::service::POST_OR_COMMENT_NOT_FOUND;
use crate::group::service::GROUP_NOT_FOUND;
use crate::post::post_service::POST_NOT_FOUND;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use crate::utils::validation::FieldErrors;

/// Default service for paths no route matches.
pub async fn not_found() -> HttpResponse {
    HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "success": false,
        "message": "Route does not exist",
        "httpStatusCode": StatusCode::NOT_FOUND.as_u16(),
        "error": "NOT_FOUND_ERROR",
        "service": service_name(),
    }))
}

/// Non-numeric ids never match a record, so they get the resource's 404.
pub fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejected path parameters: {}", err);

    let params = req.match_info();
    let message = if params.get("post_id").is_some() {
        POST_OR_COMMENT_NOT_FOUND
    } else if params.get("group_id").is_some() {
        GROUP_NOT_FOUND
    } else if params.get("id").is_some() {
        POST_NOT_FOUND
    } else {
        "Not found."
    };

    CustomError::NotFoundError(message.into()).into()
}

/// Wrong field types are caught by the request structs; what reaches here
/// is either not JSON at all or not a JSON object.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::Deserialize(err) if err.is_data() => {
            let mut errors = FieldErrors::default();
            errors.add(
                "non_field_errors",
                "Invalid data. Expected a dictionary of fields.",
            );
            log::debug!("rejected request body: {}", err);
            CustomError::ValidationError(errors).into()
        }
        err => CustomError::BadRequestError(format!("Malformed request body: {}", err)).into(),
    }
}
