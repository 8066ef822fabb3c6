use crate::group::model::GroupView;
use crate::group::service::GroupService;
use crate::utils::error::CustomError;
use crate::utils::helpers::service_name;
use actix_web::{HttpResponse, web};
use serde_json::json;

/// GET /groups
pub async fn list_groups(
    group_service: web::Data<GroupService>,
) -> Result<HttpResponse, CustomError> {
    let groups: Vec<GroupView> = group_service
        .list_groups()
        .await?
        .into_iter()
        .map(GroupView::from)
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Groups retrieved successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "count": groups.len(),
        "data": groups
    })))
}

/// GET /groups/{group_id}
pub async fn get_group(
    group_service: web::Data<GroupService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, CustomError> {
    let group = group_service.get_group(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Group retrieved successfully",
        "httpStatusCode": 200,
        "service": service_name(),
        "data": GroupView::from(group)
    })))
}
