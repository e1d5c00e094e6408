use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::TeacherService;
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::users::entities::Teacher;
use crate::storage::Storage;

pub async fn list_teachers(storage: &Arc<dyn Storage>) -> Result<Vec<Teacher>> {
    storage.list_teachers().await
}

pub async fn list_teachers_response(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let teachers = list_teachers(&storage).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        teachers,
        "Teachers retrieved successfully",
    )))
}
