use actix_web::{HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::system::responses::ReadinessResponse;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// 就绪探针
    pub async fn readiness(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReadinessResponse::ready(),
            format!("{} is ready", self.get_config().app.system_name),
        )))
    }
}
