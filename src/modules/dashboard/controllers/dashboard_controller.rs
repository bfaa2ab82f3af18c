use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{ApiResponse, AppError};
use crate::modules::dashboard::services::DashboardService;

/// Month/week/7-day/12-month statistics
/// GET /trip/dashboard (alias GET /trip/summary)
pub async fn dashboard_summary(
    service: web::Data<Arc<DashboardService>>,
) -> Result<HttpResponse, AppError> {
    let summary = service.summary().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

/// Configure dashboard routes.
///
/// Registered as exact-path resources, before the `/trip` CRUD scope, so
/// they match ahead of it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/trip/dashboard", web::get().to(dashboard_summary))
        .route("/trip/summary", web::get().to(dashboard_summary));
}
