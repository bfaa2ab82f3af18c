use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::core::{ApiResponse, AppError};
use crate::modules::trips::models::{CreateTripRequest, TripFilter, UpdateTripRequest};
use crate::modules::trips::services::TripService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteOutcome {
    is_deleted: bool,
}

/// Create a new trip
/// POST /trip/add
pub async fn add_trip(
    service: web::Data<Arc<TripService>>,
    request: web::Json<CreateTripRequest>,
) -> Result<HttpResponse, AppError> {
    let trip = service.create_trip(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(trip)))
}

/// Run the query builder over a filter in the request body
/// POST /trip/fetchCustom
pub async fn fetch_custom(
    service: web::Data<Arc<TripService>>,
    filter: web::Json<TripFilter>,
) -> Result<HttpResponse, AppError> {
    let trips = service.fetch_custom(filter.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(trips)))
}

/// Apply mutable-field updates to one trip
/// PUT /trip/edit/{id}
pub async fn edit_trip(
    service: web::Data<Arc<TripService>>,
    path: web::Path<String>,
    request: web::Json<UpdateTripRequest>,
) -> Result<HttpResponse, AppError> {
    let trip = service
        .edit_trip(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(trip)))
}

/// Hard-delete one trip
/// DELETE /trip/delete/{id}
pub async fn delete_trip(
    service: web::Data<Arc<TripService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_trip(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(DeleteOutcome { is_deleted: true })))
}

/// Configure trip routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trip")
            .route("/add", web::post().to(add_trip))
            .route("/fetchCustom", web::post().to(fetch_custom))
            .route("/edit/{id}", web::put().to(edit_trip))
            .route("/delete/{id}", web::delete().to(delete_trip)),
    );
}
