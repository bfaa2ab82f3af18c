use std::sync::Arc;

use tracing::{debug, info};

use crate::core::timezone::{now_millis, ReportTimezone};
use crate::core::{AppError, Result};
use crate::modules::trips::models::{CreateTripRequest, Trip, TripFilter, UpdateTripRequest};
use crate::modules::trips::repositories::TripStore;
use crate::modules::trips::services::query_builder::build_plan;

/// Orchestrates trip CRUD and the filtered fetch.
///
/// Validation lives on the model; this layer stamps times, resolves query
/// plans, and maps missing ids to not-found faults.
pub struct TripService {
    store: Arc<dyn TripStore>,
    tz: ReportTimezone,
}

impl TripService {
    pub fn new(store: Arc<dyn TripStore>, tz: ReportTimezone) -> Self {
        Self { store, tz }
    }

    /// Create a trip from a validated request. Every operation is
    /// attempted exactly once; store faults propagate to the caller.
    pub async fn create_trip(&self, request: CreateTripRequest) -> Result<Trip> {
        let trip = Trip::new(request, now_millis())?;
        self.store.insert(&trip).await?;

        info!(trip_id = %trip.id, "trip created");
        Ok(trip)
    }

    /// Run the query builder over a filter and execute the plan.
    pub async fn fetch_custom(&self, filter: TripFilter) -> Result<Vec<Trip>> {
        let plan = build_plan(&filter, &self.tz, now_millis());
        debug!(?plan, "fetching trips");

        self.store.fetch(&plan).await
    }

    /// Apply mutable-field updates to one trip.
    pub async fn edit_trip(&self, id: &str, request: UpdateTripRequest) -> Result<Trip> {
        let mut trip = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Trip not found"))?;

        trip.apply_update(request, now_millis())?;

        // The row can disappear between the read and the write; the edit
        // then reports not-found rather than inventing a record.
        if !self.store.update(&trip).await? {
            return Err(AppError::not_found("Trip not found"));
        }

        info!(trip_id = %trip.id, "trip updated");
        Ok(trip)
    }

    /// Hard-delete one trip.
    pub async fn delete_trip(&self, id: &str) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::not_found("Trip not found"));
        }

        info!(trip_id = %id, "trip deleted");
        Ok(())
    }
}
