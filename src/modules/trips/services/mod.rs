pub mod query_builder;
pub mod trip_service;

pub use query_builder::{build_plan, QueryPlan, SortOrder};
pub use trip_service::TripService;
