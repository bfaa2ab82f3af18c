pub mod filter;
pub mod trip;

pub use filter::TripFilter;
pub use trip::{CreateTripRequest, Trip, UpdateTripRequest};
