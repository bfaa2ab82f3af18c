pub mod trip_repository;


pub use trip_repository::{DatedFare, DayTotalsRow, FareTotals, MySqlTripStore, TripStore};
