pub mod summary;

pub use summary::{DashboardSummary, DayBucket, MonthStats, MonthlyTotal};
