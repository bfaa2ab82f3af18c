pub mod error;
pub mod response;
pub mod timezone;

pub use error::{AppError, Result};
pub use response::ApiResponse;
pub use timezone::ReportTimezone;
