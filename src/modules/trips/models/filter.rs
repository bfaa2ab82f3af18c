use serde::Deserialize;

/// Body of `POST /trip/fetchCustom`. Every field is optional.
///
/// `sort` and `recent` arrive as free-form strings from several frontend
/// generations; unknown values fall back to defaults instead of failing
/// the request, so older clients keep working.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripFilter {
    /// Desired max row count. `-1` requests the wide page size.
    pub limit: Option<i64>,

    /// `"updated"` or `"tripdate"`; anything else means creation recency.
    pub sort: Option<String>,

    /// Case-insensitive substring matched against either endpoint label.
    pub search_string: Option<String>,

    /// Inclusive calendar-day lower bound on the trip date, epoch-millis.
    pub date_from: Option<i64>,

    /// Inclusive calendar-day upper bound on the trip date, epoch-millis.
    pub date_to: Option<i64>,

    /// Relative window shorthand: `"today"`, `"last_7_days"`, `"month"`.
    /// Ignored when an explicit date bound is present.
    pub recent: Option<String>,
}
