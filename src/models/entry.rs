use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// POST body for any resource save. `user_id` and `date` are pulled out of
/// the document; everything else stays in `payload` for the service to shape.
/// Both are `Option` so presence is enforced with a 400, not a parse failure.
#[derive(Debug, Deserialize)]
pub struct SaveEntryRequest {
    pub user_id: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Query params for a point lookup.
#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub user_id: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Query params for a date-history listing.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Option<String>,
}

/// Save acknowledgment: "success" or "deleted".
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
