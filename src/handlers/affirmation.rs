use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;

use crate::error::AppResult;
use crate::handlers::entries;
use crate::models::entry::{EntryQuery, HistoryQuery, SaveEntryRequest, StatusResponse};
use crate::store::{Fields, RecordStore};
use crate::AppState;

/// Saving whitespace-only text clears the day's affirmation.
pub async fn save_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<SaveEntryRequest>,
) -> AppResult<Json<StatusResponse>> {
    entries::save(&state.affirmations, body).await
}

pub async fn get_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Fields>> {
    entries::get(&state.affirmations, query).await
}

pub async fn dates<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    entries::history(&state.affirmations, query).await
}
