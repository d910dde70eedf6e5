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

/// Unlike todo/affirmation, an empty gratitude text is rejected outright.
pub async fn save_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<SaveEntryRequest>,
) -> AppResult<Json<StatusResponse>> {
    entries::save(&state.gratitude, body).await
}

pub async fn get_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Fields>> {
    entries::get(&state.gratitude, query).await
}

pub async fn history<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    entries::history(&state.gratitude, query).await
}
