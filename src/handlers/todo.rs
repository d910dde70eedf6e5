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

/// Saving an empty task list clears the day instead of storing an empty record.
pub async fn save_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<SaveEntryRequest>,
) -> AppResult<Json<StatusResponse>> {
    entries::save(&state.todos, body).await
}

pub async fn get_entry<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Fields>> {
    entries::get(&state.todos, query).await
}

pub async fn dates<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<NaiveDate>>> {
    entries::history(&state.todos, query).await
}
