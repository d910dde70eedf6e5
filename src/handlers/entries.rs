//! Shared request handling for the four dated-entry resources. The
//! per-resource handler modules are one-line dispatches into these.

use axum::Json;
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryQuery, HistoryQuery, SaveEntryRequest, StatusResponse};
use crate::services::{ResourceService, SaveOutcome};
use crate::store::{Fields, RecordStore};

fn require_user_id(user_id: Option<String>) -> AppResult<String> {
    user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("User ID is required".into()))
}

fn require_date(date: Option<NaiveDate>) -> AppResult<NaiveDate> {
    date.ok_or_else(|| AppError::Validation("Date is required".into()))
}

pub(super) async fn save<S: RecordStore>(
    service: &ResourceService<S>,
    body: SaveEntryRequest,
) -> AppResult<Json<StatusResponse>> {
    let user_id = require_user_id(body.user_id)?;
    let date = require_date(body.date)?;

    let outcome = service.save(&user_id, date, &body.payload).await?;
    let status = match outcome {
        SaveOutcome::Saved => "success",
        SaveOutcome::Deleted => "deleted",
    };

    Ok(Json(StatusResponse { status }))
}

pub(super) async fn get<S: RecordStore>(
    service: &ResourceService<S>,
    query: EntryQuery,
) -> AppResult<Json<Fields>> {
    let user_id = require_user_id(query.user_id)?;
    let date = require_date(query.date)?;

    let record = service.get(&user_id, date).await?;
    Ok(Json(record))
}

pub(super) async fn history<S: RecordStore>(
    service: &ResourceService<S>,
    query: HistoryQuery,
) -> AppResult<Json<Vec<NaiveDate>>> {
    let user_id = require_user_id(query.user_id)?;

    let dates = service.history(&user_id).await?;
    Ok(Json(dates))
}
