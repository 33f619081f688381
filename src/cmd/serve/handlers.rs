// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use studyhub_core::Card;
use studyhub_core::CardId;
use studyhub_core::NewCard;
use studyhub_core::Progress;
use studyhub_core::ReviewOutcome;
use studyhub_core::Reward;
use studyhub_core::Timestamp;

use crate::cmd::serve::error::ApiError;
use crate::cmd::serve::state::ServerState;
use crate::cmd::stats::StatsReport;
use crate::db::FocusSession;
use crate::db::validate_new_card;

/// Number of focus sessions listed when the client gives no limit.
const DEFAULT_FOCUS_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct ListQuery {
    course: Option<String>,
}

#[derive(Deserialize)]
pub struct DueQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct FocusQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct ReviewRequest {
    quality: i64,
}

#[derive(Deserialize)]
pub struct FocusRequest {
    minutes: u32,
    #[serde(default)]
    interrupted: bool,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    #[serde(flatten)]
    progress: Progress,
    current_streak: u32,
}

#[derive(Serialize)]
pub struct FocusResponse {
    reward: Reward,
    progress: Progress,
}

pub async fn list_cards(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = state.db()?.list_cards(query.course.as_deref())?;
    Ok(Json(cards))
}

pub async fn due_cards(
    State(state): State<ServerState>,
    Query(query): Query<DueQuery>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let cards = state.db()?.due_cards(Timestamp::now(), query.limit)?;
    Ok(Json(cards))
}

pub async fn get_card(
    State(state): State<ServerState>,
    Path(id): Path<CardId>,
) -> Result<Json<Card>, ApiError> {
    match state.db()?.get_card(id)? {
        Some(card) => Ok(Json(card)),
        None => Err(ApiError::not_found(format!("card {id} not found."))),
    }
}

pub async fn create_card(
    State(state): State<ServerState>,
    Json(card): Json<NewCard>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    validate_new_card(&card)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    let card = state.db()?.insert_card(&card, Timestamp::now())?;
    log::debug!("Created card {}", card.id);
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn review_card(
    State(state): State<ServerState>,
    Path(id): Path<CardId>,
    Json(review): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    let outcome = state
        .db()?
        .review_card(id, review.quality, Timestamp::now())?;
    Ok(Json(outcome))
}

pub async fn delete_card(
    State(state): State<ServerState>,
    Path(id): Path<CardId>,
) -> Result<StatusCode, ApiError> {
    if state.db()?.delete_card(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("card {id} not found.")))
    }
}

pub async fn record_focus(
    State(state): State<ServerState>,
    Json(focus): Json<FocusRequest>,
) -> Result<Json<FocusResponse>, ApiError> {
    let (reward, progress) =
        state
            .db()?
            .record_focus_session(focus.minutes, focus.interrupted, Timestamp::now())?;
    Ok(Json(FocusResponse { reward, progress }))
}

pub async fn list_focus_sessions(
    State(state): State<ServerState>,
    Query(query): Query<FocusQuery>,
) -> Result<Json<Vec<FocusSession>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FOCUS_LIMIT);
    let sessions = state.db()?.focus_sessions(limit)?;
    Ok(Json(sessions))
}

pub async fn get_progress(
    State(state): State<ServerState>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let progress = state.db()?.get_progress()?;
    Ok(Json(ProgressResponse {
        progress,
        current_streak: progress.current_streak(Timestamp::now().date()),
    }))
}

pub async fn get_stats(State(state): State<ServerState>) -> Result<Json<StatsReport>, ApiError> {
    let db = state.db()?;
    let report = StatsReport::gather(&db, Timestamp::now(), state.forecast_days)?;
    Ok(Json(report))
}
