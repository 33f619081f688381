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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::serve::handlers::create_card;
use crate::cmd::serve::handlers::delete_card;
use crate::cmd::serve::handlers::due_cards;
use crate::cmd::serve::handlers::get_card;
use crate::cmd::serve::handlers::get_progress;
use crate::cmd::serve::handlers::get_stats;
use crate::cmd::serve::handlers::list_cards;
use crate::cmd::serve::handlers::list_focus_sessions;
use crate::cmd::serve::handlers::record_focus;
use crate::cmd::serve::handlers::review_card;
use crate::cmd::serve::state::ServerState;
use crate::db::Database;
use crate::error::Fallible;

pub struct ServerConfig {
    pub database: PathBuf,
    pub host: String,
    pub port: u16,
    pub forecast_days: u32,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let db = Database::new(&config.database)?;
    let state = ServerState {
        forecast_days: config.forecast_days,
        db: Arc::new(Mutex::new(db)),
    };
    let app = Router::new();
    let app = app.route("/cards", get(list_cards).post(create_card));
    let app = app.route("/cards/due", get(due_cards));
    let app = app.route("/cards/{id}", get(get_card).delete(delete_card));
    let app = app.route("/cards/{id}/review", post(review_card));
    let app = app.route("/focus", get(list_focus_sessions).post(record_focus));
    let app = app.route("/progress", get(get_progress));
    let app = app.route("/stats", get(get_stats));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn not_found_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
