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

mod error;
mod handlers;
pub mod server;
mod state;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use portpicker::pick_unused_port;
    use reqwest::Client;
    use reqwest::StatusCode;
    use serde_json::Value;
    use serde_json::json;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::serve::server::ServerConfig;
    use crate::cmd::serve::server::start_server;
    use crate::error::Fallible;

    const TEST_HOST: &str = "127.0.0.1";

    async fn wait_for_server(host: &str, port: u16) -> Fallible<()> {
        loop {
            if let Ok(stream) = TcpStream::connect(format!("{host}:{port}")).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok(())
    }

    /// Start a server on a scratch database. Keep the directory alive for
    /// the duration of the test.
    async fn spawn_server() -> Fallible<(TempDir, String)> {
        let port = pick_unused_port().unwrap();
        let dir = tempdir()?;
        let config = ServerConfig {
            database: dir.path().join("studyhub.db"),
            host: TEST_HOST.to_string(),
            port,
            forecast_days: 3,
        };
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok((dir, format!("http://{TEST_HOST}:{port}")))
    }

    #[tokio::test]
    async fn test_start_server_on_unwritable_database() -> Fallible<()> {
        let config = ServerConfig {
            database: "./derpherp/does/not/exist.db".into(),
            host: TEST_HOST.to_string(),
            port: pick_unused_port().unwrap(),
            forecast_days: 3,
        };
        assert!(start_server(config).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (_dir, base) = spawn_server().await?;
        let client = Client::new();

        // Nothing is due in an empty collection.
        let response = client.get(format!("{base}/cards/due")).send().await?;
        assert!(response.status().is_success());
        let due: Value = response.json().await?;
        assert_eq!(due, json!([]));

        // Create two cards.
        for front in ["Capital of France?", "Capital of Peru?"] {
            let response = client
                .post(format!("{base}/cards"))
                .json(&json!({ "course": "geography", "front": front, "back": "?" }))
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Both are due, in creation order.
        let due: Value = client
            .get(format!("{base}/cards/due"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(due[0]["id"], 1);
        assert_eq!(due[1]["id"], 2);
        assert_eq!(due[0]["easiness_factor"], 2.5);

        // Review the first card perfectly.
        let response = client
            .post(format!("{base}/cards/1/review"))
            .json(&json!({ "quality": 5 }))
            .send()
            .await?;
        assert!(response.status().is_success());
        let outcome: Value = response.json().await?;
        assert_eq!(outcome["state"]["interval"], 1);
        assert_eq!(outcome["state"]["repetitions"], 1);
        assert_eq!(outcome["reward"]["points"], 5);

        // Only the second card is still due.
        let due: Value = client
            .get(format!("{base}/cards/due?limit=5"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(due.as_array().map(|a| a.len()), Some(1));
        assert_eq!(due[0]["id"], 2);

        // Out-of-range quality is rejected.
        let response = client
            .post(format!("{base}/cards/2/review"))
            .json(&json!({ "quality": 6 }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let card: Value = client
            .get(format!("{base}/cards/2"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(card["total_reviews"], 0);

        // Unknown card.
        let response = client
            .post(format!("{base}/cards/99/review"))
            .json(&json!({ "quality": 3 }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Progress reflects the single successful review.
        let progress: Value = client
            .get(format!("{base}/progress"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(progress["points"], 5);
        assert_eq!(progress["streak_days"], 1);
        assert_eq!(progress["current_streak"], 1);

        let stats: Value = client
            .get(format!("{base}/stats"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(stats["cards"]["total_cards"], 2);
        assert_eq!(stats["reviews_today"], 1);

        // Delete a card twice.
        let response = client.delete(format!("{base}/cards/2")).send().await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = client.delete(format!("{base}/cards/2")).send().await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_card() -> Fallible<()> {
        let (_dir, base) = spawn_server().await?;
        let response = Client::new()
            .post(format!("{base}/cards"))
            .json(&json!({ "course": "geography", "front": "", "back": "?" }))
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }

    #[tokio::test]
    async fn test_focus() -> Fallible<()> {
        let (_dir, base) = spawn_server().await?;
        let response: Value = Client::new()
            .post(format!("{base}/focus"))
            .json(&json!({ "minutes": 25 }))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(response["reward"]["points"], 5);
        assert_eq!(response["progress"]["points"], 5);

        let client = Client::new();
        let response = client
            .post(format!("{base}/focus"))
            .json(&json!({ "minutes": 40, "interrupted": true }))
            .send()
            .await?;
        assert!(response.status().is_success());

        // History is newest first and includes interrupted sessions.
        let sessions: Value = client.get(format!("{base}/focus")).send().await?.json().await?;
        assert_eq!(sessions.as_array().map(|a| a.len()), Some(2));
        assert_eq!(sessions[0]["duration_minutes"], 40);
        assert_eq!(sessions[0]["interrupted"], true);
        assert_eq!(sessions[1]["duration_minutes"], 25);

        let sessions: Value = client
            .get(format!("{base}/focus?limit=1"))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(sessions.as_array().map(|a| a.len()), Some(1));

        let stats: Value = client.get(format!("{base}/stats")).send().await?.json().await?;
        assert_eq!(stats["focus"]["sessions_today"], 1);
        assert_eq!(stats["focus"]["minutes_today"], 25);
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found() -> Fallible<()> {
        let (_dir, base) = spawn_server().await?;
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }
}
