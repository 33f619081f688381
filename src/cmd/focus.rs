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

use studyhub_core::Timestamp;

use crate::db::Database;
use crate::db::FocusSession;
use crate::error::Fallible;

pub fn record_focus(db: &Database, minutes: u32, interrupted: bool) -> Fallible<()> {
    let (reward, progress) = db.record_focus_session(minutes, interrupted, Timestamp::now())?;
    println!(
        "+{} points ({} total, {} day streak)",
        reward.points, progress.points, progress.streak_days
    );
    Ok(())
}

pub fn print_focus_sessions(db: &Database, limit: usize) -> Fallible<()> {
    let sessions = db.focus_sessions(limit)?;
    if sessions.is_empty() {
        println!("No focus sessions recorded.");
        return Ok(());
    }
    for session in &sessions {
        println!("{}", session_line(session));
    }
    Ok(())
}

fn session_line(session: &FocusSession) -> String {
    let status = if session.interrupted {
        "interrupted"
    } else {
        "completed"
    };
    format!(
        "{}\t{}\t{} min\t{}\t+{}",
        session.id, session.completed_at, session.duration_minutes, status, session.points
    )
}
