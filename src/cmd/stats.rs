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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;
use studyhub_core::CollectionStats;
use studyhub_core::DueDay;
use studyhub_core::Progress;
use studyhub_core::Timestamp;
use studyhub_core::due_forecast;

use crate::db::Database;
use crate::db::FocusTotals;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

/// Everything the stats command and endpoint report.
#[derive(Serialize)]
pub struct StatsReport {
    pub cards: CollectionStats,
    pub reviews_today: u32,
    pub progress: Progress,
    pub current_streak: u32,
    pub focus: FocusTotals,
    pub forecast: Vec<DueDay>,
}

impl StatsReport {
    pub fn gather(db: &Database, now: Timestamp, forecast_days: u32) -> Fallible<Self> {
        let cards = db.list_cards(None)?;
        let today = now.date();
        let progress = db.get_progress()?;
        Ok(StatsReport {
            cards: CollectionStats::compute(&cards, now),
            reviews_today: db.review_count_on(today)?,
            progress,
            current_streak: progress.current_streak(today),
            focus: db.focus_totals(today)?,
            forecast: due_forecast(&cards, today, forecast_days),
        })
    }

    fn render_text(&self) -> String {
        let cards = &self.cards;
        let mut out = String::new();
        out.push_str(&format!(
            "Cards: {} ({} new, {} learning, {} review, {} relapsed)\n",
            cards.total_cards,
            cards.new_cards,
            cards.learning_cards,
            cards.review_cards,
            cards.relapsed_cards
        ));
        out.push_str(&format!("Due now: {}\n", cards.due_now));
        out.push_str(&format!("Reviews today: {}\n", self.reviews_today));
        match cards.accuracy {
            Some(accuracy) => out.push_str(&format!(
                "Accuracy: {:.1}% of {} reviews\n",
                accuracy * 100.0,
                cards.total_reviews
            )),
            None => out.push_str("Accuracy: no reviews yet\n"),
        }
        if let Some(ef) = cards.mean_easiness {
            out.push_str(&format!("Mean easiness: {ef:.2}\n"));
        }
        out.push_str(&format!(
            "Points: {} (streak: {} days)\n",
            self.progress.points, self.current_streak
        ));
        out.push_str(&format!(
            "Focus: {} sessions, {} minutes ({} sessions, {} minutes today)\n",
            self.focus.sessions,
            self.focus.minutes,
            self.focus.sessions_today,
            self.focus.minutes_today
        ));
        if !self.forecast.is_empty() {
            out.push_str("Forecast:\n");
            for day in self.forecast.iter() {
                out.push_str(&format!("  {}  {}\n", day.date, day.count));
            }
        }
        out
    }
}

pub fn print_stats(db: &Database, format: StatsFormat, forecast_days: u32) -> Fallible<()> {
    let report = StatsReport::gather(db, Timestamp::now(), forecast_days)?;
    match format {
        StatsFormat::Text => print!("{}", report.render_text()),
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
