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

use chrono::Days;
use serde::Deserialize;
use serde::Serialize;

use crate::types::card_state::CardState;
use crate::types::date::Date;
use crate::types::phase::CardPhase;
use crate::types::timestamp::Timestamp;

/// Summary of a collection of cards at a point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub review_cards: usize,
    pub relapsed_cards: usize,
    pub due_now: usize,
    pub total_reviews: u64,
    pub correct_reviews: u64,
    /// Fraction of reviews that were successful. `None` before any review.
    pub accuracy: Option<f64>,
    /// `None` for an empty collection.
    pub mean_easiness: Option<f64>,
}

impl CollectionStats {
    pub fn compute<T: AsRef<CardState>>(cards: &[T], now: Timestamp) -> Self {
        let mut stats = CollectionStats {
            total_cards: cards.len(),
            new_cards: 0,
            learning_cards: 0,
            review_cards: 0,
            relapsed_cards: 0,
            due_now: 0,
            total_reviews: 0,
            correct_reviews: 0,
            accuracy: None,
            mean_easiness: None,
        };
        let mut easiness_sum = 0.0;
        for card in cards {
            let state: &CardState = card.as_ref();
            match CardPhase::of(state) {
                CardPhase::New => stats.new_cards += 1,
                CardPhase::Learning => stats.learning_cards += 1,
                CardPhase::Review => stats.review_cards += 1,
                CardPhase::Relapsed => stats.relapsed_cards += 1,
            }
            if state.is_due(now) {
                stats.due_now += 1;
            }
            stats.total_reviews += u64::from(state.total_reviews);
            stats.correct_reviews += u64::from(state.correct_reviews);
            easiness_sum += state.easiness_factor;
        }
        if stats.total_reviews > 0 {
            stats.accuracy = Some(stats.correct_reviews as f64 / stats.total_reviews as f64);
        }
        if !cards.is_empty() {
            stats.mean_easiness = Some(easiness_sum / cards.len() as f64);
        }
        stats
    }
}

/// Number of cards falling due on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDay {
    pub date: Date,
    pub count: usize,
}

/// Longest forecast `due_forecast` will produce, in days.
pub const MAX_FORECAST_DAYS: u32 = 366;

/// How many cards fall due on each of the `days` days starting at `today`.
/// Overdue cards are counted on `today`. `days` is capped at
/// [`MAX_FORECAST_DAYS`], and the forecast stops at the last representable date.
pub fn due_forecast<T: AsRef<CardState>>(cards: &[T], today: Date, days: u32) -> Vec<DueDay> {
    let mut forecast: Vec<DueDay> = (0..days.min(MAX_FORECAST_DAYS))
        .map_while(|offset| {
            today
                .into_inner()
                .checked_add_days(Days::new(u64::from(offset)))
                .map(|date| DueDay {
                    date: Date::new(date),
                    count: 0,
                })
        })
        .collect();
    for card in cards {
        let state: &CardState = card.as_ref();
        let due = state.next_review_at.date();
        let offset = due.days_since(today).max(0);
        if let Some(day) = usize::try_from(offset)
            .ok()
            .and_then(|offset| forecast.get_mut(offset))
        {
            day.count += 1;
        }
    }
    forecast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm2::Quality;
    use crate::sm2::update_state;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn reviewed(qualities: &[i64], start: Timestamp) -> CardState {
        let mut state = CardState::new(start);
        for &q in qualities {
            let now = state.next_review_at;
            state = update_state(&state, Quality::new(q).unwrap(), now);
        }
        state
    }

    #[test]
    fn test_empty() {
        let cards: Vec<CardState> = Vec::new();
        let stats = CollectionStats::compute(&cards, ts("2024-01-01T00:00:00.000"));
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.accuracy, None);
        assert_eq!(stats.mean_easiness, None);
    }

    #[test]
    fn test_counts() {
        let start = ts("2024-01-01T00:00:00.000");
        let cards = vec![
            CardState::new(start),
            reviewed(&[4], start),
            reviewed(&[4, 5], start),
            reviewed(&[4, 1], start),
        ];
        let stats = CollectionStats::compute(&cards, ts("2024-01-02T12:00:00.000"));
        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.learning_cards, 1);
        assert_eq!(stats.review_cards, 1);
        assert_eq!(stats.relapsed_cards, 1);
        assert_eq!(stats.total_reviews, 5);
        assert_eq!(stats.correct_reviews, 4);
        assert_eq!(stats.accuracy, Some(0.8));
        // New card is due at creation, the learning card one day after.
        assert_eq!(stats.due_now, 2);
    }

    #[test]
    fn test_forecast() {
        let today = Date::try_from("2024-01-10".to_string()).unwrap();
        let at = |s: &str| {
            let mut state = CardState::new(ts("2024-01-01T00:00:00.000"));
            state.next_review_at = ts(s);
            state
        };
        let cards = vec![
            at("2024-01-02T00:00:00.000"),
            at("2024-01-10T18:00:00.000"),
            at("2024-01-12T08:00:00.000"),
            at("2024-02-01T08:00:00.000"),
        ];
        let forecast = due_forecast(&cards, today, 3);
        let counts: Vec<usize> = forecast.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![2, 0, 1]);
        assert_eq!(forecast[2].date.to_string(), "2024-01-12");
        assert!(due_forecast(&cards, today, 0).is_empty());
    }

    #[test]
    fn test_forecast_is_capped() {
        let today = Date::try_from("2024-01-10".to_string()).unwrap();
        let cards = vec![CardState::new(ts("2024-01-10T08:00:00.000"))];
        let forecast = due_forecast(&cards, today, u32::MAX);
        assert_eq!(forecast.len(), MAX_FORECAST_DAYS as usize);
        assert_eq!(forecast[0].count, 1);
        assert_eq!(forecast[365].date.to_string(), "2025-01-09");
    }

    #[test]
    fn test_forecast_stops_at_last_date() {
        let today = Date::new(chrono::NaiveDate::MAX);
        let cards: Vec<CardState> = Vec::new();
        let forecast = due_forecast(&cards, today, 5);
        assert_eq!(forecast.len(), 1);
    }
}
