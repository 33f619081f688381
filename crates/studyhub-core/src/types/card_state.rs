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

use serde::Deserialize;
use serde::Serialize;

use crate::sm2::INITIAL_EASINESS;
use crate::types::timestamp::Timestamp;

/// Scheduling information for a single flashcard.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardState {
    /// How quickly the interval grows on success. Never below 1.3.
    pub easiness_factor: f64,
    /// Days until the card is next due.
    pub interval: u32,
    /// Consecutive successful reviews since the last lapse.
    pub repetitions: u32,
    /// When the card becomes eligible for review.
    pub next_review_at: Timestamp,
    /// Lifetime number of reviews.
    pub total_reviews: u32,
    /// Lifetime number of reviews with quality 3 or higher.
    pub correct_reviews: u32,
    /// When the card was last reviewed, if ever.
    pub last_reviewed_at: Option<Timestamp>,
}

impl CardState {
    /// The state of a freshly authored card, due immediately.
    pub fn new(now: Timestamp) -> Self {
        Self {
            easiness_factor: INITIAL_EASINESS,
            interval: 1,
            repetitions: 0,
            next_review_at: now,
            total_reviews: 0,
            correct_reviews: 0,
            last_reviewed_at: None,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }

    pub fn is_new(&self) -> bool {
        self.total_reviews == 0
    }
}

impl AsRef<CardState> for CardState {
    fn as_ref(&self) -> &CardState {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let now = ts("2024-01-01T12:00:00.000");
        let state = CardState::new(now);
        assert_eq!(state.easiness_factor, 2.5);
        assert_eq!(state.interval, 1);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.next_review_at, now);
        assert_eq!(state.last_reviewed_at, None);
        assert!(state.is_new());
    }

    #[test]
    fn test_new_card_is_due_at_creation() {
        let now = ts("2024-01-01T12:00:00.000");
        let state = CardState::new(now);
        assert!(state.is_due(now));
        assert!(!state.is_due(ts("2024-01-01T11:59:59.999")));
    }
}
