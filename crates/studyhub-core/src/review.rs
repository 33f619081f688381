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

use crate::reward::Reward;
use crate::reward::reward_for;
use crate::sm2::InvalidQuality;
use crate::sm2::Quality;
use crate::sm2::update_state;
use crate::types::card_state::CardState;
use crate::types::timestamp::Timestamp;

/// The result of reviewing a card. The caller persists both halves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub state: CardState,
    pub reward: Reward,
}

/// Review a card. Fails, leaving nothing changed, if `quality` is not in
/// `0..=5`.
pub fn submit_review(
    state: &CardState,
    quality: i64,
    now: Timestamp,
) -> Result<ReviewOutcome, InvalidQuality> {
    let quality = Quality::new(quality)?;
    Ok(ReviewOutcome {
        state: update_state(state, quality, now),
        reward: reward_for(quality),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feq(a: f64, b: f64) -> bool {
        f64::abs(a - b) < 1e-9
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn state(ef: f64, interval: u32, repetitions: u32) -> CardState {
        let last = ts("2024-05-01T09:00:00.000");
        CardState {
            easiness_factor: ef,
            interval,
            repetitions,
            next_review_at: last.plus_days(interval),
            total_reviews: repetitions + 2,
            correct_reviews: repetitions,
            last_reviewed_at: Some(last),
        }
    }

    #[test]
    fn test_new_card_perfect_recall() -> Result<(), InvalidQuality> {
        let now = ts("2024-05-01T09:00:00.000");
        let outcome = submit_review(&CardState::new(now), 5, now)?;
        assert_eq!(outcome.state.interval, 1);
        assert_eq!(outcome.state.repetitions, 1);
        assert!(feq(outcome.state.easiness_factor, 2.6));
        assert_eq!(outcome.state.total_reviews, 1);
        assert_eq!(outcome.state.correct_reviews, 1);
        assert_eq!(outcome.state.next_review_at, ts("2024-05-02T09:00:00.000"));
        assert_eq!(outcome.reward.points, 5);
        assert!(outcome.reward.counts_as_activity);
        Ok(())
    }

    #[test]
    fn test_second_success_quality_four() -> Result<(), InvalidQuality> {
        let now = ts("2024-05-07T09:00:00.000");
        let outcome = submit_review(&state(2.6, 6, 1), 4, now)?;
        assert_eq!(outcome.state.interval, 6);
        assert_eq!(outcome.state.repetitions, 2);
        assert!(feq(outcome.state.easiness_factor, 2.6));
        Ok(())
    }

    #[test]
    fn test_lapse() -> Result<(), InvalidQuality> {
        let now = ts("2024-05-11T09:00:00.000");
        let before = state(2.0, 10, 3);
        let outcome = submit_review(&before, 2, now)?;
        assert_eq!(outcome.state.interval, 1);
        assert_eq!(outcome.state.repetitions, 0);
        // (5 - 2) = 3: 0.1 - 3 * (0.08 + 3 * 0.02) = -0.32
        assert!(feq(outcome.state.easiness_factor, 1.68));
        assert_eq!(outcome.state.correct_reviews, before.correct_reviews);
        assert_eq!(outcome.state.next_review_at, ts("2024-05-12T09:00:00.000"));
        assert_eq!(outcome.reward.points, 2);
        assert!(!outcome.reward.counts_as_activity);
        Ok(())
    }

    #[test]
    fn test_blackout_at_floor() -> Result<(), InvalidQuality> {
        let now = ts("2024-05-21T09:00:00.000");
        let outcome = submit_review(&state(1.3, 20, 5), 0, now)?;
        assert_eq!(outcome.state.easiness_factor, 1.3);
        assert_eq!(outcome.state.interval, 1);
        assert_eq!(outcome.state.repetitions, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_quality_changes_nothing() {
        let now = ts("2024-05-21T09:00:00.000");
        let before = state(2.2, 12, 3);
        let snapshot = before;
        assert_eq!(
            submit_review(&before, 6, now),
            Err(InvalidQuality { value: 6 })
        );
        assert_eq!(
            submit_review(&before, -1, now),
            Err(InvalidQuality { value: -1 })
        );
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_relapse_restarts_ladder() -> Result<(), InvalidQuality> {
        let mut now = ts("2024-05-01T09:00:00.000");
        let mut card = CardState::new(now);
        let mut intervals = Vec::new();
        for quality in [5, 5, 5, 1, 4, 4] {
            card = submit_review(&card, quality, now)?.state;
            intervals.push(card.interval);
            now = card.next_review_at;
        }
        // The third interval uses the EF from before that review: round(6 * 2.7).
        assert_eq!(intervals, vec![1, 6, 16, 1, 1, 6]);
        assert_eq!(card.total_reviews, 6);
        assert_eq!(card.correct_reviews, 5);
        Ok(())
    }
}
