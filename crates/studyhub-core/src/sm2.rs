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

//! The SM-2 update rule.
//!
//! A review is rated with a quality between 0 (total blackout) and 5
//! (perfect recall). Ratings of 3 and above count as a successful recall
//! and move the card up the interval ladder (1 day, 6 days, then the
//! previous interval times the easiness factor). Ratings below 3 send the
//! card back to the bottom of the ladder.
//!
//! Intervals past the second step are rounded half-up:
//! `round(5 * 2.5) = 13`, `round(4 * 1.3) = 5`.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_state::CardState;
use crate::types::timestamp::Timestamp;

/// The easiness factor of a new card.
pub const INITIAL_EASINESS: f64 = 2.5;

/// The easiness factor never drops below this.
pub const MIN_EASINESS: f64 = 1.3;

/// Lowest quality that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// Highest valid quality.
pub const MAX_QUALITY: u8 = 5;

/// Interval after the first successful review.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful review.
const SECOND_INTERVAL: u32 = 6;

/// A quality rating in `0..=5`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i64) -> Result<Self, InvalidQuality> {
        match u8::try_from(value) {
            Ok(q) if q <= MAX_QUALITY => Ok(Self(q)),
            _ => Err(InvalidQuality { value }),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl From<Quality> for i64 {
    fn from(q: Quality) -> i64 {
        i64::from(q.0)
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A quality rating outside `0..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidQuality {
    pub value: i64,
}

impl Display for InvalidQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid quality {}: must be between 0 and {MAX_QUALITY}",
            self.value
        )
    }
}

impl Error for InvalidQuality {}

/// The easiness factor after a review of the given quality, clamped to
/// [`MIN_EASINESS`].
pub fn new_easiness(ef: f64, q: Quality) -> f64 {
    let miss = f64::from(MAX_QUALITY - q.value());
    let ef = ef + (0.1 - miss * (0.08 + miss * 0.02));
    f64::max(MIN_EASINESS, ef)
}

/// The interval after a successful review, given the repetition count and
/// easiness factor before the review.
pub fn success_interval(repetitions: u32, interval: u32, ef: f64) -> u32 {
    match repetitions {
        0 => FIRST_INTERVAL,
        1 => SECOND_INTERVAL,
        // `as` saturates at u32::MAX.
        _ => ((f64::from(interval) * ef).round() as u32).max(1),
    }
}

/// Apply one review to a card's state.
pub fn update_state(state: &CardState, quality: Quality, now: Timestamp) -> CardState {
    let (interval, repetitions, correct_reviews) = if quality.is_success() {
        (
            success_interval(state.repetitions, state.interval, state.easiness_factor),
            state.repetitions.saturating_add(1),
            state.correct_reviews.saturating_add(1),
        )
    } else {
        (FIRST_INTERVAL, 0, state.correct_reviews)
    };
    CardState {
        easiness_factor: new_easiness(state.easiness_factor, quality),
        interval,
        repetitions,
        next_review_at: now.plus_days(interval),
        total_reviews: state.total_reviews.saturating_add(1),
        correct_reviews,
        last_reviewed_at: Some(now),
    }
}
