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

//! Learner-level bookkeeping: points and the daily activity streak.

use serde::Deserialize;
use serde::Serialize;

use crate::reward::Reward;
use crate::types::date::Date;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub points: u64,
    /// Consecutive calendar days with at least one activity, as of
    /// `last_activity`.
    pub streak_days: u32,
    pub last_activity: Option<Timestamp>,
}

impl Progress {
    /// Credit a reward earned at `now`.
    pub fn apply(&self, reward: Reward, now: Timestamp) -> Progress {
        let points = self.points.saturating_add(u64::from(reward.points));
        if !reward.counts_as_activity {
            return Progress { points, ..*self };
        }
        let (streak_days, last_activity) = match self.last_activity {
            None => (1, now),
            Some(last) => match now.date().days_since(last.date()) {
                // A clock that went backwards never rewinds the last activity.
                d if d < 0 => (self.streak_days.max(1), last),
                0 => (self.streak_days.max(1), now),
                1 => (self.streak_days.saturating_add(1), now),
                _ => (1, now),
            },
        };
        Progress {
            points,
            streak_days,
            last_activity: Some(last_activity),
        }
    }

    /// The streak as seen on `today`: it lapses once a whole calendar day
    /// passes without activity.
    pub fn current_streak(&self, today: Date) -> u32 {
        match self.last_activity {
            Some(last) if today.days_since(last.date()) <= 1 => self.streak_days,
            _ => 0,
        }
    }
}
