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

use crate::sm2::Quality;

/// Points for a successful recall.
pub const SUCCESS_POINTS: u32 = 5;

/// Points for a failed recall.
pub const EFFORT_POINTS: u32 = 2;

/// What a learner earns from an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub points: u32,
    /// Whether the action refreshes the learner's last activity, and so
    /// keeps their streak alive.
    pub counts_as_activity: bool,
}

/// The reward for reviewing a card with the given quality.
pub fn reward_for(quality: Quality) -> Reward {
    if quality.is_success() {
        Reward {
            points: SUCCESS_POINTS,
            counts_as_activity: true,
        }
    } else {
        Reward {
            points: EFFORT_POINTS,
            counts_as_activity: false,
        }
    }
}
