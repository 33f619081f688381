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

use crate::reward::Reward;

/// Minutes of focus per point.
pub const MINUTES_PER_POINT: u32 = 5;

/// The reward for finishing a focus session. Interrupted sessions earn
/// nothing and do not count as activity.
pub fn focus_reward(duration_minutes: u32, interrupted: bool) -> Reward {
    if interrupted {
        Reward {
            points: 0,
            counts_as_activity: false,
        }
    } else {
        Reward {
            points: duration_minutes / MINUTES_PER_POINT,
            counts_as_activity: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_session() {
        assert_eq!(focus_reward(25, false).points, 5);
        assert_eq!(focus_reward(29, false).points, 5);
        assert_eq!(focus_reward(4, false).points, 0);
        assert!(focus_reward(4, false).counts_as_activity);
    }

    #[test]
    fn test_interrupted_session() {
        let reward = focus_reward(50, true);
        assert_eq!(reward.points, 0);
        assert!(!reward.counts_as_activity);
    }
}
