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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_state::CardState;

/// Where a card sits on the SM-2 ladder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CardPhase {
    /// Never reviewed.
    New,
    /// One consecutive success.
    Learning,
    /// Two or more consecutive successes.
    Review,
    /// Lapsed after having been reviewed at least once.
    Relapsed,
}

impl CardPhase {
    pub fn of(state: &CardState) -> Self {
        match state.repetitions {
            0 if state.total_reviews == 0 => CardPhase::New,
            0 => CardPhase::Relapsed,
            1 => CardPhase::Learning,
            _ => CardPhase::Review,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CardPhase::New => "new",
            CardPhase::Learning => "learning",
            CardPhase::Review => "review",
            CardPhase::Relapsed => "relapsed",
        }
    }
}

impl Display for CardPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
