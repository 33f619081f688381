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

use crate::types::card_state::CardState;
use crate::types::phase::CardPhase;
use crate::types::timestamp::Timestamp;

pub type CardId = i64;

/// A flashcard together with its scheduling state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// The course the card belongs to.
    pub course: String,
    pub front: String,
    pub back: String,
    /// Material the card was written from, e.g. a lecture PDF.
    pub source: Option<String>,
    pub created_at: Timestamp,
    #[serde(flatten)]
    pub state: CardState,
}

impl Card {
    pub fn phase(&self) -> CardPhase {
        CardPhase::of(&self.state)
    }
}

impl AsRef<CardState> for Card {
    fn as_ref(&self) -> &CardState {
        &self.state
    }
}

/// The author-supplied part of a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub course: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub source: Option<String>,
}
