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

//! studyhub-core: the scheduling core of the studyhub flashcard system.
//!
//! Everything here is a pure function of its inputs:
//! - the SM-2 update rule for a single card
//! - due-card selection and ordering
//! - review and focus rewards, and the learner's points and streak
//! - collection statistics

pub mod due;
pub mod error;
pub mod focus;
pub mod progress;
pub mod review;
pub mod reward;
pub mod sm2;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use due::select_due;
pub use error::ErrorReport;
pub use focus::focus_reward;
pub use progress::Progress;
pub use review::{ReviewOutcome, submit_review};
pub use reward::{Reward, reward_for};
pub use sm2::{InvalidQuality, Quality};
pub use stats::{CollectionStats, DueDay, MAX_FORECAST_DAYS, due_forecast};
pub use types::card::{Card, CardId, NewCard};
pub use types::card_state::CardState;
pub use types::date::Date;
pub use types::phase::CardPhase;
pub use types::timestamp::Timestamp;
