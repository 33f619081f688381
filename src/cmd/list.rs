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

use studyhub_core::Card;

use crate::db::Database;
use crate::error::Fallible;

pub fn print_cards(db: &Database, course: Option<&str>) -> Fallible<()> {
    for card in db.list_cards(course)? {
        println!("{}", card_line(&card));
    }
    Ok(())
}

/// One-line summary of a card for terminal output.
pub fn card_line(card: &Card) -> String {
    format!(
        "{:>5}  {:<8}  due {}  [{}] {}",
        card.id,
        card.phase().as_str(),
        card.state.next_review_at,
        card.course,
        card.front
    )
}
