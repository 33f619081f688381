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

use studyhub_core::NewCard;
use studyhub_core::Timestamp;

use crate::db::Database;
use crate::error::Fallible;

pub fn add_card(
    db: &Database,
    course: String,
    front: String,
    back: String,
    source: Option<String>,
) -> Fallible<()> {
    let card = NewCard {
        course,
        front,
        back,
        source,
    };
    let card = db.insert_card(&card, Timestamp::now())?;
    log::info!("Added card {} to {}", card.id, card.course);
    println!("{}", card.id);
    Ok(())
}
