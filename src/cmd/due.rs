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

use studyhub_core::Timestamp;

use crate::cmd::list::card_line;
use crate::db::Database;
use crate::error::Fallible;

pub fn print_due(db: &Database, limit: Option<usize>) -> Fallible<()> {
    let due = db.due_cards(Timestamp::now(), limit)?;
    if due.is_empty() {
        println!("No cards due.");
        return Ok(());
    }
    for card in due.iter() {
        println!("{}", card_line(card));
    }
    Ok(())
}
