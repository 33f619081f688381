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

use crate::types::card_state::CardState;
use crate::types::timestamp::Timestamp;

/// Select the cards that are due at `now`, most overdue first.
///
/// Cards due at the same instant keep their relative order from `cards`,
/// so passing cards in creation order gives a deterministic tie-break.
/// `limit`, if given, caps the result after ordering.
pub fn select_due<T>(cards: &[T], now: Timestamp, limit: Option<usize>) -> Vec<&T>
where
    T: AsRef<CardState>,
{
    let mut due: Vec<&T> = cards
        .iter()
        .filter(|card| state_of(*card).is_due(now))
        .collect();
    // `sort_by_key` is stable.
    due.sort_by_key(|card| state_of(*card).next_review_at);
    if let Some(limit) = limit {
        due.truncate(limit);
    }
    due
}

fn state_of<T: AsRef<CardState>>(card: &T) -> &CardState {
    card.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::Card;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn card(id: i64, due: &str) -> Card {
        let created_at = ts("2024-01-01T00:00:00.000");
        let mut state = CardState::new(created_at);
        state.next_review_at = ts(due);
        Card {
            id,
            course: "math".to_string(),
            front: format!("front {id}"),
            back: format!("back {id}"),
            source: None,
            created_at,
            state,
        }
    }

    fn ids(cards: Vec<&Card>) -> Vec<i64> {
        cards.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_orders_most_overdue_first() {
        let now = ts("2024-03-10T12:00:00.000");
        let cards = vec![
            card(1, "2024-03-09T00:00:00.000"),
            card(2, "2024-03-11T00:00:00.000"),
            card(3, "2024-03-01T00:00:00.000"),
            card(4, "2024-03-10T12:00:00.000"),
        ];
        assert_eq!(ids(select_due(&cards, now, None)), vec![3, 1, 4]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let now = ts("2024-03-10T12:00:00.000");
        let cards = vec![
            card(5, "2024-03-02T00:00:00.000"),
            card(1, "2024-03-02T00:00:00.000"),
            card(3, "2024-03-01T00:00:00.000"),
            card(2, "2024-03-02T00:00:00.000"),
        ];
        let first = ids(select_due(&cards, now, None));
        assert_eq!(first, vec![3, 5, 1, 2]);
        assert_eq!(ids(select_due(&cards, now, None)), first);
    }

    #[test]
    fn test_limit_applies_after_ordering() {
        let now = ts("2024-03-10T12:00:00.000");
        let cards = vec![
            card(1, "2024-03-09T00:00:00.000"),
            card(2, "2024-03-01T00:00:00.000"),
            card(3, "2024-03-05T00:00:00.000"),
        ];
        assert_eq!(ids(select_due(&cards, now, Some(2))), vec![2, 3]);
        assert!(select_due(&cards, now, Some(0)).is_empty());
        assert_eq!(select_due(&cards, now, Some(10)).len(), 3);
    }

    #[test]
    fn test_nothing_due() {
        let now = ts("2024-03-10T12:00:00.000");
        let cards = vec![card(1, "2024-04-01T00:00:00.000")];
        assert!(select_due(&cards, now, None).is_empty());
        let empty: Vec<Card> = Vec::new();
        assert!(select_due(&empty, now, None).is_empty());
    }

    #[test]
    fn test_bare_states() {
        let now = ts("2024-03-10T12:00:00.000");
        let states = vec![
            CardState::new(ts("2024-03-10T12:00:00.001")),
            CardState::new(ts("2024-03-10T11:00:00.000")),
        ];
        let due = select_due(&states, now, None);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].next_review_at, ts("2024-03-10T11:00:00.000"));
    }
}
