use std::cmp::Ordering;

use crate::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Client-side ordering of the transaction list. Newest first by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Clicking the active key flips direction; another key starts descending
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Desc,
            }
        }
    }

    /// Sorted copy of `transactions`. Equal elements keep their relative order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = match self.key {
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
            };
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityId, TransactionType};
    use chrono::NaiveDate;

    fn tx(id: &str, amount: f64, day: u32) -> Transaction {
        Transaction {
            id: EntityId::from(id),
            title: format!("tx {id}"),
            amount,
            kind: TransactionType::Expense,
            category: None,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            note: None,
        }
    }

    fn ids(list: &[Transaction]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let list = vec![tx("a", 10.0, 1), tx("b", 5.0, 3), tx("c", 7.0, 2)];
        assert_eq!(ids(&SortState::default().apply(&list)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_toggle_semantics() {
        let state = SortState::default();

        let flipped = state.toggle(SortKey::Date);
        assert_eq!(flipped.direction, SortDirection::Asc);

        let by_amount = flipped.toggle(SortKey::Amount);
        assert_eq!(by_amount, SortState { key: SortKey::Amount, direction: SortDirection::Desc });
    }

    #[test]
    fn test_amount_sort_is_stable() {
        let list = vec![tx("a", 10.0, 1), tx("b", 20.0, 2), tx("c", 10.0, 3)];
        let state = SortState {
            key: SortKey::Amount,
            direction: SortDirection::Asc,
        };
        assert_eq!(ids(&state.apply(&list)), vec!["a", "c", "b"]);
    }
}
