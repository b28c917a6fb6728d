use crate::transaction::Transaction;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::fmt;

/// Open transactions waiting for a close, one FIFO queue per grouping key.
///
/// Keys keep the order in which they were first opened so two runs over the
/// same input list positions identically.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OpenPositions {
    queues: IndexMap<String, VecDeque<Transaction>>,
}

impl OpenPositions {
    pub fn push(&mut self, t: Transaction) {
        self.queues
            .entry(t.description.clone())
            .or_default()
            .push_back(t);
    }

    /// remove and return the oldest open for `key`
    pub fn pop_oldest(&mut self, key: &str) -> Option<Transaction> {
        self.queues.get_mut(key).and_then(VecDeque::pop_front)
    }

    pub fn queue(&self, key: &str) -> Option<&VecDeque<Transaction>> {
        self.queues.get(key).filter(|q| !q.is_empty())
    }

    /// Non-empty groups only, in first-opened key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VecDeque<Transaction>)> {
        self.queues
            .iter()
            .filter(|(_, q)| !q.is_empty())
            .map(|(k, q)| (k.as_str(), q))
    }

    /// total number of unmatched opens across all keys
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn key_count(&self) -> usize {
        self.iter().count()
    }

    /// Net cash already committed to positions that are still open.
    pub fn open_amount(&self) -> Decimal {
        self.queues.values().flatten().map(|t| t.amount).sum()
    }
}

impl fmt::Display for OpenPositions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Open positions; keys:{}, transactions:{}, amount:{:.2}",
            self.key_count(),
            self.len(),
            self.open_amount()
        )
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rust_decimal_macros::dec;

    fn trans(s: &str) -> Transaction {
        s.parse().unwrap()
    }

    #[test]
    fn queues_are_fifo_per_key() {
        let mut open = OpenPositions::default();
        open.push(trans("1/2,BTO,1,1.00,-100,XYZ Call"));
        open.push(trans("1/3,BTO,1,1.10,-110,XYZ Call"));
        open.push(trans("1/3,STO,1,2.00,200,ABC Put"));

        assert_eq!(open.len(), 3);
        assert_eq!(open.key_count(), 2);
        assert_eq!(open.open_amount(), dec!(-10));

        let first = open.pop_oldest("XYZ Call").unwrap();
        assert_eq!(first.activity_date, "1/2");
        assert_eq!(open.queue("XYZ Call").unwrap().len(), 1);
        assert_eq!(open.pop_oldest("missing"), None);
    }

    #[test]
    fn drained_keys_are_not_listed() {
        let mut open = OpenPositions::default();
        open.push(trans("1/2,BTO,1,1.00,-100,XYZ Call"));
        open.push(trans("1/3,STO,1,2.00,200,ABC Put"));
        open.pop_oldest("XYZ Call");

        let keys: Vec<&str> = open.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ABC Put"]);
        assert!(open.queue("XYZ Call").is_none());
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn empty_positions_summary() {
        let open = OpenPositions::default();
        assert!(open.is_empty());
        assert_eq!(
            open.to_string(),
            "Open positions; keys:0, transactions:0, amount:0.00"
        );
    }
}
