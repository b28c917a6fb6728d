use crate::realized::ClosedTrade;
use crate::transaction::Transaction;
use crate::unrealized::OpenPositions;
use tracing::{debug, info};

/// Matcher pairs closing transactions with the open transactions they close.
///
/// add_transaction ->
///     1) BTO/STO: queue under its description OR
///     2) BTC/STC: pop the oldest open with the same description and create a `ClosedTrade`
///
/// A close with nothing open under its description is discarded, and any other
/// code is ignored. Neither is an error. Input order is the only ordering used,
/// so transactions must be fed oldest first.
///
/// All queues are FIFO. Descriptions are trusted to identify one contract.
#[derive(Debug, Default)]
pub struct Matcher {
    open: OpenPositions,
    closed: Vec<ClosedTrade>,
    discarded: Vec<Transaction>,
    ignored: usize,
}

/// Everything a single pass produces.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchResult {
    /// in the order closes were encountered
    pub closed: Vec<ClosedTrade>,
    pub open_positions: OpenPositions,
    /// closes that found no open position
    pub discarded: Vec<Transaction>,
    /// transactions with a code outside BTO/STO/BTC/STC
    pub ignored: usize,
}

impl Matcher {
    pub fn new() -> Self {
        Matcher::default()
    }

    /// Feed one transaction; returns the trade it closed, if any.
    pub fn add_transaction(&mut self, t: &Transaction) -> Option<ClosedTrade> {
        if t.trans_code.is_open() {
            self.open.push(t.clone());
            None
        } else if t.trans_code.is_close() {
            match self.open.pop_oldest(t.key()) {
                Some(opening) => {
                    let trade = ClosedTrade::match_close(opening, t.clone());
                    self.closed.push(trade.clone());
                    Some(trade)
                }
                None => {
                    debug!(
                        description = %t.description,
                        date = %t.activity_date,
                        code = %t.trans_code,
                        "discarding close with no open position"
                    );
                    self.discarded.push(t.clone());
                    None
                }
            }
        } else {
            debug!(code = %t.trans_code, description = %t.description, "ignoring transaction");
            self.ignored += 1;
            None
        }
    }

    pub fn extend_transactions(&mut self, ts: &[Transaction]) -> Vec<ClosedTrade> {
        // one at a time to keep the closes in input order
        ts.iter().filter_map(|t| self.add_transaction(t)).collect()
    }

    pub fn closed(&self) -> &[ClosedTrade] {
        &self.closed
    }

    pub fn open_positions(&self) -> &OpenPositions {
        &self.open
    }

    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    pub fn finish(self) -> MatchResult {
        info!(
            closed = self.closed.len(),
            open = self.open.len(),
            discarded = self.discarded.len(),
            ignored = self.ignored,
            "matching complete"
        );
        MatchResult {
            closed: self.closed,
            open_positions: self.open,
            discarded: self.discarded,
            ignored: self.ignored,
        }
    }
}

/// Run the whole single pass over `transactions`.
pub fn match_trades<'a, I>(transactions: I) -> MatchResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut matcher = Matcher::new();
    for t in transactions {
        matcher.add_transaction(t);
    }
    matcher.finish()
}
