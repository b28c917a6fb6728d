//! OptionLedger reads a brokerage transaction export and pairs each opening option
//! transaction with the closing transaction that ended it.
//!
//! - `Matcher` - keeps a FIFO queue of open transactions per description and turns
//!     closes into `ClosedTrade`s
//!
//! - `OpenPositions` - opens still waiting for a close
//! - `ClosedTrade` - an open paired with its close, captures profit/loss
//! - `Transaction` - one normalized line of the export, loaded by `CsvLoader`
//!
//! Matching is FIFO on the raw description string. Closes with nothing open are
//! discarded and codes other than BTO/STO/BTC/STC are ignored.
//!
//! Example
//! ```
//! use optionledger::matcher::match_trades;
//! use optionledger::transaction::Transaction;
//! use rust_decimal::Decimal;
//!
//! let transactions: Vec<Transaction> = [
//!     "1/2/2025,BTO,1,1.00,($100.00),XYZ 1/17/2025 Call $50.00",
//!     "1/3/2025,BTO,1,1.10,($110.00),XYZ 1/17/2025 Call $50.00",
//!     "1/9/2025,STC,1,1.20,$120.00,XYZ 1/17/2025 Call $50.00",
//! ]
//! .iter()
//! .map(|s| s.parse().unwrap())
//! .collect();
//!
//! let result = match_trades(&transactions);
//!
//! // the first buy is the one closed
//! assert_eq!(result.closed.len(), 1);
//! assert_eq!(result.closed[0].open(), &transactions[0]);
//! assert_eq!(result.closed[0].profit(), Decimal::new(20, 0));
//!
//! // the second buy is still open
//! assert_eq!(result.open_positions.len(), 1);
//! ```

/// `LoadError` and the crate `Result`
pub mod error;
/// CSV export reader producing `Transaction`s in file order
pub mod loader;
/// pairs opens with closes
pub mod matcher;
/// currency string decoding and display formatting
pub mod money;
/// `ClosedTrade`, totals and per-day rollups
pub mod realized;
/// console report
pub mod report;
/// `Transaction`, `TransCode` and `Direction`
pub mod transaction;
/// open transactions queued per description
pub mod unrealized;

pub use error::{LoadError, Result};
pub use loader::{CsvLoader, LoadOptions};
pub use matcher::{match_trades, MatchResult, Matcher};
pub use realized::ClosedTrade;
pub use report::{ReportOptions, Reporter};
pub use transaction::{Direction, TransCode, Transaction};
pub use unrealized::OpenPositions;
