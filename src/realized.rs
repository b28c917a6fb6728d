use crate::transaction::{Direction, Transaction};
use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// One opening transaction paired with the closing transaction that ended it.
///
/// Only the matcher creates these. Profit is the sum of the two signed cash
/// flows, which nets correctly for long (debit then credit) and short
/// (credit then debit) trades alike.
#[derive(Debug, PartialEq, Clone)]
pub struct ClosedTrade {
    open: Transaction,
    close: Transaction,
}

impl ClosedTrade {
    pub(crate) fn match_close(open: Transaction, close: Transaction) -> Self {
        ClosedTrade { open, close }
    }

    pub fn open(&self) -> &Transaction {
        &self.open
    }

    pub fn close(&self) -> &Transaction {
        &self.close
    }

    pub fn key(&self) -> &str {
        &self.open.description
    }

    pub fn profit(&self) -> Decimal {
        self.open.amount + self.close.amount
    }

    pub fn direction(&self) -> Direction {
        self.open.direction()
    }

    pub fn is_win(&self) -> bool {
        self.profit() > Decimal::ZERO
    }
}

impl fmt::Display for ClosedTrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) open_date: {}, open_amount:{:.2}, close_date: {}, close_amount:{:.2}, profit:{:.2}",
            self.key(),
            self.direction(),
            self.open.activity_date,
            self.open.amount,
            self.close.activity_date,
            self.close.amount,
            self.profit()
        )
    }
}

/// Total realized is the sum of profit over every closed trade in the slice
pub fn total_profit(trades: &[ClosedTrade]) -> Decimal {
    trades.iter().map(ClosedTrade::profit).sum()
}

/// Closed trades rolled up by the day they were closed.
// date, net profit, trades, winners
#[derive(Debug, PartialEq, Clone)]
pub struct DailySummary {
    pub date: String,
    pub profit: Decimal,
    pub trades: usize,
    pub winners: usize,
}

impl DailySummary {
    /// Share of the day's trades that made money, in percent.
    pub fn win_rate(&self) -> Decimal {
        if self.trades == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.winners) * Decimal::ONE_HUNDRED / Decimal::from(self.trades))
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date: {} trades:{}, profit:{:.2}, win_rate:{}%",
            self.date,
            self.trades,
            self.profit,
            self.win_rate()
        )
    }
}

/// Group closed trades by the close transaction's activity date.
///
/// Dates are compared as exported strings; days appear in the order they were
/// first closed on.
pub fn daily_summaries(trades: &[ClosedTrade]) -> Vec<DailySummary> {
    let mut days: IndexMap<&str, DailySummary> = IndexMap::new();
    for trade in trades {
        let date = trade.close().activity_date.as_str();
        let day = days.entry(date).or_insert_with(|| DailySummary {
            date: date.to_owned(),
            profit: Decimal::ZERO,
            trades: 0,
            winners: 0,
        });
        day.profit += trade.profit();
        day.trades += 1;
        if trade.is_win() {
            day.winners += 1;
        }
    }
    days.into_values().collect()
}

/// Net result over a run of active days.
#[derive(Debug, PartialEq, Clone)]
pub struct PeriodStats {
    pub net: Decimal,
    pub active_days: usize,
    pub average_daily: Decimal,
}

impl From<&[DailySummary]> for PeriodStats {
    fn from(days: &[DailySummary]) -> Self {
        let net: Decimal = days.iter().map(|d| d.profit).sum();
        let active_days = days.len();
        let average_daily = if active_days == 0 {
            Decimal::ZERO
        } else {
            net / Decimal::from(active_days)
        };
        PeriodStats {
            net,
            active_days,
            average_daily,
        }
    }
}
