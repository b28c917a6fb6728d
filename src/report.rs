use crate::matcher::MatchResult;
use crate::money::{format_compact, format_price, format_signed};
use crate::realized::{daily_summaries, total_profit, PeriodStats};
use crate::transaction::Transaction;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// append the per-close-date rollup
    pub daily: bool,
}

/// Console rendering of a `MatchResult`. Presentation only.
pub struct Reporter<'a> {
    result: &'a MatchResult,
    options: ReportOptions,
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_owned()
    } else {
        format!("{}s", word)
    }
}

fn leg(t: &Transaction) -> String {
    format!(
        "{} @ {} ({})",
        t.activity_date,
        format_price(t.price),
        format_signed(t.amount)
    )
}

impl<'a> Reporter<'a> {
    pub fn new(result: &'a MatchResult, options: ReportOptions) -> Self {
        Reporter { result, options }
    }

    pub fn write<W: Write>(&self, mut w: W) -> io::Result<()> {
        self.write_closed(&mut w)?;
        self.write_open(&mut w)?;
        if !self.result.discarded.is_empty() {
            let n = self.result.discarded.len();
            writeln!(
                w,
                "Discarded {} closing {} with no matching open position.",
                n,
                pluralize("transaction", n)
            )?;
            writeln!(w)?;
        }
        if self.options.daily {
            self.write_daily(&mut w)?;
        }
        w.flush()
    }

    fn write_closed<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let closed = &self.result.closed;
        if closed.is_empty() {
            writeln!(w, "No closed trades were found in the input.")?;
            return writeln!(w);
        }

        writeln!(w, "Closed trades and profitability:")?;
        writeln!(w)?;
        for trade in closed {
            writeln!(w, "{} ({})", trade.key(), trade.direction())?;
            writeln!(w, "  Opened: {}", leg(trade.open()))?;
            writeln!(w, "  Closed: {}", leg(trade.close()))?;
            writeln!(w, "  Profit: {}", format_signed(trade.profit()))?;
            writeln!(w)?;
        }
        writeln!(
            w,
            "Total profit across closed trades: {}",
            format_signed(total_profit(closed))
        )?;
        writeln!(w)
    }

    fn write_open<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let open = &self.result.open_positions;
        if open.is_empty() {
            return Ok(());
        }
        writeln!(w, "Open positions that were not matched with a closing trade:")?;
        for (key, queue) in open.iter() {
            for t in queue {
                writeln!(w, "  {} ({}) opened {}", key, t.direction(), leg(t))?;
            }
        }
        writeln!(w)
    }

    fn write_daily<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let days = daily_summaries(&self.result.closed);
        if days.is_empty() {
            return Ok(());
        }
        writeln!(w, "Daily summary:")?;
        for day in &days {
            writeln!(
                w,
                "  {}: {}, {} {}, {}% win rate",
                day.date,
                format_compact(day.profit),
                day.trades,
                pluralize("trade", day.trades),
                day.win_rate().normalize()
            )?;
        }
        let stats = PeriodStats::from(&days[..]);
        writeln!(
            w,
            "Period net: {} over {} active {} (avg {})",
            format_compact(stats.net),
            stats.active_days,
            pluralize("day", stats.active_days),
            format_compact(stats.average_daily)
        )
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::matcher::match_trades;
    use pretty_assertions::assert_eq;

    fn render(rows: &[&str], options: ReportOptions) -> String {
        let ts: Vec<Transaction> = rows.iter().map(|r| r.parse().unwrap()).collect();
        let result = match_trades(&ts);
        let mut out = Vec::new();
        Reporter::new(&result, options).write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn closed_and_open_sections() {
        let out = render(
            &[
                "1/2,BTO,1,1.00,-100,XYZ Call",
                "1/3,BTO,1,1.10,-110,XYZ Call",
                "1/9,STC,1,1.20,120,XYZ Call",
            ],
            ReportOptions::default(),
        );
        let expected = "\
Closed trades and profitability:

XYZ Call (Long)
  Opened: 1/2 @ $1.00 (-100.00)
  Closed: 1/9 @ $1.20 (+120.00)
  Profit: +20.00

Total profit across closed trades: +20.00

Open positions that were not matched with a closing trade:
  XYZ Call (Long) opened 1/3 @ $1.10 (-110.00)

";
        assert_eq!(out, expected);
    }

    #[test]
    fn no_closed_trades_and_discards() {
        let out = render(
            &["1/9,BTC,1,1.20,-120,XYZ Put", "1/10,STO,1,2.00,200,ABC Put"],
            ReportOptions::default(),
        );
        let expected = "\
No closed trades were found in the input.

Open positions that were not matched with a closing trade:
  ABC Put (Short) opened 1/10 @ $2.00 (+200.00)

Discarded 1 closing transaction with no matching open position.

";
        assert_eq!(out, expected);
    }

    #[test]
    fn daily_rollup() {
        let out = render(
            &[
                "1/2,BTO,1,1.00,-100,XYZ Call",
                "1/2,STO,1,2.00,200,ABC Put",
                "1/3,STC,1,1.50,150,XYZ Call",
                "1/3,BTC,1,2.20,-220,ABC Put",
                "1/4,BTO,1,10.00,-1000,QQQ Call",
                "1/5,STC,1,25.20,2520,QQQ Call",
            ],
            ReportOptions { daily: true },
        );
        let daily = out.split("Daily summary:\n").nth(1).unwrap();
        let expected = "  1/3: +$30, 2 trades, 50% win rate
  1/5: +$1.52K, 1 trade, 100% win rate
Period net: +$1.55K over 2 active days (avg +$775)
";
        assert_eq!(daily, expected);
    }
}
