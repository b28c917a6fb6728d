use crate::error::LoadError;
use crate::money::{parse_amount, parse_price};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Ledger code of a transaction line.
///
/// Only the four option codes take part in matching; anything else the broker
/// emits (dividends, transfers, expirations) is carried as `Other`.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum TransCode {
    Bto,
    Sto,
    Btc,
    Stc,
    Other(String),
}

impl FromStr for TransCode {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "BTO" => TransCode::Bto,
            "STO" => TransCode::Sto,
            "BTC" => TransCode::Btc,
            "STC" => TransCode::Stc,
            other => TransCode::Other(other.to_owned()),
        })
    }
}

impl TransCode {
    pub fn is_open(&self) -> bool {
        matches!(self, TransCode::Bto | TransCode::Sto)
    }

    pub fn is_close(&self) -> bool {
        matches!(self, TransCode::Btc | TransCode::Stc)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransCode::Bto => "BTO",
            TransCode::Sto => "STO",
            TransCode::Btc => "BTC",
            TransCode::Stc => "STC",
            TransCode::Other(s) => s,
        }
    }
}

impl fmt::Display for TransCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => f.write_str("Long"),
            Direction::Short => f.write_str("Short"),
        }
    }
}

/// One normalized line of the brokerage export.
///
/// `description` is the grouping key for matching. Dates are kept exactly as
/// exported. `amount` carries the broker's sign: debits negative, credits positive.
#[derive(Debug, PartialEq, Clone)]
pub struct Transaction {
    pub description: String,
    pub instrument: String,
    pub activity_date: String,
    pub process_date: String,
    pub settle_date: String,
    pub trans_code: TransCode,
    pub quantity: i64,
    pub price: Decimal,
    pub amount: Decimal,
}

impl Transaction {
    /// Direction of the position this transaction would open.
    /// Long for `BTO`, Short for everything else.
    pub fn direction(&self) -> Direction {
        if self.trans_code == TransCode::Bto {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    pub fn key(&self) -> &str {
        &self.description
    }
}

/// Compact fixture form:
/// `activity_date,code,quantity,price,amount,description`
///
/// The description is everything after the fifth comma. The instrument is its
/// first word and the process/settle dates repeat the activity date.
impl FromStr for Transaction {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field: Vec<&str> = s.splitn(6, ',').collect();
        if field.len() != 6 {
            return Err(LoadError::InvalidRecord(format!(
                "expected 6 comma separated fields in '{}'",
                s
            )));
        }
        let description = field[5].trim().to_owned();
        let instrument = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_owned();
        // no source line here, so failures name the field instead
        let invalid = |name: &str, value: &str| {
            LoadError::InvalidRecord(format!("{} '{}' in '{}'", name, value, s))
        };
        let quantity = field[2]
            .trim()
            .parse()
            .map_err(|_| invalid("quantity", field[2]))?;
        let price = parse_price(field[3]).ok_or_else(|| invalid("price", field[3]))?;
        let amount = parse_amount(field[4]).ok_or_else(|| invalid("amount", field[4]))?;
        let date = field[0].trim().to_owned();

        Ok(Transaction {
            description,
            instrument,
            activity_date: date.clone(),
            process_date: date.clone(),
            settle_date: date,
            trans_code: TransCode::from_str(field[1]).unwrap_or_else(|e| match e {}),
            quantity,
            price,
            amount,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} x{} @ {:.2} amount:{:.2}",
            self.activity_date, self.trans_code, self.description, self.quantity, self.price, self.amount
        )
    }
}
