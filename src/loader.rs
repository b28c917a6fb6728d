//! Brokerage CSV export. Required header columns:
//! Activity Date,Process Date,Settle Date,Instrument,Description,Trans Code,Quantity,Price,Amount
//!
//! Column order does not matter and extra columns are ignored.

use crate::error::{LoadError, Result};
use crate::money::{parse_amount, parse_price};
use crate::transaction::{TransCode, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const REQUIRED_COLUMNS: [&str; 9] = [
    "Description",
    "Instrument",
    "Activity Date",
    "Process Date",
    "Settle Date",
    "Trans Code",
    "Quantity",
    "Price",
    "Amount",
];

#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Instrument")]
    instrument: String,
    #[serde(rename = "Activity Date")]
    activity_date: String,
    #[serde(rename = "Process Date")]
    process_date: String,
    #[serde(rename = "Settle Date")]
    settle_date: String,
    #[serde(rename = "Trans Code")]
    trans_code: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Amount")]
    amount: String,
}

impl CsvRow {
    fn into_transaction(self, line: u64) -> Result<Transaction> {
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| LoadError::InvalidQuantity {
                line,
                value: self.quantity.clone(),
            })?;
        let price = parse_price(&self.price).ok_or_else(|| LoadError::InvalidMoney {
            line,
            field: "Price",
            value: self.price.clone(),
        })?;
        let amount = parse_amount(&self.amount).ok_or_else(|| LoadError::InvalidMoney {
            line,
            field: "Amount",
            value: self.amount.clone(),
        })?;
        let trans_code = TransCode::from_str(&self.trans_code).unwrap_or_else(|e| match e {});

        Ok(Transaction {
            description: self.description,
            instrument: self.instrument,
            activity_date: self.activity_date,
            process_date: self.process_date,
            settle_date: self.settle_date,
            trans_code,
            quantity,
            price,
            amount,
        })
    }
}

/// Settings for reading an export.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// trim whitespace around every field
    pub trim: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            trim: true,
        }
    }
}

/// Reads transaction rows in file order.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    options: LoadOptions,
}

impl CsvLoader {
    pub fn new(options: LoadOptions) -> Self {
        CsvLoader { options }
    }

    /// Load every row or fail on the first bad one.
    pub fn read<R: Read>(&self, r: R) -> Result<Vec<Transaction>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .trim(if self.options.trim { Trim::All } else { Trim::None })
            .from_reader(r);

        let headers = rdr.headers()?.clone();
        check_columns(&headers)?;

        let mut transactions = Vec::new();
        for rec in rdr.records() {
            let record = rec?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: CsvRow = record.deserialize(Some(&headers))?;
            transactions.push(row.into_transaction(line)?);
        }
        info!(rows = transactions.len(), "transactions loaded");
        Ok(transactions)
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Transaction>> {
        let f = File::open(path)?;
        self.read(f)
    }
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        Some(field) => Err(LoadError::MissingField {
            line: 1,
            field: *field,
        }),
        None => Ok(()),
    }
}
