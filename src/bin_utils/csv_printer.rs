use std::io::Write;

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::{TIMESTAMP_FORMAT, Transaction, TransactionKind, round_cents};

#[derive(Debug, Serialize)]
pub struct StatementLine {
    pub timestamp: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance: Decimal,
}

impl From<&Transaction> for StatementLine {
    fn from(tx: &Transaction) -> Self {
        Self {
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            kind: tx.kind(),
            amount: round_cents(tx.amount()),
            balance: round_cents(tx.balance_after()),
        }
    }
}

pub fn print_statement<W>(
    output: &mut W,
    lines: impl Iterator<Item = StatementLine>,
) -> anyhow::Result<()>
where
    W: Write,
{
    // serde headers come from the first record, an empty history needs one too
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);
    if let Err(err) = writer.write_record(["timestamp", "kind", "amount", "balance"]) {
        anyhow::bail!("Failed to write to CSV: {err}")
    }
    for line in lines {
        if let Err(err) = writer.serialize(line) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
