//! CSV rendering of aggregate views. This is a presentation boundary, so
//! monetary values get their two-decimal display rounding here.

use crate::core::aggregate::{MonthBucket, NameAmount};
use crate::domain::model::Transaction;
use crate::utils::error::Result;
use rust_decimal::Decimal;

/// Two-decimal display form of a monetary value.
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn transactions_csv(transactions: &[&Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["id", "date", "type", "product", "seller", "quantity", "amount", "due"])?;
    for t in transactions {
        writer.write_record([
            t.id.clone(),
            t.date.to_string(),
            t.kind.to_string(),
            t.product_name.clone(),
            t.seller_name.clone(),
            t.quantity.map(|q| q.to_string()).unwrap_or_default(),
            money(t.amount),
            money(t.due_amount),
        ])?;
    }
    finish(writer)
}

pub fn monthly_sales_csv(buckets: &[MonthBucket]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["month", "total"])?;
    for bucket in buckets {
        writer.write_record([bucket.label.clone(), money(bucket.total)])?;
    }
    finish(writer)
}

pub fn seller_dues_csv(dues: &[NameAmount]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["seller", "due"])?;
    for entry in dues {
        writer.write_record([entry.name.clone(), money(entry.amount)])?;
    }
    finish(writer)
}
