//! Pure aggregation routines over a snapshot of the ledger. Nothing in this
//! module mutates state; every function is re-derivable from the same inputs,
//! so results can be cached keyed on a snapshot version.
//!
//! Monetary sums accumulate at full `Decimal` precision. Two-decimal display
//! rounding belongs to the presentation boundary (CLI tables, CSV export),
//! never here.

use crate::domain::model::{Product, Seller, Snapshot, Transaction, TxKind};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameAmount {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameQuantity {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub products: usize,
    pub sellers: usize,
    pub total_dues: Decimal,
    pub todays_sales: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementTotals {
    pub total_amount: Decimal,
    pub total_due: Decimal,
}

/// A seller whose stored running balance disagrees with the balance derived
/// from its transaction-level dues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuesMismatch {
    pub seller_id: String,
    pub seller_name: String,
    pub stored: Decimal,
    pub derived: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub seller_id: Option<String>,
    pub search: Option<String>,
    pub kind: Option<TxKind>,
}

/// Groups transactions of every kind by the calendar year and month of their
/// own date and sums `amount` per bucket, in ascending (year, month) order.
/// To get a sales-only series, compose with [`filter_transactions`] first.
pub fn monthly_sales(transactions: &[Transaction]) -> Vec<MonthBucket> {
    let mut buckets: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for t in transactions {
        let key = (t.date.year(), t.date.month());
        *buckets.entry(key).or_insert(Decimal::ZERO) += t.amount;
    }
    buckets
        .into_iter()
        .map(|((year, month), total)| MonthBucket {
            year,
            month,
            label: format!("{} {}", MONTH_ABBREV[(month - 1) as usize], year),
            total,
        })
        .collect()
}

/// Ranks sellers by total transaction amount across all kinds, descending.
/// Every known seller starts at zero, so sellers without transactions still
/// compete; ties keep first-encountered order. At most `limit` entries.
pub fn top_sellers_by_revenue(
    transactions: &[Transaction],
    sellers: &[Seller],
    limit: usize,
) -> Vec<NameAmount> {
    let mut entries: Vec<NameAmount> = sellers
        .iter()
        .map(|s| NameAmount {
            name: s.name.clone(),
            amount: Decimal::ZERO,
        })
        .collect();
    let mut index: HashMap<String, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.clone(), i))
        .collect();

    for t in transactions {
        match index.get(&t.seller_name) {
            Some(&i) => entries[i].amount += t.amount,
            None => {
                index.insert(t.seller_name.clone(), entries.len());
                entries.push(NameAmount {
                    name: t.seller_name.clone(),
                    amount: t.amount,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.amount.cmp(&a.amount));
    entries.truncate(limit);
    entries
}

/// Ranks products by total quantity sold, descending. Transactions without a
/// quantity (payments) contribute zero. Ties keep first-encountered order.
pub fn top_products_by_quantity(
    transactions: &[Transaction],
    products: &[Product],
    limit: usize,
) -> Vec<NameQuantity> {
    let mut entries: Vec<NameQuantity> = products
        .iter()
        .map(|p| NameQuantity {
            name: p.name.clone(),
            quantity: 0,
        })
        .collect();
    let mut index: HashMap<String, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.name.clone(), i))
        .collect();

    for t in transactions {
        let quantity = u64::from(t.quantity.unwrap_or(0));
        match index.get(&t.product_name) {
            Some(&i) => entries[i].quantity += quantity,
            None => {
                index.insert(t.product_name.clone(), entries.len());
                entries.push(NameQuantity {
                    name: t.product_name.clone(),
                    quantity,
                });
            }
        }
    }

    entries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    entries.truncate(limit);
    entries
}

/// Stored due balance per seller, in input order. `seller_id` narrows the
/// view to a single seller.
pub fn seller_dues(sellers: &[Seller], seller_id: Option<&str>) -> Vec<NameAmount> {
    sellers
        .iter()
        .filter(|s| seller_id.is_none_or(|id| s.id == id))
        .map(|s| NameAmount {
            name: s.name.clone(),
            amount: s.dues,
        })
        .collect()
}

/// Stock on hand per product, in input order.
pub fn stock_distribution(products: &[Product]) -> Vec<NameQuantity> {
    products
        .iter()
        .map(|p| NameQuantity {
            name: p.name.clone(),
            quantity: u64::from(p.stock),
        })
        .collect()
}

/// Filters transactions by seller, free-text search, and kind; the three
/// compose with AND. The search term matches case-insensitively against
/// product name, seller name, or the ISO date string (OR across fields).
/// With no criteria set this is the identity.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    let needle = filter.search.as_deref().unwrap_or("").to_lowercase();
    transactions
        .iter()
        .filter(|t| {
            filter
                .seller_id
                .as_deref()
                .is_none_or(|id| t.seller_id == id)
        })
        .filter(|t| filter.kind.is_none_or(|kind| t.kind == kind))
        .filter(|t| {
            needle.is_empty()
                || t.product_name.to_lowercase().contains(&needle)
                || t.seller_name.to_lowercase().contains(&needle)
                || t.date.to_string().contains(&needle)
        })
        .collect()
}

/// Total transaction amount for the given calendar day.
pub fn todays_sales(transactions: &[Transaction], today: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.date == today)
        .map(|t| t.amount)
        .sum()
}

/// Summary-card figures for the dashboard.
pub fn dashboard_totals(snapshot: &Snapshot, today: NaiveDate) -> DashboardTotals {
    DashboardTotals {
        products: snapshot.products.len(),
        sellers: snapshot.sellers.len(),
        total_dues: snapshot.sellers.iter().map(|s| s.dues).sum(),
        todays_sales: todays_sales(&snapshot.transactions, today),
    }
}

/// Amount and due totals over a transaction slice, typically pre-filtered to
/// one seller for a statement view.
pub fn seller_statement(transactions: &[&Transaction]) -> StatementTotals {
    StatementTotals {
        total_amount: transactions.iter().map(|t| t.amount).sum(),
        total_due: transactions.iter().map(|t| t.due_amount).sum(),
    }
}

/// Compares each seller's stored `dues` against the sum of its
/// transaction-level due amounts. The stored balance is authoritative; this
/// is the consistency-checked secondary view over the known gap between the
/// two, reported rather than reconciled.
pub fn dues_mismatches(snapshot: &Snapshot) -> Vec<DuesMismatch> {
    let mut derived: HashMap<&str, Decimal> = HashMap::new();
    for t in &snapshot.transactions {
        *derived.entry(t.seller_id.as_str()).or_insert(Decimal::ZERO) += t.due_amount;
    }
    snapshot
        .sellers
        .iter()
        .filter_map(|s| {
            let derived = derived.get(s.id.as_str()).copied().unwrap_or(Decimal::ZERO);
            (derived != s.dues).then(|| DuesMismatch {
                seller_id: s.id.clone(),
                seller_name: s.name.clone(),
                stored: s.dues,
                derived,
            })
        })
        .collect()
}
