use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product label recorded on payment transactions, which have no real product.
pub const PAYMENT_LABEL: &str = "Payment received";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub dues: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Sale,
    Payment,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxKind::Sale => write!(f, "sale"),
            TxKind::Payment => write!(f, "payment"),
        }
    }
}

/// A ledger entry. For a sale, `amount` is the gross value and `due_amount`
/// the unpaid remainder (>= 0). For a payment, `amount` is the sum paid and
/// `due_amount` its negation. Field names on the wire keep the historical
/// data-file format (camelCase, `type` discriminator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub seller_id: String,
    pub seller_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub amount: Decimal,
    pub due_amount: Decimal,
    pub date: NaiveDate,
}

/// The full in-memory dataset at a point in time. Collections missing from a
/// stored document default to empty; no validation beyond shape happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub sellers: Vec<Seller>,
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.sellers.is_empty() && self.transactions.is_empty()
    }
}

/// Partial update for the persistence gateway. Collections left as `None`
/// keep their previously persisted value; the gateway merges, not the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sellers: Option<Vec<Seller>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
}

impl SnapshotPatch {
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = Some(products);
        self
    }

    pub fn with_sellers(mut self, sellers: Vec<Seller>) -> Self {
        self.sellers = Some(sellers);
        self
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = Some(transactions);
        self
    }
}

impl From<Snapshot> for SnapshotPatch {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            products: Some(snapshot.products),
            sellers: Some(snapshot.sellers),
            transactions: Some(snapshot.transactions),
        }
    }
}
