use crate::domain::model::{
    Product, Seller, Snapshot, SnapshotPatch, Transaction, TxKind, PAYMENT_LABEL,
};
use crate::domain::ports::{LoadOutcome, SnapshotGateway};
use crate::utils::error::{LedgerError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_amount, validate_positive_amount,
    validate_positive_quantity,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

fn max_id_suffix<'a>(prefix: char, ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|rest| rest.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

/// In-memory entity store. All mutation goes through the operations below;
/// each one validates fully before touching any collection, so an error
/// leaves the store exactly as it was.
///
/// Identifiers are issued from per-collection monotonic counters seeded from
/// the highest numeric suffix present at load. Unlike deriving ids from
/// collection length, the counters never hand out a suffix twice within a
/// session.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    products: Vec<Product>,
    sellers: Vec<Seller>,
    transactions: Vec<Transaction>,
    product_seq: u64,
    seller_seq: u64,
    transaction_seq: u64,
}

impl Ledger {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut ledger = Self::default();
        ledger.load(snapshot);
        ledger
    }

    /// Replaces the current collections verbatim and reseeds id counters.
    pub fn load(&mut self, snapshot: Snapshot) {
        self.product_seq = max_id_suffix('p', snapshot.products.iter().map(|p| p.id.as_str()));
        self.seller_seq = max_id_suffix('s', snapshot.sellers.iter().map(|s| s.id.as_str()));
        self.transaction_seq =
            max_id_suffix('t', snapshot.transactions.iter().map(|t| t.id.as_str()));
        self.products = snapshot.products;
        self.sellers = snapshot.sellers;
        self.transactions = snapshot.transactions;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Owned, consistent copy of the current state for aggregation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            products: self.products.clone(),
            sellers: self.sellers.clone(),
            transactions: self.transactions.clone(),
        }
    }

    pub fn add_product(&mut self, name: &str, price: Decimal, stock: u32) -> Result<Product> {
        validate_non_empty_string("name", name)?;
        validate_non_negative_amount("price", price)?;

        self.product_seq += 1;
        let product = Product {
            id: format!("p{}", self.product_seq),
            name: name.trim().to_string(),
            price,
            stock,
        };
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn add_seller(&mut self, name: &str, phone: Option<&str>) -> Result<Seller> {
        validate_non_empty_string("name", name)?;

        self.seller_seq += 1;
        let seller = Seller {
            id: format!("s{}", self.seller_seq),
            name: name.trim().to_string(),
            phone: phone.map(|p| p.to_string()),
            dues: Decimal::ZERO,
        };
        self.sellers.push(seller.clone());
        Ok(seller)
    }

    /// Records a sale of `quantity` units against a product and seller. The
    /// unpaid remainder of the gross value becomes the transaction's due and
    /// is added to the seller's running balance.
    pub fn record_sale(
        &mut self,
        product_id: &str,
        seller_id: &str,
        quantity: u32,
        paid: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let product_idx = self
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| LedgerError::not_found("product", product_id))?;
        let seller_idx = self
            .sellers
            .iter()
            .position(|s| s.id == seller_id)
            .ok_or_else(|| LedgerError::not_found("seller", seller_id))?;

        validate_positive_quantity("quantity", quantity)?;
        validate_non_negative_amount("paid", paid)?;

        let product = &self.products[product_idx];
        if quantity > product.stock {
            return Err(LedgerError::validation(
                "quantity",
                quantity,
                format!(
                    "insufficient stock: {} available, {} requested",
                    product.stock, quantity
                ),
            ));
        }

        let gross = product.price * Decimal::from(quantity);
        if paid > gross {
            return Err(LedgerError::validation(
                "paid",
                paid,
                format!("exceeds gross sale value of {}", gross),
            ));
        }
        let due = gross - paid;

        self.transaction_seq += 1;
        let transaction = Transaction {
            id: format!("t{}", self.transaction_seq),
            kind: TxKind::Sale,
            seller_id: seller_id.to_string(),
            seller_name: self.sellers[seller_idx].name.clone(),
            product_id: Some(product_id.to_string()),
            product_name: self.products[product_idx].name.clone(),
            quantity: Some(quantity),
            amount: gross,
            due_amount: due,
            date,
        };

        self.products[product_idx].stock -= quantity;
        self.sellers[seller_idx].dues += due;
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Applies a payment against an outstanding sale transaction. The sale's
    /// due and the seller's running balance both decrease by `amount` in the
    /// same operation, and a payment entry is appended to the ledger. The
    /// limit is the sale's *current* due, so repeated payments can never
    /// drive it below zero. Returns the updated sale transaction.
    pub fn record_payment(
        &mut self,
        transaction_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let tx_idx = self
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| LedgerError::not_found("transaction", transaction_id))?;

        if self.transactions[tx_idx].kind != TxKind::Sale {
            return Err(LedgerError::validation(
                "transaction",
                transaction_id,
                "payments can only be applied to sale transactions",
            ));
        }

        validate_positive_amount("amount", amount)?;
        let due = self.transactions[tx_idx].due_amount;
        if amount > due {
            return Err(LedgerError::validation(
                "amount",
                amount,
                format!("exceeds outstanding due of {}", due),
            ));
        }

        let seller_id = self.transactions[tx_idx].seller_id.clone();
        let seller_idx = self
            .sellers
            .iter()
            .position(|s| s.id == seller_id)
            .ok_or_else(|| LedgerError::not_found("seller", seller_id.clone()))?;

        self.transactions[tx_idx].due_amount -= amount;
        self.sellers[seller_idx].dues -= amount;

        self.transaction_seq += 1;
        let payment = Transaction {
            id: format!("t{}", self.transaction_seq),
            kind: TxKind::Payment,
            seller_id,
            seller_name: self.sellers[seller_idx].name.clone(),
            product_id: None,
            product_name: PAYMENT_LABEL.to_string(),
            quantity: None,
            amount,
            due_amount: -amount,
            date,
        };
        self.transactions.push(payment);

        Ok(self.transactions[tx_idx].clone())
    }
}

/// Persistence-coupled wrapper around [`Ledger`]. Every mutating operation
/// runs inside a single critical section that covers both the in-memory
/// update and the gateway save; a failed save rolls the state back, so memory
/// and disk never diverge silently.
pub struct LedgerService<G: SnapshotGateway> {
    gateway: G,
    ledger: Mutex<Ledger>,
}

impl<G: SnapshotGateway> LedgerService<G> {
    pub async fn open(gateway: G) -> Result<Self> {
        let ledger = match gateway.load().await? {
            LoadOutcome::Data(snapshot) => {
                tracing::debug!(
                    products = snapshot.products.len(),
                    sellers = snapshot.sellers.len(),
                    transactions = snapshot.transactions.len(),
                    "dataset loaded"
                );
                Ledger::from_snapshot(snapshot)
            }
            LoadOutcome::Missing => {
                tracing::info!("no dataset found, starting with empty collections");
                Ledger::default()
            }
        };
        Ok(Self {
            gateway,
            ledger: Mutex::new(ledger),
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.ledger.lock().await.snapshot()
    }

    pub async fn add_product(&self, name: &str, price: Decimal, stock: u32) -> Result<Product> {
        let mut ledger = self.ledger.lock().await;
        let previous = ledger.clone();
        let product = ledger.add_product(name, price, stock)?;
        let patch = SnapshotPatch::default().with_products(ledger.products().to_vec());
        self.commit(&mut ledger, previous, &patch).await?;
        tracing::info!(id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub async fn add_seller(&self, name: &str, phone: Option<&str>) -> Result<Seller> {
        let mut ledger = self.ledger.lock().await;
        let previous = ledger.clone();
        let seller = ledger.add_seller(name, phone)?;
        let patch = SnapshotPatch::default().with_sellers(ledger.sellers().to_vec());
        self.commit(&mut ledger, previous, &patch).await?;
        tracing::info!(id = %seller.id, name = %seller.name, "seller added");
        Ok(seller)
    }

    pub async fn record_sale(
        &self,
        product_id: &str,
        seller_id: &str,
        quantity: u32,
        paid: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let mut ledger = self.ledger.lock().await;
        let previous = ledger.clone();
        let sale = ledger.record_sale(product_id, seller_id, quantity, paid, date)?;
        let patch = SnapshotPatch::default()
            .with_products(ledger.products().to_vec())
            .with_sellers(ledger.sellers().to_vec())
            .with_transactions(ledger.transactions().to_vec());
        self.commit(&mut ledger, previous, &patch).await?;
        tracing::info!(id = %sale.id, amount = %sale.amount, due = %sale.due_amount, "sale recorded");
        Ok(sale)
    }

    pub async fn record_payment(
        &self,
        transaction_id: &str,
        amount: Decimal,
        date: NaiveDate,
    ) -> Result<Transaction> {
        let mut ledger = self.ledger.lock().await;
        let previous = ledger.clone();
        let sale = ledger.record_payment(transaction_id, amount, date)?;
        let patch = SnapshotPatch::default()
            .with_sellers(ledger.sellers().to_vec())
            .with_transactions(ledger.transactions().to_vec());
        self.commit(&mut ledger, previous, &patch).await?;
        tracing::info!(
            transaction = transaction_id,
            amount = %amount,
            remaining_due = %sale.due_amount,
            "payment recorded"
        );
        Ok(sale)
    }

    async fn commit(
        &self,
        ledger: &mut Ledger,
        previous: Ledger,
        patch: &SnapshotPatch,
    ) -> Result<()> {
        if let Err(e) = self.gateway.save(patch).await {
            tracing::error!("save failed, rolling back in-memory state: {e}");
            *ledger = previous;
            return Err(e);
        }
        Ok(())
    }
}
