use chrono::NaiveDate;
use rust_decimal_macros::dec;
use stock_ledger::domain::model::PAYMENT_LABEL;
use stock_ledger::{Product, Seller, Snapshot, Transaction, TxKind};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn product(id: &str, name: &str, price: rust_decimal::Decimal, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        stock,
    }
}

fn seller(id: &str, name: &str, dues: rust_decimal::Decimal, phone: &str) -> Seller {
    Seller {
        id: id.to_string(),
        name: name.to_string(),
        phone: Some(phone.to_string()),
        dues,
    }
}

fn sale(
    id: &str,
    product: (&str, &str),
    seller: (&str, &str),
    amount: rust_decimal::Decimal,
    quantity: u32,
    date: NaiveDate,
    due: rust_decimal::Decimal,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TxKind::Sale,
        seller_id: seller.0.to_string(),
        seller_name: seller.1.to_string(),
        product_id: Some(product.0.to_string()),
        product_name: product.1.to_string(),
        quantity: Some(quantity),
        amount,
        due_amount: due,
        date,
    }
}

/// The well-known demo dataset: four products, three sellers, five sales and
/// one payment across May-July 2025. Seller balances intentionally disagree
/// with transaction-level dues for s1 and s2.
pub fn demo_snapshot() -> Snapshot {
    Snapshot {
        products: vec![
            product("p1", "Laptop", dec!(80000), 50),
            product("p2", "Mouse", dec!(800), 200),
            product("p3", "Keyboard", dec!(1500), 150),
            product("p4", "Monitor", dec!(15000), 30),
        ],
        sellers: vec![
            seller("s1", "Rahim Enterprises", dec!(2500), "01711223344"),
            seller("s2", "Karim Traders", dec!(750), "01811223344"),
            seller("s3", "Digital Solutions", dec!(0), "01911223344"),
        ],
        transactions: vec![
            sale(
                "t1",
                ("p1", "Laptop"),
                ("s1", "Rahim Enterprises"),
                dec!(160000),
                2,
                date(2025, 5, 10),
                dec!(5000),
            ),
            sale(
                "t2",
                ("p2", "Mouse"),
                ("s2", "Karim Traders"),
                dec!(8000),
                10,
                date(2025, 6, 5),
                dec!(0),
            ),
            sale(
                "t3",
                ("p1", "Laptop"),
                ("s1", "Rahim Enterprises"),
                dec!(80000),
                1,
                date(2025, 6, 20),
                dec!(1000),
            ),
            sale(
                "t4",
                ("p3", "Keyboard"),
                ("s3", "Digital Solutions"),
                dec!(3000),
                2,
                date(2025, 7, 12),
                dec!(0),
            ),
            sale(
                "t5",
                ("p4", "Monitor"),
                ("s2", "Karim Traders"),
                dec!(30000),
                2,
                date(2025, 7, 12),
                dec!(1500),
            ),
            Transaction {
                id: "t6".to_string(),
                kind: TxKind::Payment,
                seller_id: "s1".to_string(),
                seller_name: "Rahim Enterprises".to_string(),
                product_id: None,
                product_name: PAYMENT_LABEL.to_string(),
                quantity: None,
                amount: dec!(2500),
                due_amount: dec!(-2500),
                date: date(2025, 7, 12),
            },
        ],
    }
}
