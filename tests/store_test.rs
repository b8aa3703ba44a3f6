mod common;

use common::{date, demo_snapshot};
use rust_decimal_macros::dec;
use stock_ledger::{LedgerError, LedgerService, MemoryGateway, Snapshot, TxKind};

#[tokio::test]
async fn add_product_echoes_inputs_and_persists() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    let product = service.add_product("Webcam", dec!(3500), 40).await.unwrap();
    assert_eq!(product.id, "p5");
    assert_eq!(product.name, "Webcam");
    assert_eq!(product.price, dec!(3500));
    assert_eq!(product.stock, 40);

    let stored = gateway.stored().await.unwrap();
    assert_eq!(stored.products.len(), 5);
    // Partial save: the untouched collections survive the write.
    assert_eq!(stored.sellers.len(), 3);
    assert_eq!(stored.transactions.len(), 6);
}

#[tokio::test]
async fn add_product_rejects_bad_input_without_mutating() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    let err = service.add_product("", dec!(10), 1).await.unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));
    let err = service.add_product("Pen", dec!(-1), 1).await.unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));

    assert_eq!(service.snapshot().await.products.len(), 4);
    assert_eq!(gateway.stored().await.unwrap().products.len(), 4);
}

#[tokio::test]
async fn add_seller_starts_with_zero_dues() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway).await.unwrap();

    let seller = service
        .add_seller("Nabil Traders", Some("01611223344"))
        .await
        .unwrap();
    assert_eq!(seller.id, "s4");
    assert_eq!(seller.dues, dec!(0));
    assert_eq!(seller.phone.as_deref(), Some("01611223344"));

    let err = service.add_seller("   ", None).await.unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));
}

#[tokio::test]
async fn record_payment_adjusts_due_against_current_balance() {
    // The scenario from the ledger contract: one sale with 1000 outstanding.
    let snapshot: Snapshot = serde_json::from_str(
        r#"{
            "sellers": [{"id": "s1", "name": "Rahim Enterprises", "dues": 2500}],
            "transactions": [{
                "id": "t1",
                "type": "sale",
                "sellerId": "s1",
                "sellerName": "Rahim Enterprises",
                "productId": "p1",
                "productName": "Laptop",
                "quantity": 1,
                "amount": 1000,
                "dueAmount": 1000,
                "date": "2025-06-20"
            }]
        }"#,
    )
    .unwrap();
    let gateway = MemoryGateway::with_snapshot(snapshot);
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    let updated = service
        .record_payment("t1", dec!(600), date(2025, 7, 1))
        .await
        .unwrap();
    assert_eq!(updated.due_amount, dec!(400));

    // A second payment is limited by the current due, not the original one.
    let err = service
        .record_payment("t1", dec!(1000), date(2025, 7, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));

    let snapshot = service.snapshot().await;
    let sale = snapshot.transactions.iter().find(|t| t.id == "t1").unwrap();
    assert_eq!(sale.due_amount, dec!(400));
    assert_eq!(snapshot.sellers[0].dues, dec!(1900));
}

#[tokio::test]
async fn record_payment_updates_seller_and_appends_entry() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    service
        .record_payment("t3", dec!(500), date(2025, 7, 15))
        .await
        .unwrap();

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.sellers[0].dues, dec!(2000));

    let payment = snapshot.transactions.last().unwrap();
    assert_eq!(payment.id, "t7");
    assert_eq!(payment.kind, TxKind::Payment);
    assert_eq!(payment.seller_id, "s1");
    assert_eq!(payment.amount, dec!(500));
    assert_eq!(payment.due_amount, dec!(-500));
    assert_eq!(payment.quantity, None);

    // Both updated collections reach the gateway in one save.
    let stored = gateway.stored().await.unwrap();
    assert_eq!(stored.transactions.len(), 7);
    assert_eq!(stored.sellers[0].dues, dec!(2000));
}

#[tokio::test]
async fn record_payment_rejects_unknown_and_non_sale_targets() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway).await.unwrap();

    let err = service
        .record_payment("t99", dec!(100), date(2025, 7, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));

    // t6 is itself a payment.
    let err = service
        .record_payment("t6", dec!(100), date(2025, 7, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));
}

#[tokio::test]
async fn record_sale_moves_stock_and_seller_dues() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    let sale = service
        .record_sale("p2", "s3", 5, dec!(3000), date(2025, 7, 20))
        .await
        .unwrap();
    assert_eq!(sale.id, "t7");
    assert_eq!(sale.amount, dec!(4000));
    assert_eq!(sale.due_amount, dec!(1000));
    assert_eq!(sale.product_name, "Mouse");
    assert_eq!(sale.seller_name, "Digital Solutions");

    let snapshot = service.snapshot().await;
    let mouse = snapshot.products.iter().find(|p| p.id == "p2").unwrap();
    assert_eq!(mouse.stock, 195);
    let seller = snapshot.sellers.iter().find(|s| s.id == "s3").unwrap();
    assert_eq!(seller.dues, dec!(1000));

    let err = service
        .record_sale("p4", "s3", 31, dec!(0), date(2025, 7, 21))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::ValidationError { .. }));
}

#[tokio::test]
async fn failed_save_rolls_back_memory_state() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway.clone()).await.unwrap();

    gateway.set_fail_saves(true);
    let err = service
        .record_payment("t3", dec!(500), date(2025, 7, 15))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::IoError(_)));

    // Neither the in-memory state nor the gateway saw the mutation.
    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.transactions.len(), 6);
    assert_eq!(snapshot.sellers[0].dues, dec!(2500));
    let stored = gateway.stored().await.unwrap();
    assert_eq!(stored.transactions.len(), 6);

    // The service keeps working once saves recover.
    gateway.set_fail_saves(false);
    service
        .record_payment("t3", dec!(500), date(2025, 7, 15))
        .await
        .unwrap();
    assert_eq!(service.snapshot().await.sellers[0].dues, dec!(2000));
}

#[tokio::test]
async fn identifiers_stay_unique_for_the_session() {
    let gateway = MemoryGateway::with_snapshot(demo_snapshot());
    let service = LedgerService::open(gateway).await.unwrap();

    let a = service.add_product("Webcam", dec!(3500), 40).await.unwrap();
    let b = service.add_product("Headset", dec!(2500), 60).await.unwrap();
    assert_eq!(a.id, "p5");
    assert_eq!(b.id, "p6");

    let snapshot = service.snapshot().await;
    let mut ids: Vec<_> = snapshot.products.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), snapshot.products.len());
}
