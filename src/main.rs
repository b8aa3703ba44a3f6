use anyhow::Context;
use chrono::Local;
use clap::Parser;
use stock_ledger::config::{Cli, Command, ExportView, Settings};
use stock_ledger::core::aggregate::{self, TransactionFilter};
use stock_ledger::core::report;
use stock_ledger::utils::logger;
use stock_ledger::{JsonFileGateway, LedgerService, Result};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let settings = Settings::resolve(&cli).context("invalid configuration")?;
    tracing::debug!(data_file = %settings.data_file, "configuration resolved");

    let gateway = JsonFileGateway::new(&settings.data_file);
    let service = LedgerService::open(gateway)
        .await
        .with_context(|| format!("failed to open ledger data at {}", settings.data_file))?;

    if let Err(e) = run(&cli, &settings, &service).await {
        tracing::error!("command failed: {e}");
        eprintln!("error: {e}");
        std::process::exit(if e.is_user_error() { 2 } else { 1 });
    }
    Ok(())
}

async fn run(
    cli: &Cli,
    settings: &Settings,
    service: &LedgerService<JsonFileGateway>,
) -> Result<()> {
    match &cli.command {
        Command::Summary => {
            let snapshot = service.snapshot().await;
            let today = Local::now().date_naive();
            let totals = aggregate::dashboard_totals(&snapshot, today);
            let monthly = aggregate::monthly_sales(&snapshot.transactions);
            let top_sellers = aggregate::top_sellers_by_revenue(
                &snapshot.transactions,
                &snapshot.sellers,
                settings.top_limit,
            );
            let top_products = aggregate::top_products_by_quantity(
                &snapshot.transactions,
                &snapshot.products,
                settings.top_limit,
            );
            let stock = aggregate::stock_distribution(&snapshot.products);

            if cli.json {
                let out = serde_json::json!({
                    "totals": totals,
                    "monthly_sales": monthly,
                    "top_sellers": top_sellers,
                    "top_products": top_products,
                    "stock": stock,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Products: {}  Sellers: {}", totals.products, totals.sellers);
                println!("Total dues:    {}", report::money(totals.total_dues));
                println!("Today's sales: {}", report::money(totals.todays_sales));
                println!();
                println!("Monthly sales:");
                for bucket in &monthly {
                    println!("  {:<9} {:>14}", bucket.label, report::money(bucket.total));
                }
                println!();
                println!("Top sellers by revenue:");
                for entry in &top_sellers {
                    println!("  {:<24} {:>14}", entry.name, report::money(entry.amount));
                }
                println!();
                println!("Top products by quantity:");
                for entry in &top_products {
                    println!("  {:<24} {:>8}", entry.name, entry.quantity);
                }
                println!();
                println!("Stock on hand:");
                for entry in &stock {
                    println!("  {:<24} {:>8}", entry.name, entry.quantity);
                }
            }
        }
        Command::AddProduct { name, price, stock } => {
            let product = service.add_product(name, *price, *stock).await?;
            println!("Added product {} ({})", product.id, product.name);
        }
        Command::AddSeller { name, phone } => {
            let seller = service.add_seller(name, phone.as_deref()).await?;
            println!("Added seller {} ({})", seller.id, seller.name);
        }
        Command::RecordSale {
            product_id,
            seller_id,
            quantity,
            paid,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let sale = service
                .record_sale(product_id, seller_id, *quantity, *paid, date)
                .await?;
            println!(
                "Recorded sale {}: amount {}, due {}",
                sale.id,
                report::money(sale.amount),
                report::money(sale.due_amount)
            );
        }
        Command::RecordPayment {
            transaction_id,
            amount,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let sale = service
                .record_payment(transaction_id, *amount, date)
                .await?;
            println!(
                "Recorded payment of {} against {}; remaining due {}",
                report::money(*amount),
                sale.id,
                report::money(sale.due_amount)
            );
        }
        Command::Transactions {
            seller,
            search,
            kind,
        } => {
            let snapshot = service.snapshot().await;
            let filter = TransactionFilter {
                seller_id: seller.clone(),
                search: search.clone(),
                kind: kind.to_kind(),
            };
            let filtered = aggregate::filter_transactions(&snapshot.transactions, &filter);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else {
                println!(
                    "{:<5} {:<11} {:<8} {:<20} {:<24} {:>4} {:>12} {:>12}",
                    "id", "date", "type", "product", "seller", "qty", "amount", "due"
                );
                for t in &filtered {
                    println!(
                        "{:<5} {:<11} {:<8} {:<20} {:<24} {:>4} {:>12} {:>12}",
                        t.id,
                        t.date.to_string(),
                        t.kind.to_string(),
                        t.product_name,
                        t.seller_name,
                        t.quantity.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
                        report::money(t.amount),
                        report::money(t.due_amount)
                    );
                }
                let statement = aggregate::seller_statement(&filtered);
                println!(
                    "{} transaction(s); total {}, outstanding {}",
                    filtered.len(),
                    report::money(statement.total_amount),
                    report::money(statement.total_due)
                );
            }
        }
        Command::Export {
            view,
            seller,
            search,
            kind,
            out,
        } => {
            let snapshot = service.snapshot().await;
            let filter = TransactionFilter {
                seller_id: seller.clone(),
                search: search.clone(),
                kind: kind.to_kind(),
            };
            let filtered = aggregate::filter_transactions(&snapshot.transactions, &filter);
            let csv = match view {
                ExportView::Transactions => report::transactions_csv(&filtered)?,
                ExportView::Monthly => {
                    let owned: Vec<_> = filtered.into_iter().cloned().collect();
                    report::monthly_sales_csv(&aggregate::monthly_sales(&owned))?
                }
                ExportView::Dues => report::seller_dues_csv(&aggregate::seller_dues(
                    &snapshot.sellers,
                    seller.as_deref(),
                ))?,
            };
            match out {
                Some(path) => {
                    std::fs::write(path, &csv)?;
                    println!("Exported to {path}");
                }
                None => print!("{csv}"),
            }
        }
        Command::Check => {
            let snapshot = service.snapshot().await;
            let mismatches = aggregate::dues_mismatches(&snapshot);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&mismatches)?);
            } else if mismatches.is_empty() {
                println!("Stored dues match transaction-derived dues for all sellers.");
            } else {
                for m in &mismatches {
                    println!(
                        "{} ({}): stored {} vs derived {}",
                        m.seller_name,
                        m.seller_id,
                        report::money(m.stored),
                        report::money(m.derived)
                    );
                }
                println!("{} seller(s) with mismatched dues", mismatches.len());
            }
        }
    }
    Ok(())
}
