//! Terminal status-board viewer.
//!
//! Fetches one snapshot from the backend, renders the four tables, and
//! exits. Mostly useful for smoke-testing a deployment without the web UI.

use std::sync::Arc;

use anyhow::bail;

use stocktrack_board::{filter, BoardEngine, TableState};
use stocktrack_client::{telemetry, HttpStockDirectory};
use stocktrack_stock::{fault_label, FaultState, StockRow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let base_url = std::env::var("STOCKTRACK_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let query = std::env::args().nth(1).unwrap_or_default();
    tracing::info!(%base_url, "loading stock status");

    let directory = Arc::new(HttpStockDirectory::new(base_url));
    let mut engine = BoardEngine::new(directory);
    engine.refresh().await;

    let state = engine.state();
    if !state.inventory.is_ready() {
        let message = state
            .banner
            .as_ref()
            .map(|banner| banner.message.clone())
            .unwrap_or_else(|| "Stok durumu alınamadı.".to_string());
        bail!(message);
    }

    print_table("Envanter", &state.inventory, &query);
    print_table("Yazıcılar", &state.printers, &query);
    print_table("Lisanslar", &state.licenses, &query);
    print_table("Sistem Odası", &state.system_room, &query);
    Ok(())
}

fn print_table(title: &str, table: &TableState, query: &str) {
    println!("== {title} ==");
    let rows = filter::filter_rows(table.rows(), query);
    if rows.is_empty() {
        println!("  (boş)");
        return;
    }
    for row in rows {
        println!(
            "  {:<40} {:>5}  {}",
            fault_label(row),
            row.net_quantity,
            fault_marker(row)
        );
    }
}

fn fault_marker(row: &StockRow) -> &'static str {
    match row.fault {
        FaultState::Open(_) => "ARIZALI",
        FaultState::Unknown => "?",
        FaultState::Clear => "",
    }
}
