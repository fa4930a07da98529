//! Runs the cafe order store until Ctrl-C, logging the dashboard figures on a
//! fixed cadence.

use cafe_order_sim::config::SimulationConfig;
use cafe_order_sim::lifecycle::{setup_tracing, OrderSystem};
use cafe_order_sim::model::{format_idr, OrderStatus};
use std::time::Duration;
use tracing::{info, Instrument};

const REPORT_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<(), String> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = SimulationConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting cafe order simulation");

    let system = OrderSystem::new(&config).map_err(|e| e.to_string())?;
    let orders = system.order_client.clone();

    let span = tracing::info_span!("initialize");
    async {
        let count = orders.initialize().await.map_err(|e| e.to_string())?;
        info!(count, "Example orders loaded");

        // Walk the oldest new order through one step, as the kitchen would
        if let Some(order) = orders
            .list_by_status(OrderStatus::New)
            .await
            .map_err(|e| e.to_string())?
            .pop()
        {
            orders.advance_status(order.id).await.map_err(|e| e.to_string())?;
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let mut report = tokio::time::interval(REPORT_INTERVAL);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = report.tick() => {
                let stats = orders.today_stats().await.map_err(|e| e.to_string())?;
                let counts = orders.status_counts().await.map_err(|e| e.to_string())?;
                let active_tables = orders.active_tables().await.map_err(|e| e.to_string())?;
                info!(
                    orders = stats.total_orders,
                    completed = stats.completed_orders,
                    pending = stats.pending_orders,
                    revenue = %format_idr(stats.total_revenue),
                    average = %format_idr(stats.average_order_value.round() as u64),
                    new = counts.new,
                    preparing = counts.preparing,
                    ready = counts.ready,
                    active_tables,
                    "Dashboard"
                );
            }
        }
    }

    drop(orders);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
