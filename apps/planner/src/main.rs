//! # Brewcalc Planner
//!
//! Computes the purchase order and batch cost for one flavor and prints the
//! plan as JSON on stdout. Logs go to stderr.
//!
//! ## Usage
//! ```bash
//! cargo run -p brewcalc-db --bin seed
//! BREWCALC_FLAVOR_ID=flv-lime-seltzer cargo run -p brewcalc-planner
//!
//! # Plan a 250 gal batch in 12oz cans and save it
//! BREWCALC_FLAVOR_ID=flv-lime-seltzer BREWCALC_BATCH_GALLONS=250 \
//!   BREWCALC_CAN_SIZE_ID=can-12oz BREWCALC_SAVE=1 cargo run -p brewcalc-planner
//! ```

mod config;

use anyhow::{anyhow, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brewcalc_core::calculate;
use brewcalc_db::{Database, DbConfig};

use crate::config::PlannerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = PlannerConfig::load()?;
    info!(
        db = %config.database_path,
        flavor_id = %config.flavor_id,
        owner_id = %config.owner_id,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path))
        .await
        .context("opening database")?;

    let mut input = db
        .load_snapshot(&config.flavor_id, &config.owner_id)
        .await
        .with_context(|| format!("loading snapshot for flavor {}", config.flavor_id))?;

    if let Some(gallons) = config.batch_gallons {
        let can_size = match config.can_size_id.as_deref() {
            Some(id) => Some(
                db.catalog()
                    .get_can_size(id)
                    .await?
                    .ok_or_else(|| anyhow!("unknown can size: {id}"))?,
            ),
            None => None,
        };
        input = input.with_batch_size(gallons, can_size.as_ref());
        info!(
            size_gallons = %input.batch_size.size_gallons,
            cans_per_batch = input.batch_size.cans_per_batch,
            "Batch size overridden"
        );
    }

    let plan = calculate(&input);

    let unpriced = plan.unpriced_lines().count();
    if unpriced > 0 {
        warn!(unpriced, "Some lines have no price; totals exclude them");
    }

    println!("{}", serde_json::to_string_pretty(&plan)?);

    if config.save {
        let orders = db.orders();
        let order_id = orders.save_order(&plan).await.context("saving order")?;
        let summary_id = orders
            .save_cost_summary(&plan)
            .await
            .context("saving cost summary")?;
        info!(order_id = %order_id, summary_id = %summary_id, "Plan saved");
    }

    db.close().await;
    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brewcalc=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
