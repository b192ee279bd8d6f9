//! 仓库装载工具入口

use chrono::Local;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use warehouse_adapter_postgres::{create_pool, ensure_schema};
use warehouse_bootstrap::{init_runtime, postgres_config};
use warehouse_config::AppConfig;
use warehouse_etl::{Cli, generate, import_directory, load_warehouse};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config_dir)?;
    init_runtime(&config);

    let pool = match create_pool(&postgres_config(&config)).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Error connecting to the database");
            return Err(e.into());
        }
    };

    ensure_schema(&pool).await?;
    info!(database = %config.database.name, "Schema ready");

    if cli.schema_only {
        return Ok(());
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data = match &cli.csv_dir {
        Some(dir) => import_directory(&mut rng, dir, cli.stores)?,
        None => {
            let options = cli.generator_options(Local::now().date_naive());
            generate(&mut rng, &options)?
        }
    };
    info!(
        customers = data.customers.len(),
        products = data.products.len(),
        stores = data.stores.len(),
        days = data.times.len(),
        sales = data.sales.len(),
        inventory = data.inventory.len(),
        "Warehouse data prepared"
    );

    let summary = load_warehouse(&pool, &data).await?;
    info!(
        customers = summary.customers,
        products = summary.products,
        stores = summary.stores,
        days = summary.times,
        sales = summary.sales,
        inventory = summary.inventory,
        "Data inserted successfully"
    );

    pool.close().await;
    Ok(())
}
