//! 销售报表服务入口

use sales_report::build_routes;
use warehouse_bootstrap::run_http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    run_http(&config_dir, build_routes).await
}
