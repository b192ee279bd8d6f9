//! 报表 API 路由

pub mod handlers;
pub mod params;

use std::sync::Arc;

use axum::{Router, routing::get};
use warehouse_config::ReportConfig;
use warehouse_ports::SalesReportRepository;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn SalesReportRepository>,
    pub reports: ReportConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn SalesReportRepository>, reports: ReportConfig) -> Self {
        Self {
            repository,
            reports,
        }
    }
}

pub fn report_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/fact_sales", get(handlers::fact_sales))
        .route("/api/sales_by_product", get(handlers::sales_by_product))
        .route("/api/sales_by_customer", get(handlers::sales_by_customer))
        .route("/api/sales_by_year", get(handlers::sales_by_year))
        .route("/api/sales_by_month/{year}", get(handlers::sales_by_month))
        .route(
            "/api/sales_by_product_store",
            get(handlers::sales_by_product_store),
        )
        .route("/api/top_products", get(handlers::top_products))
        .route("/api/aggregated_sales", get(handlers::aggregated_sales))
        .with_state(state)
}
