//! sales-report - 销售数据仓库报表服务
//!
//! 把 HTTP GET 请求翻译成星型模型上的聚合查询，结果以 JSON 返回

pub mod api;

use std::sync::Arc;

use axum::Router;
use warehouse_adapter_postgres::PostgresSalesReportRepository;
use warehouse_bootstrap::Infrastructure;

pub use api::{AppState, report_routes};

/// 用基础设施组装报表路由
pub fn build_routes(infra: &Infrastructure) -> Router {
    let repository = Arc::new(PostgresSalesReportRepository::new(infra.postgres_pool()));
    report_routes(AppState::new(repository, infra.config().reports))
}
