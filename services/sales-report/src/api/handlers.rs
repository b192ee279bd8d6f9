//! 报表处理器
//!
//! 每个处理器对应一个查询模板，结果原样序列化为 JSON 数组

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::debug;
use warehouse_errors::{AppError, AppResult};
use warehouse_ports::{
    CategorySales, CustomerSales, FactSale, MonthlySales, ProductSales, ProductStoreSales,
    YearlySales,
};

use super::AppState;
use super::params::{TopProductsQuery, parse_year};

/// 1. 全部销售事实
pub async fn fact_sales(State(state): State<AppState>) -> AppResult<Json<Vec<FactSale>>> {
    Ok(Json(state.repository.fact_sales().await?))
}

/// 2. 按产品汇总
pub async fn sales_by_product(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductSales>>> {
    Ok(Json(state.repository.sales_by_product().await?))
}

/// 3. 按客户汇总
pub async fn sales_by_customer(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CustomerSales>>> {
    Ok(Json(state.repository.sales_by_customer().await?))
}

/// 4. 按年汇总
pub async fn sales_by_year(State(state): State<AppState>) -> AppResult<Json<Vec<YearlySales>>> {
    Ok(Json(state.repository.sales_by_year().await?))
}

/// 5. 指定年份按月汇总
pub async fn sales_by_month(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> AppResult<Json<Vec<MonthlySales>>> {
    let year = parse_year(&year)?;
    Ok(Json(state.repository.sales_by_month(year).await?))
}

/// 6. 按产品和门店汇总
pub async fn sales_by_product_store(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductStoreSales>>> {
    Ok(Json(state.repository.sales_by_product_store().await?))
}

/// 7. 销售额前 N 的产品
pub async fn top_products(
    State(state): State<AppState>,
    Query(query): Query<TopProductsQuery>,
) -> AppResult<Json<Vec<ProductSales>>> {
    let limit = query.resolve_limit(&state.reports);
    debug!(limit, "Fetching top products");
    Ok(Json(state.repository.top_products(limit).await?))
}

/// 8. 按产品类别汇总
///
/// 唯一一个把空结果映射为 404 的端点
pub async fn aggregated_sales(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategorySales>>> {
    let rows = state.repository.sales_by_category().await?;
    if rows.is_empty() {
        return Err(AppError::not_found("No data found"));
    }
    Ok(Json(rows))
}
