//! PostgreSQL 销售报表仓储实现

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use sqlx::PgPool;
use tracing::{debug, error};
use warehouse_errors::AppResult;
use warehouse_ports::{
    CategorySales, CustomerSales, FactSale, MonthlySales, ProductSales, ProductStoreSales,
    SalesReportRepository, YearlySales,
};

use crate::error_mapper::map_sqlx_error;
use crate::queries;
use crate::rows::{
    CategorySalesRow, CustomerSalesRow, FactSaleRow, MonthlySalesRow, ProductSalesRow,
    ProductStoreSalesRow, YearlySalesRow,
};

/// 记录报表查询
pub fn record_report_query(report: &str, duration_ms: f64, success: bool) {
    let labels = [
        ("report", report.to_string()),
        ("success", success.to_string()),
    ];

    counter!("warehouse_report_queries_total", &labels).increment(1);
    histogram!("warehouse_report_query_duration_ms", &labels).record(duration_ms);
}

/// 执行查询并记录耗时、结果
async fn observe<R, T, F>(report: &'static str, query: F) -> AppResult<Vec<T>>
where
    F: Future<Output = Result<Vec<R>, sqlx::Error>>,
    R: Into<T>,
{
    let start = Instant::now();
    let result = query.await;
    record_report_query(
        report,
        start.elapsed().as_secs_f64() * 1000.0,
        result.is_ok(),
    );

    match result {
        Ok(rows) => {
            debug!(report, rows = rows.len(), "Report query completed");
            Ok(rows.into_iter().map(Into::into).collect())
        }
        Err(e) => {
            error!(report, error = %e, "Error fetching report");
            Err(map_sqlx_error(e))
        }
    }
}

pub struct PostgresSalesReportRepository {
    pool: PgPool,
}

impl PostgresSalesReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesReportRepository for PostgresSalesReportRepository {
    async fn fact_sales(&self) -> AppResult<Vec<FactSale>> {
        observe(
            "fact_sales",
            sqlx::query_as::<_, FactSaleRow>(queries::FACT_SALES).fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_product(&self) -> AppResult<Vec<ProductSales>> {
        observe(
            "sales_by_product",
            sqlx::query_as::<_, ProductSalesRow>(queries::SALES_BY_PRODUCT).fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_customer(&self) -> AppResult<Vec<CustomerSales>> {
        observe(
            "sales_by_customer",
            sqlx::query_as::<_, CustomerSalesRow>(queries::SALES_BY_CUSTOMER)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_year(&self) -> AppResult<Vec<YearlySales>> {
        observe(
            "sales_by_year",
            sqlx::query_as::<_, YearlySalesRow>(queries::SALES_BY_YEAR).fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_month(&self, year: i32) -> AppResult<Vec<MonthlySales>> {
        observe(
            "sales_by_month",
            sqlx::query_as::<_, MonthlySalesRow>(queries::SALES_BY_MONTH)
                .bind(year)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_product_store(&self) -> AppResult<Vec<ProductStoreSales>> {
        observe(
            "sales_by_product_store",
            sqlx::query_as::<_, ProductStoreSalesRow>(queries::SALES_BY_PRODUCT_STORE)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn top_products(&self, limit: i64) -> AppResult<Vec<ProductSales>> {
        observe(
            "top_products",
            sqlx::query_as::<_, ProductSalesRow>(queries::TOP_PRODUCTS)
                .bind(limit)
                .fetch_all(&self.pool),
        )
        .await
    }

    async fn sales_by_category(&self) -> AppResult<Vec<CategorySales>> {
        observe(
            "aggregated_sales",
            sqlx::query_as::<_, CategorySalesRow>(queries::SALES_BY_CATEGORY)
                .fetch_all(&self.pool),
        )
        .await
    }
}
