//! 星型模型 DDL
//!
//! 只负责"表不存在就创建"，没有版本管理

use sqlx::PgPool;
use tracing::info;
use warehouse_errors::AppResult;

use crate::error_mapper::map_sqlx_error;

/// 数据仓库建表语句
pub const WAREHOUSE_SCHEMA: &str = include_str!("../schema/warehouse.sql");

/// 星型模型中的全部表，按依赖顺序排列
pub const WAREHOUSE_TABLES: [&str; 6] = [
    "dim_customer",
    "dim_product",
    "dim_store",
    "dim_time",
    "fact_sales",
    "fact_inventory",
];

/// 确保星型模型的表存在
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::raw_sql(WAREHOUSE_SCHEMA)
        .execute(pool)
        .await
        .map_err(map_sqlx_error)?;

    info!(tables = WAREHOUSE_TABLES.len(), "Warehouse schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_creates_every_table() {
        for table in WAREHOUSE_TABLES {
            let ddl = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            assert!(WAREHOUSE_SCHEMA.contains(&ddl), "missing DDL for {}", table);
        }
    }

    #[test]
    fn test_facts_come_after_dimensions() {
        let position = |table: &str| {
            WAREHOUSE_SCHEMA
                .find(&format!("CREATE TABLE IF NOT EXISTS {} (", table))
                .unwrap()
        };
        assert!(position("dim_time") < position("fact_sales"));
        assert!(position("dim_store") < position("fact_inventory"));
    }
}
