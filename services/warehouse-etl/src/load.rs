//! 批量写入仓库
//!
//! 按外键顺序写入，整批在一个事务内完成，主键冲突的行跳过

use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{debug, info};
use warehouse_adapter_postgres::map_sqlx_error;
use warehouse_errors::AppResult;

use crate::model::{
    DimCustomer, DimProduct, DimStore, DimTime, InventoryRecord, SaleRecord, WarehouseData,
};

/// 单条 INSERT 的最大行数
const BATCH_SIZE: usize = 1000;

/// 可批量写入的一行
pub trait LoadRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY: &'static str;

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

impl LoadRow for DimCustomer {
    const TABLE: &'static str = "dim_customer";
    const COLUMNS: &'static [&'static str] = &[
        "customer_id",
        "customer_name",
        "customer_address",
        "customer_email",
        "customer_phone",
    ];
    const KEY: &'static str = "customer_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.customer_id)
            .push_bind(self.customer_name.clone())
            .push_bind(self.customer_address.clone())
            .push_bind(self.customer_email.clone())
            .push_bind(self.customer_phone.clone());
    }
}

impl LoadRow for DimProduct {
    const TABLE: &'static str = "dim_product";
    const COLUMNS: &'static [&'static str] = &[
        "product_id",
        "product_name",
        "product_category",
        "product_subcategory",
        "product_price",
        "product_description",
    ];
    const KEY: &'static str = "product_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.product_id)
            .push_bind(self.product_name.clone())
            .push_bind(self.product_category.clone())
            .push_bind(self.product_subcategory.clone())
            .push_bind(self.product_price)
            .push_bind(self.product_description.clone());
    }
}

impl LoadRow for DimStore {
    const TABLE: &'static str = "dim_store";
    const COLUMNS: &'static [&'static str] = &["store_id", "store_name", "store_location"];
    const KEY: &'static str = "store_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.store_id)
            .push_bind(self.store_name.clone())
            .push_bind(self.store_location.clone());
    }
}

impl LoadRow for DimTime {
    const TABLE: &'static str = "dim_time";
    const COLUMNS: &'static [&'static str] = &[
        "time_id",
        "date",
        "year",
        "quarter",
        "month",
        "day",
        "day_of_week",
        "day_name",
        "is_weekend",
    ];
    const KEY: &'static str = "time_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.time_id)
            .push_bind(self.date)
            .push_bind(self.year)
            .push_bind(self.quarter)
            .push_bind(self.month)
            .push_bind(self.day)
            .push_bind(self.day_of_week)
            .push_bind(self.day_name.clone())
            .push_bind(self.is_weekend);
    }
}

impl LoadRow for SaleRecord {
    const TABLE: &'static str = "fact_sales";
    const COLUMNS: &'static [&'static str] = &[
        "sale_id",
        "product_id",
        "store_id",
        "customer_id",
        "time_id",
        "quantity_sold",
        "total_sale_amount",
    ];
    const KEY: &'static str = "sale_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.sale_id)
            .push_bind(self.product_id)
            .push_bind(self.store_id)
            .push_bind(self.customer_id)
            .push_bind(self.time_id)
            .push_bind(self.quantity_sold)
            .push_bind(self.total_sale_amount);
    }
}

impl LoadRow for InventoryRecord {
    const TABLE: &'static str = "fact_inventory";
    const COLUMNS: &'static [&'static str] = &[
        "inventory_id",
        "product_id",
        "store_id",
        "stock_level",
        "last_updated",
    ];
    const KEY: &'static str = "inventory_id";

    fn push_binds<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.inventory_id)
            .push_bind(self.product_id)
            .push_bind(self.store_id)
            .push_bind(self.stock_level)
            .push_bind(self.last_updated);
    }
}

/// 构造一批行的 INSERT 语句
pub fn insert_statement<'args, T: LoadRow>(rows: &[T]) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) ",
        T::TABLE,
        T::COLUMNS.join(", ")
    ));
    builder.push_values(rows, |mut row, record| record.push_binds(&mut row));
    builder.push(format!(" ON CONFLICT ({}) DO NOTHING", T::KEY));
    builder
}

/// 写入一张表，返回实际插入的行数
pub async fn insert_rows<T: LoadRow>(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[T],
) -> AppResult<u64> {
    let mut inserted = 0;
    for chunk in rows.chunks(BATCH_SIZE) {
        let result = insert_statement(chunk)
            .build()
            .execute(&mut **tx)
            .await
            .map_err(map_sqlx_error)?;
        inserted += result.rows_affected();
    }
    debug!(
        table = T::TABLE,
        generated = rows.len(),
        inserted,
        "Table loaded"
    );
    Ok(inserted)
}

/// 各表插入行数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub customers: u64,
    pub products: u64,
    pub stores: u64,
    pub times: u64,
    pub sales: u64,
    pub inventory: u64,
}

impl LoadSummary {
    pub fn total(&self) -> u64 {
        self.customers + self.products + self.stores + self.times + self.sales + self.inventory
    }
}

/// 在一个事务内写入整个数据集
pub async fn load_warehouse(pool: &PgPool, data: &WarehouseData) -> AppResult<LoadSummary> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    let summary = LoadSummary {
        customers: insert_rows(&mut tx, &data.customers).await?,
        products: insert_rows(&mut tx, &data.products).await?,
        stores: insert_rows(&mut tx, &data.stores).await?,
        times: insert_rows(&mut tx, &data.times).await?,
        sales: insert_rows(&mut tx, &data.sales).await?,
        inventory: insert_rows(&mut tx, &data.inventory).await?,
    };

    tx.commit().await.map_err(map_sqlx_error)?;

    info!(rows = summary.total(), "Warehouse load committed");
    Ok(summary)
}
