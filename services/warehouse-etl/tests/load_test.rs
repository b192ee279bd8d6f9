//! 装载集成测试
//!
//! 需要 DATABASE_URL 指向可用的 PostgreSQL：
//! `cargo test -p warehouse-etl -- --ignored`

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::PgPool;

use warehouse_adapter_postgres::ensure_schema;
use warehouse_etl::{GeneratorOptions, LoadSummary, generate, import_directory, load_warehouse};

fn small_options() -> GeneratorOptions {
    GeneratorOptions {
        customers: 5,
        products: 4,
        stores: 2,
        sales: 30,
        inventory: 6,
        start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2021, 1, 31).unwrap(),
        today: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_load_inserts_every_table(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let data = generate(&mut StdRng::seed_from_u64(1), &small_options()).unwrap();

    let summary = load_warehouse(&pool, &data).await.unwrap();

    assert_eq!(
        summary,
        LoadSummary {
            customers: 5,
            products: 4,
            stores: 2,
            times: 31,
            sales: 30,
            inventory: 6,
        }
    );
    assert_eq!(count(&pool, "fact_sales").await, 30);
    assert_eq!(count(&pool, "dim_time").await, 31);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_reload_skips_existing_keys(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let data = generate(&mut StdRng::seed_from_u64(2), &small_options()).unwrap();

    load_warehouse(&pool, &data).await.unwrap();
    let again = load_warehouse(&pool, &data).await.unwrap();

    assert_eq!(again.total(), 0);
    assert_eq!(count(&pool, "dim_customer").await, 5);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_loaded_sales_are_reportable(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let data = generate(&mut StdRng::seed_from_u64(3), &small_options()).unwrap();
    load_warehouse(&pool, &data).await.unwrap();

    let joined: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM fact_sales fs
        JOIN dim_product dp ON fs.product_id = dp.product_id
        JOIN dim_customer dc ON fs.customer_id = dc.customer_id
        JOIN dim_store ds ON fs.store_id = ds.store_id
        JOIN dim_time dt ON fs.time_id = dt.time_id
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(joined, 30);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_load_imported_csv(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("orders.csv"),
        "Order ID,Order Date,Customer ID,Customer Name,Product ID,Category,Sub-Category,Product Name,Sales,Quantity\n\
         CA-1,01/02/2021,AA-1,Ann Lee,P-1,Furniture,Chairs,Chair,10.50,1\n\
         CA-2,01/03/2021,BB-2,Bo Chan,P-1,Furniture,Chairs,Chair,21.00,2\n",
    )
    .unwrap();
    let data = import_directory(&mut StdRng::seed_from_u64(2), dir.path(), 2).unwrap();

    let summary = load_warehouse(&pool, &data).await.unwrap();
    assert_eq!(summary.sales, 2);
    assert_eq!(summary.times, 2);
    assert_eq!(summary.inventory, 0);

    let total: rust_decimal::Decimal =
        sqlx::query_scalar("SELECT SUM(total_sale_amount) FROM fact_sales")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(total, rust_decimal::Decimal::new(3150, 2));
}
