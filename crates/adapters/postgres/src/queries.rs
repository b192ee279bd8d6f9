//! 报表 SQL 模板
//!
//! 参数一律绑定（`$1`），不拼接

pub const FACT_SALES: &str = r#"
    SELECT sale_id, product_id, store_id, customer_id, time_id, quantity_sold, total_sale_amount
    FROM fact_sales
    ORDER BY sale_id
"#;

pub const SALES_BY_PRODUCT: &str = r#"
    SELECT dp.product_name, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_product dp ON fs.product_id = dp.product_id
    GROUP BY dp.product_name
    ORDER BY total_sales DESC
"#;

pub const SALES_BY_CUSTOMER: &str = r#"
    SELECT dc.customer_name, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_customer dc ON fs.customer_id = dc.customer_id
    GROUP BY dc.customer_name
    ORDER BY total_sales DESC
"#;

pub const SALES_BY_YEAR: &str = r#"
    SELECT dt.year, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_time dt ON fs.time_id = dt.time_id
    GROUP BY dt.year
    ORDER BY dt.year
"#;

pub const SALES_BY_MONTH: &str = r#"
    SELECT dt.month, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_time dt ON fs.time_id = dt.time_id
    WHERE dt.year = $1
    GROUP BY dt.month
    ORDER BY dt.month
"#;

pub const SALES_BY_PRODUCT_STORE: &str = r#"
    SELECT dp.product_name, ds.store_name, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_product dp ON fs.product_id = dp.product_id
    JOIN dim_store ds ON fs.store_id = ds.store_id
    GROUP BY dp.product_name, ds.store_name
    ORDER BY total_sales DESC
"#;

pub const TOP_PRODUCTS: &str = r#"
    SELECT dp.product_name, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_product dp ON fs.product_id = dp.product_id
    GROUP BY dp.product_name
    ORDER BY total_sales DESC
    LIMIT $1
"#;

pub const SALES_BY_CATEGORY: &str = r#"
    SELECT dp.product_category AS category, SUM(fs.total_sale_amount) AS total_sales
    FROM fact_sales fs
    JOIN dim_product dp ON fs.product_id = dp.product_id
    GROUP BY dp.product_category
    ORDER BY total_sales DESC
"#;
