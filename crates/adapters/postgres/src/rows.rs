//! 数据库行映射结构

use rust_decimal::Decimal;
use sqlx::FromRow;
use warehouse_ports::{
    CategorySales, CustomerSales, FactSale, MonthlySales, ProductSales, ProductStoreSales,
    YearlySales,
};

#[derive(Debug, FromRow)]
pub struct FactSaleRow {
    pub sale_id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub customer_id: i32,
    pub time_id: i32,
    pub quantity_sold: i32,
    pub total_sale_amount: Decimal,
}

impl From<FactSaleRow> for FactSale {
    fn from(row: FactSaleRow) -> Self {
        Self {
            sale_id: row.sale_id,
            product_id: row.product_id,
            store_id: row.store_id,
            customer_id: row.customer_id,
            time_id: row.time_id,
            quantity_sold: row.quantity_sold,
            total_sale_amount: row.total_sale_amount,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ProductSalesRow {
    pub product_name: String,
    pub total_sales: Decimal,
}

impl From<ProductSalesRow> for ProductSales {
    fn from(row: ProductSalesRow) -> Self {
        Self {
            product_name: row.product_name,
            total_sales: row.total_sales,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CustomerSalesRow {
    pub customer_name: String,
    pub total_sales: Decimal,
}

impl From<CustomerSalesRow> for CustomerSales {
    fn from(row: CustomerSalesRow) -> Self {
        Self {
            customer_name: row.customer_name,
            total_sales: row.total_sales,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct YearlySalesRow {
    pub year: i32,
    pub total_sales: Decimal,
}

impl From<YearlySalesRow> for YearlySales {
    fn from(row: YearlySalesRow) -> Self {
        Self {
            year: row.year,
            total_sales: row.total_sales,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MonthlySalesRow {
    pub month: i32,
    pub total_sales: Decimal,
}

impl From<MonthlySalesRow> for MonthlySales {
    fn from(row: MonthlySalesRow) -> Self {
        Self {
            month: row.month,
            total_sales: row.total_sales,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ProductStoreSalesRow {
    pub product_name: String,
    pub store_name: String,
    pub total_sales: Decimal,
}

impl From<ProductStoreSalesRow> for ProductStoreSales {
    fn from(row: ProductStoreSalesRow) -> Self {
        Self {
            product_name: row.product_name,
            store_name: row.store_name,
            total_sales: row.total_sales,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CategorySalesRow {
    pub category: String,
    pub total_sales: Decimal,
}

impl From<CategorySalesRow> for CategorySales {
    fn from(row: CategorySalesRow) -> Self {
        Self {
            category: row.category,
            total_sales: row.total_sales,
        }
    }
}
