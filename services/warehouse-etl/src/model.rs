//! 星型模型记录

use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct DimCustomer {
    pub customer_id: i32,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_email: String,
    pub customer_phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimProduct {
    pub product_id: i32,
    pub product_name: String,
    pub product_category: String,
    pub product_subcategory: String,
    pub product_price: Decimal,
    pub product_description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimStore {
    pub store_id: i32,
    pub store_name: String,
    pub store_location: String,
}

/// 日期维度，一天一行
#[derive(Debug, Clone, PartialEq)]
pub struct DimTime {
    /// YYYYMMDD
    pub time_id: i32,
    pub date: NaiveDate,
    pub year: i32,
    pub quarter: i32,
    pub month: i32,
    pub day: i32,
    /// 1 = 周一
    pub day_of_week: i32,
    pub day_name: String,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sale_id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub customer_id: i32,
    pub time_id: i32,
    pub quantity_sold: i32,
    pub total_sale_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub inventory_id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub stock_level: i32,
    pub last_updated: NaiveDate,
}

/// 一次生成的完整数据集
#[derive(Debug, Clone, Default)]
pub struct WarehouseData {
    pub customers: Vec<DimCustomer>,
    pub products: Vec<DimProduct>,
    pub stores: Vec<DimStore>,
    pub times: Vec<DimTime>,
    pub sales: Vec<SaleRecord>,
    pub inventory: Vec<InventoryRecord>,
}
