//! 销售报表 Repository trait 定义
//!
//! 每个方法对应一个固定的聚合查询，结果行的字段名即 JSON 键名

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use warehouse_errors::AppResult;

/// `fact_sales` 原始行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactSale {
    pub sale_id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub customer_id: i32,
    pub time_id: i32,
    pub quantity_sold: i32,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sale_amount: Decimal,
}

/// 按产品汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product_name: String,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 按客户汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSales {
    pub customer_name: String,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 按年汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySales {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 某年按月汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    #[serde(rename = "Month")]
    pub month: i32,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 按产品 x 门店汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductStoreSales {
    pub product_name: String,
    pub store_name: String,
    #[serde(serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 按产品类别汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySales {
    pub category: String,
    #[serde(rename = "totalSales", serialize_with = "crate::amount::serialize")]
    pub total_sales: Decimal,
}

/// 销售报表查询接口
#[async_trait]
pub trait SalesReportRepository: Send + Sync {
    /// 全部销售事实行
    async fn fact_sales(&self) -> AppResult<Vec<FactSale>>;

    /// 按产品汇总，金额降序
    async fn sales_by_product(&self) -> AppResult<Vec<ProductSales>>;

    /// 按客户汇总，金额降序
    async fn sales_by_customer(&self) -> AppResult<Vec<CustomerSales>>;

    /// 按年汇总，年份升序
    async fn sales_by_year(&self) -> AppResult<Vec<YearlySales>>;

    /// 指定年份按月汇总，月份升序
    async fn sales_by_month(&self, year: i32) -> AppResult<Vec<MonthlySales>>;

    /// 按产品和门店汇总，金额降序
    async fn sales_by_product_store(&self) -> AppResult<Vec<ProductStoreSales>>;

    /// 销售额前 `limit` 的产品
    async fn top_products(&self, limit: i64) -> AppResult<Vec<ProductSales>>;

    /// 按产品类别汇总，金额降序
    async fn sales_by_category(&self) -> AppResult<Vec<CategorySales>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_sales_keys() {
        let row = ProductSales {
            product_name: "Widget".to_string(),
            total_sales: Decimal::new(15000, 2),
        };
        assert_eq!(
            serde_json::to_value(vec![row]).unwrap(),
            json!([{"product_name": "Widget", "total_sales": 150}])
        );
    }

    #[test]
    fn test_time_keys_are_capitalized() {
        let year = YearlySales {
            year: 2021,
            total_sales: Decimal::new(1050, 1),
        };
        let month = MonthlySales {
            month: 3,
            total_sales: Decimal::ONE,
        };
        assert_eq!(
            serde_json::to_value(&year).unwrap(),
            json!({"Year": 2021, "total_sales": 105})
        );
        assert_eq!(
            serde_json::to_value(&month).unwrap(),
            json!({"Month": 3, "total_sales": 1})
        );
    }

    #[test]
    fn test_category_uses_camel_case_total() {
        let row = CategorySales {
            category: "tools".to_string(),
            total_sales: Decimal::new(1234, 2),
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"category": "tools", "totalSales": 12.34})
        );
    }

    #[test]
    fn test_fact_sale_has_every_column() {
        let row = FactSale {
            sale_id: 1,
            product_id: 2,
            store_id: 3,
            customer_id: 4,
            time_id: 20210314,
            quantity_sold: 5,
            total_sale_amount: Decimal::new(9999, 2),
        };
        let value = serde_json::to_value(&row).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 7);
        assert_eq!(value["total_sale_amount"], json!(99.99));
    }
}
