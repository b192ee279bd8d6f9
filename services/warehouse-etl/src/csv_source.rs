//! Superstore 订单 CSV 导入
//!
//! 客户、产品、订单行的原始 id 是文本，按首次出现的顺序映射为从 1 开始的整数代理键。
//! 同一订单行（订单号 + 产品）重复出现时只保留第一行。
//! 地址、邮箱、电话、价格、描述和门店在 CSV 中没有，随机补齐。

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::generate::{
    GenerateError, STORE_IDS, check_date, check_range, customer, generate_stores, product,
    time_row,
};
use crate::model::{DimStore, DimTime, SaleRecord, WarehouseData};

/// 支持的订单日期格式
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%d-%m-%Y"];

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("no .csv files in {}", .0.display())]
    NoFiles(PathBuf),

    #[error("invalid order date {value:?} in order {order_id}")]
    InvalidDate { order_id: String, value: String },

    #[error("invalid sales amount {value:?} in order {order_id}")]
    InvalidAmount { order_id: String, value: String },

    #[error("too many distinct {0} keys for an integer id")]
    KeySpaceExhausted(&'static str),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// CSV 中的一行订单明细，其余列忽略
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Order Date")]
    pub order_date: String,
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub-Category")]
    pub subcategory: String,
    #[serde(rename = "Quantity")]
    pub quantity: i32,
    #[serde(rename = "Sales")]
    pub sales: String,
}

impl OrderLine {
    pub fn date(&self) -> Result<NaiveDate, CsvImportError> {
        let value = self.order_date.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            .filter(|date| check_date(*date).is_ok())
            .ok_or_else(|| CsvImportError::InvalidDate {
                order_id: self.order_id.clone(),
                value: self.order_date.clone(),
            })
    }

    /// 金额保留两位小数
    pub fn amount(&self) -> Result<Decimal, CsvImportError> {
        Decimal::from_str(self.sales.trim())
            .map(|amount| amount.round_dp(2))
            .map_err(|_| CsvImportError::InvalidAmount {
                order_id: self.order_id.clone(),
                value: self.sales.clone(),
            })
    }
}

/// 文本键到整数代理键的映射
#[derive(Debug)]
struct SurrogateKeys {
    table: &'static str,
    ids: HashMap<String, i32>,
}

impl SurrogateKeys {
    fn new(table: &'static str) -> Self {
        Self {
            table,
            ids: HashMap::new(),
        }
    }

    /// 返回键对应的 id，以及该键是否第一次出现
    fn assign(&mut self, key: String) -> Result<(i32, bool), CsvImportError> {
        if let Some(&id) = self.ids.get(&key) {
            return Ok((id, false));
        }
        let id = i32::try_from(self.ids.len() + 1)
            .map_err(|_| CsvImportError::KeySpaceExhausted(self.table))?;
        self.ids.insert(key, id);
        Ok((id, true))
    }
}

/// 从任意读取源解析订单明细
pub fn read_order_lines<R: Read>(reader: R) -> Result<Vec<OrderLine>, csv::Error> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

/// 读取目录下全部 `.csv` 文件（按文件名排序）
pub fn read_directory(dir: &Path) -> Result<Vec<OrderLine>, CsvImportError> {
    let io_error = |source: std::io::Error| CsvImportError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(CsvImportError::NoFiles(dir.to_path_buf()));
    }

    let mut lines = Vec::new();
    for path in files {
        let bytes = fs::read(&path).map_err(|source| CsvImportError::Io {
            path: path.clone(),
            source,
        })?;
        // 非 UTF-8 字节按替换字符处理
        let text = String::from_utf8_lossy(&bytes);
        let parsed = read_order_lines(text.as_bytes()).map_err(|source| CsvImportError::Csv {
            path: path.clone(),
            source,
        })?;
        debug!(file = %path.display(), rows = parsed.len(), "CSV file read");
        lines.extend(parsed);
    }

    Ok(lines)
}

/// 由订单明细构建星型模型数据，事实行随机分配到给定门店
pub fn build_warehouse<R: Rng + ?Sized>(
    rng: &mut R,
    lines: &[OrderLine],
    stores: Vec<DimStore>,
) -> Result<WarehouseData, CsvImportError> {
    if stores.is_empty() && !lines.is_empty() {
        return Err(GenerateError::MissingDimension {
            fact: "sale",
            dimension: "store",
        }
        .into());
    }

    let mut customer_keys = SurrogateKeys::new("customer");
    let mut product_keys = SurrogateKeys::new("product");
    let mut sale_keys = SurrogateKeys::new("sale");

    let mut customers = Vec::new();
    let mut products = Vec::new();
    let mut times: BTreeMap<i32, DimTime> = BTreeMap::new();
    let mut sales = Vec::new();

    for line in lines {
        let date = line.date()?;
        let total_sale_amount = line.amount()?;

        let (customer_id, new_customer) = customer_keys.assign(line.customer_id.clone())?;
        if new_customer {
            customers.push(customer(rng, customer_id, &line.customer_name));
        }

        let (product_id, new_product) = product_keys.assign(line.product_id.clone())?;
        if new_product {
            products.push(product(
                rng,
                product_id,
                &line.product_name,
                &line.category,
                &line.subcategory,
            ));
        }

        let time = time_row(date);
        let time_id = time.time_id;
        times.entry(time_id).or_insert(time);

        let (sale_id, new_sale) =
            sale_keys.assign(format!("{}\u{1f}{}", line.order_id, line.product_id))?;
        if new_sale {
            sales.push(SaleRecord {
                sale_id,
                product_id,
                store_id: stores[rng.gen_range(0..stores.len())].store_id,
                customer_id,
                time_id,
                quantity_sold: line.quantity,
                total_sale_amount,
            });
        }
    }

    Ok(WarehouseData {
        customers,
        products,
        stores,
        times: times.into_values().collect(),
        sales,
        inventory: Vec::new(),
    })
}

/// 导入目录中的订单 CSV，并生成 `store_count` 个门店
pub fn import_directory<R: Rng + ?Sized>(
    rng: &mut R,
    dir: &Path,
    store_count: usize,
) -> Result<WarehouseData, CsvImportError> {
    check_range("store", store_count, &STORE_IDS)?;

    let lines = read_directory(dir)?;
    let stores = generate_stores(rng, store_count);
    let data = build_warehouse(rng, &lines, stores)?;

    info!(
        dir = %dir.display(),
        lines = lines.len(),
        sales = data.sales.len(),
        "Order CSV imported"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SAMPLE: &str = "\
Row ID,Order ID,Order Date,Ship Date,Customer ID,Customer Name,Product ID,Category,Sub-Category,Product Name,Sales,Quantity
1,CA-2016-152156,11/8/2016,11/11/2016,CG-12520,Claire Gute,FUR-BO-10001798,Furniture,Bookcases,Bush Somerset Collection Bookcase,261.96,2
2,CA-2016-152156,11/8/2016,11/11/2016,CG-12520,Claire Gute,FUR-CH-10000454,Furniture,Chairs,Hon Deluxe Fabric Upholstered Stacking Chairs,731.94,3
3,CA-2016-138688,2016-06-12,2016-06-16,DV-13045,Darrin Van Huff,OFF-LA-10000240,Office Supplies,Labels,Self-Adhesive Address Labels,14.62,2
4,CA-2016-152156,11/8/2016,11/11/2016,CG-12520,Claire Gute,FUR-BO-10001798,Furniture,Bookcases,Bush Somerset Collection Bookcase,261.96,2
";

    fn stores() -> Vec<DimStore> {
        generate_stores(&mut StdRng::seed_from_u64(0), 3)
    }

    #[test]
    fn test_read_order_lines_ignores_extra_columns() {
        let lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].order_id, "CA-2016-152156");
        assert_eq!(lines[0].subcategory, "Bookcases");
        assert_eq!(lines[1].quantity, 3);
    }

    #[test]
    fn test_build_warehouse_maps_text_ids() {
        let lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let data = build_warehouse(&mut rng, &lines, stores()).unwrap();

        assert_eq!(data.customers.len(), 2);
        assert_eq!(data.customers[0].customer_id, 1);
        assert_eq!(data.customers[0].customer_name, "Claire Gute");
        assert_eq!(data.customers[1].customer_name, "Darrin Van Huff");

        assert_eq!(data.products.len(), 3);
        assert_eq!(data.products[1].product_category, "Furniture");
        assert_eq!(data.products[1].product_subcategory, "Chairs");

        // 重复的订单行被丢弃
        assert_eq!(data.sales.len(), 3);
        assert_eq!(data.sales[0].total_sale_amount, Decimal::new(26196, 2));
        assert_eq!(data.sales[0].customer_id, data.sales[1].customer_id);
        assert_ne!(data.sales[0].product_id, data.sales[1].product_id);

        let time_ids: Vec<i32> = data.times.iter().map(|t| t.time_id).collect();
        assert_eq!(time_ids, vec![20160612, 20161108]);
        assert!(data.sales.iter().all(|s| time_ids.contains(&s.time_id)));

        let store_ids: Vec<i32> = data.stores.iter().map(|s| s.store_id).collect();
        assert!(data.sales.iter().all(|s| store_ids.contains(&s.store_id)));
        assert!(data.inventory.is_empty());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let mut lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        lines[2].order_date = "June 12".to_string();

        let err = build_warehouse(&mut StdRng::seed_from_u64(1), &lines, stores()).unwrap_err();
        assert!(matches!(
            err,
            CsvImportError::InvalidDate { ref order_id, .. } if order_id == "CA-2016-138688"
        ));
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        let mut lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        lines[0].sales = "n/a".to_string();

        let err = build_warehouse(&mut StdRng::seed_from_u64(1), &lines, stores()).unwrap_err();
        assert!(matches!(err, CsvImportError::InvalidAmount { .. }));
    }

    #[test]
    fn test_amount_rounded_to_cents() {
        let mut lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        lines[0].sales = "22.368".to_string();
        assert_eq!(lines[0].amount().unwrap(), Decimal::new(2237, 2));
    }

    #[test]
    fn test_sales_need_a_store() {
        let lines = read_order_lines(SAMPLE.as_bytes()).unwrap();
        let err = build_warehouse(&mut StdRng::seed_from_u64(1), &lines, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            CsvImportError::Generate(GenerateError::MissingDimension { .. })
        ));
    }

    #[test]
    fn test_import_directory_reads_every_csv() {
        let dir = tempfile::tempdir().unwrap();
        let (header, rows) = SAMPLE.split_once('\n').unwrap();
        let mut rows = rows.lines();
        let first: Vec<&str> = rows.by_ref().take(2).collect();
        let rest: Vec<&str> = rows.collect();
        let file = |body: Vec<&str>| format!("{}\n{}\n", header, body.join("\n"));
        fs::write(dir.path().join("a.csv"), file(first)).unwrap();
        fs::write(dir.path().join("b.CSV"), file(rest)).unwrap();
        fs::write(dir.path().join("notes.txt"), "not an order file").unwrap();

        let data = import_directory(&mut StdRng::seed_from_u64(4), dir.path(), 5).unwrap();

        assert_eq!(data.stores.len(), 5);
        assert_eq!(data.customers.len(), 2);
        assert_eq!(data.sales.len(), 3);
    }

    #[test]
    fn test_import_directory_without_csv() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_directory(&mut StdRng::seed_from_u64(4), dir.path(), 5).unwrap_err();
        assert!(matches!(err, CsvImportError::NoFiles(_)));
    }

    #[test]
    fn test_import_directory_rejects_store_count() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_directory(&mut StdRng::seed_from_u64(4), dir.path(), 101).unwrap_err();
        assert!(matches!(
            err,
            CsvImportError::Generate(GenerateError::IdRangeExhausted { .. })
        ));
    }
}
