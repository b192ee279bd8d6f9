//! 合成数据生成
//!
//! 维度 id 在固定区间内随机且不重复，事实行随机引用维度 id

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::{SliceRandom, index};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{
    DimCustomer, DimProduct, DimStore, DimTime, InventoryRecord, SaleRecord, WarehouseData,
};
use crate::words;

pub const CUSTOMER_IDS: RangeInclusive<i32> = 1..=10_000;
pub const PRODUCT_IDS: RangeInclusive<i32> = 1..=1_000;
pub const STORE_IDS: RangeInclusive<i32> = 1..=100;
pub const SALE_IDS: RangeInclusive<i32> = 1..=10_000;
pub const INVENTORY_IDS: RangeInclusive<i32> = 1..=10_000;

/// 金额、价格区间（分）
const AMOUNT_CENTS: RangeInclusive<i64> = 1_000..=50_000;

/// 年份超出四位数时 YYYYMMDD 编码不再成立
pub const DATE_YEARS: RangeInclusive<i32> = 1..=9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("cannot draw {requested} unique {table} ids from a range of {available}")]
    IdRangeExhausted {
        table: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("date range is empty: {start} > {end}")]
    EmptyDateRange { start: NaiveDate, end: NaiveDate },

    #[error("date {0} is outside years 1..=9999")]
    DateOutOfRange(NaiveDate),

    #[error("{fact} rows need at least one {dimension} row")]
    MissingDimension {
        fact: &'static str,
        dimension: &'static str,
    },
}

/// 生成参数
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub customers: usize,
    pub products: usize,
    pub stores: usize,
    pub sales: usize,
    pub inventory: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 库存日期落在该日期所在年份的 1 月 1 日到该日期之间
    pub today: NaiveDate,
}

impl GeneratorOptions {
    pub fn validate(&self) -> Result<(), GenerateError> {
        check_range("customer", self.customers, &CUSTOMER_IDS)?;
        check_range("product", self.products, &PRODUCT_IDS)?;
        check_range("store", self.stores, &STORE_IDS)?;
        check_range("sale", self.sales, &SALE_IDS)?;
        check_range("inventory", self.inventory, &INVENTORY_IDS)?;

        check_date(self.start_date)?;
        check_date(self.end_date)?;

        if self.start_date > self.end_date {
            return Err(GenerateError::EmptyDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let sale_dimensions = [
            ("customer", self.customers),
            ("product", self.products),
            ("store", self.stores),
        ];
        let inventory_dimensions = [("product", self.products), ("store", self.stores)];

        for (fact, wanted, dimensions) in [
            ("sale", self.sales, &sale_dimensions[..]),
            ("inventory", self.inventory, &inventory_dimensions[..]),
        ] {
            if wanted == 0 {
                continue;
            }
            if let Some(&(dimension, _)) = dimensions.iter().find(|(_, count)| *count == 0) {
                return Err(GenerateError::MissingDimension { fact, dimension });
            }
        }

        Ok(())
    }
}

pub fn check_date(date: NaiveDate) -> Result<(), GenerateError> {
    if DATE_YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(GenerateError::DateOutOfRange(date))
    }
}

fn range_len(range: &RangeInclusive<i32>) -> usize {
    (range.end() - range.start() + 1) as usize
}

pub(crate) fn check_range(
    table: &'static str,
    requested: usize,
    range: &RangeInclusive<i32>,
) -> Result<(), GenerateError> {
    let available = range_len(range);
    if requested > available {
        return Err(GenerateError::IdRangeExhausted {
            table,
            requested,
            available,
        });
    }
    Ok(())
}

/// 从区间中抽取不重复的 id
fn unique_ids<R: Rng + ?Sized>(
    rng: &mut R,
    range: &RangeInclusive<i32>,
    amount: usize,
) -> Vec<i32> {
    let length = range_len(range);
    index::sample(rng, length, amount.min(length))
        .into_iter()
        .map(|offset| range.start() + offset as i32)
        .collect()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, words: &'a [&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn amount<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    Decimal::new(rng.gen_range(AMOUNT_CENTS), 2)
}

/// 用给定姓名补齐一个客户的联系信息
pub fn customer<R: Rng + ?Sized>(rng: &mut R, customer_id: i32, name: &str) -> DimCustomer {
    let handle = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
        .to_lowercase();

    DimCustomer {
        customer_id,
        customer_name: name.to_string(),
        customer_address: format!(
            "{} {} Street, {}",
            rng.gen_range(1..=9999),
            pick(rng, words::STREETS),
            pick(rng, words::CITIES)
        ),
        customer_email: format!("{}{}@example.com", handle, customer_id),
        customer_phone: format!(
            "{:03}-{:03}-{:04}",
            rng.gen_range(200..=999),
            rng.gen_range(0..=999),
            rng.gen_range(0..=9999)
        ),
    }
}

pub fn generate_customers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DimCustomer> {
    unique_ids(rng, &CUSTOMER_IDS, count)
        .into_iter()
        .map(|customer_id| {
            let name = format!(
                "{} {}",
                pick(rng, words::FIRST_NAMES),
                pick(rng, words::LAST_NAMES)
            );
            customer(rng, customer_id, &name)
        })
        .collect()
}

/// 用给定名称和类别补齐一个产品的价格与描述
pub fn product<R: Rng + ?Sized>(
    rng: &mut R,
    product_id: i32,
    name: &str,
    category: &str,
    subcategory: &str,
) -> DimProduct {
    DimProduct {
        product_id,
        product_name: name.to_string(),
        product_category: category.to_string(),
        product_subcategory: subcategory.to_string(),
        product_price: amount(rng),
        product_description: format!(
            "A {} {} from the {} range.",
            pick(rng, words::ADJECTIVES),
            name,
            category
        ),
    }
}

pub fn generate_products<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DimProduct> {
    unique_ids(rng, &PRODUCT_IDS, count)
        .into_iter()
        .map(|product_id| {
            let name = pick(rng, words::PRODUCT_NAMES);
            let category = pick(rng, words::CATEGORIES);
            let subcategory = pick(rng, words::SUBCATEGORIES);
            product(rng, product_id, name, category, subcategory)
        })
        .collect()
}

pub fn generate_stores<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DimStore> {
    unique_ids(rng, &STORE_IDS, count)
        .into_iter()
        .map(|store_id| DimStore {
            store_id,
            store_name: format!(
                "{} {}",
                pick(rng, words::LAST_NAMES),
                pick(rng, words::COMPANY_SUFFIXES)
            ),
            store_location: pick(rng, words::CITIES).to_string(),
        })
        .collect()
}

/// 编码为 YYYYMMDD
pub fn time_id(date: NaiveDate) -> i32 {
    date.year() * 10_000 + date.month() as i32 * 100 + date.day() as i32
}

pub fn time_row(date: NaiveDate) -> DimTime {
    let weekday = date.weekday();
    DimTime {
        time_id: time_id(date),
        date,
        year: date.year(),
        quarter: (date.month0() / 3 + 1) as i32,
        month: date.month() as i32,
        day: date.day() as i32,
        day_of_week: weekday.number_from_monday() as i32,
        day_name: date.format("%A").to_string(),
        is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
    }
}

/// 区间内每天一行（含两端）
pub fn generate_time(start: NaiveDate, end: NaiveDate) -> Vec<DimTime> {
    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        rows.push(time_row(date));
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    rows
}

pub fn generate_sales<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    customers: &[DimCustomer],
    products: &[DimProduct],
    stores: &[DimStore],
    times: &[DimTime],
) -> Vec<SaleRecord> {
    if customers.is_empty() || products.is_empty() || stores.is_empty() || times.is_empty() {
        return Vec::new();
    }

    unique_ids(rng, &SALE_IDS, count)
        .into_iter()
        .map(|sale_id| SaleRecord {
            sale_id,
            product_id: products[rng.gen_range(0..products.len())].product_id,
            store_id: stores[rng.gen_range(0..stores.len())].store_id,
            customer_id: customers[rng.gen_range(0..customers.len())].customer_id,
            time_id: times[rng.gen_range(0..times.len())].time_id,
            quantity_sold: rng.gen_range(1..=10),
            total_sale_amount: amount(rng),
        })
        .collect()
}

pub fn generate_inventory<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    products: &[DimProduct],
    stores: &[DimStore],
    today: NaiveDate,
) -> Vec<InventoryRecord> {
    if products.is_empty() || stores.is_empty() {
        return Vec::new();
    }

    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
    let span = (today - year_start).num_days();

    unique_ids(rng, &INVENTORY_IDS, count)
        .into_iter()
        .map(|inventory_id| InventoryRecord {
            inventory_id,
            product_id: products[rng.gen_range(0..products.len())].product_id,
            store_id: stores[rng.gen_range(0..stores.len())].store_id,
            stock_level: rng.gen_range(0..=500),
            last_updated: year_start + Duration::days(rng.gen_range(0..=span)),
        })
        .collect()
}

/// 生成完整数据集
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    options: &GeneratorOptions,
) -> Result<WarehouseData, GenerateError> {
    options.validate()?;

    let customers = generate_customers(rng, options.customers);
    let products = generate_products(rng, options.products);
    let stores = generate_stores(rng, options.stores);
    let times = generate_time(options.start_date, options.end_date);
    let sales = generate_sales(rng, options.sales, &customers, &products, &stores, &times);
    let inventory = generate_inventory(rng, options.inventory, &products, &stores, options.today);

    Ok(WarehouseData {
        customers,
        products,
        stores,
        times,
        sales,
        inventory,
    })
}
