//! warehouse-etl - 仓库数据装载
//!
//! 数据来源二选一：随机合成，或 Superstore 订单 CSV 目录

pub mod cli;
pub mod csv_source;
pub mod generate;
pub mod load;
pub mod model;
mod words;

pub use cli::Cli;
pub use csv_source::{CsvImportError, import_directory};
pub use generate::{GenerateError, GeneratorOptions, generate};
pub use load::{LoadSummary, load_warehouse};
pub use model::WarehouseData;
