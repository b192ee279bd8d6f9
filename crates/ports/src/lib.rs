//! ports - 抽象 trait 层
//!
//! 定义报表查询的抽象接口与结果行类型

pub mod amount;
mod sales_report;

pub use sales_report::*;
