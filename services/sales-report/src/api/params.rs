//! 请求参数校验

use serde::Deserialize;
use warehouse_config::ReportConfig;
use warehouse_errors::{AppError, AppResult};

/// `/api/top_products` 的查询参数
///
/// `limit` 按原始字符串接收，非法值回落到默认值而不是拒绝请求
#[derive(Debug, Default, Deserialize)]
pub struct TopProductsQuery {
    pub limit: Option<String>,
}

impl TopProductsQuery {
    /// 解析行数：取开头的整数部分（`5abc` 为 5，`3.7` 为 3），
    /// 缺失、无数字、非正数用默认值，超过上限截断
    pub fn resolve_limit(&self, config: &ReportConfig) -> i64 {
        let requested = self
            .limit
            .as_deref()
            .and_then(leading_integer)
            .filter(|limit| *limit > 0)
            .unwrap_or(config.default_limit);

        requested.min(config.max_limit)
    }
}

/// 解析字符串开头的十进制整数，超出 i64 的按边界值处理
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// 解析路径中的年份
pub fn parse_year(raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(year),
        _ => Err(AppError::validation(format!("Invalid year: {}", raw))),
    }
}
