//! 金额序列化
//!
//! 金额统一输出为 JSON 数字：整数值输出为整数（`150`），
//! 带小数的输出为浮点数（`150.5`）

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serializer, ser::Error};

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract().is_zero() {
        if let Some(whole) = value.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }

    match value.to_f64() {
        Some(v) => serializer.serialize_f64(v),
        None => Err(S::Error::custom(format!("amount out of range: {}", value))),
    }
}
