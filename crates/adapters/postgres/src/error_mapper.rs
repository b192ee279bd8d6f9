//! 数据库错误映射工具
//!
//! 报表查询只读，约束类错误不会出现，统一归为数据库错误

use warehouse_errors::AppError;

/// 将 SQLx 错误转换为 AppError
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::PoolTimedOut => AppError::internal("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::internal("Database connection pool is closed"),
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => AppError::database(format!("Database error ({}): {}", code, db_err)),
            None => AppError::database(db_err.to_string()),
        },
        _ => AppError::database(e.to_string()),
    }
}
