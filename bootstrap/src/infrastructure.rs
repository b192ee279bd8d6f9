//! 基础设施资源管理
//!
//! 报表服务只依赖一个 PostgreSQL 连接池

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;
use warehouse_adapter_postgres::{PostgresConfig, create_pool};
use warehouse_config::AppConfig;
use warehouse_errors::AppResult;

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 初始连接失败直接返回错误，不重试
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = postgres_config(&config);
        let postgres_pool = create_pool(&pg_config).await?;
        info!(
            host = %config.database.host,
            database = %config.database.name,
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self::new(config, postgres_pool))
    }

    /// 由已有连接池组装（测试、工具复用）
    pub fn new(config: AppConfig, postgres_pool: PgPool) -> Self {
        Self {
            config,
            postgres_pool,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取连接池（PgPool 内部是 Arc，克隆开销很小）
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }
}

/// 由应用配置生成连接池配置
pub fn postgres_config(config: &AppConfig) -> PostgresConfig {
    PostgresConfig::new(config.database.connection_url().expose_secret().as_str())
        .with_max_connections(config.database.max_connections)
        .with_min_connections(config.database.min_connections)
        .with_acquire_timeout(config.database.acquire_timeout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_postgres_config_from_app_config() {
        let mut config = AppConfig::default();
        config.database.host = "warehouse".to_string();
        config.database.max_connections = 7;
        config.database.acquire_timeout_secs = 3;

        let pg = postgres_config(&config);
        assert_eq!(pg.url, "postgres://postgres@warehouse:5432/warehouse_db");
        assert_eq!(pg.max_connections, 7);
        assert_eq!(pg.acquire_timeout, Duration::from_secs(3));
    }
}
