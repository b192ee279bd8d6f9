//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tokio::net::TcpListener;
use warehouse_config::{AppConfig, ServerConfig};
use warehouse_telemetry::init_metrics;

use crate::health::{HealthState, health_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 组装完整路由：业务路由 + 健康检查 + trace + CORS
pub fn build_app(service_routes: Router, health: HealthState) -> Router {
    service_routes
        .merge(health_routes(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 绑定监听地址，`host` 可以是 IP 或主机名
pub async fn bind_listener(server: &ServerConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind(server.bind_address()).await
}

/// 运行 HTTP 服务
///
/// 所有 HTTP 服务的统一入口点。它负责：
/// 1. 加载 `.env` 和配置
/// 2. 初始化运行时（日志、metrics）
/// 3. 创建连接池，失败则直接退出
/// 4. 调用用户提供的闭包构建业务路由
/// 5. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use warehouse_bootstrap::run_http;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http("config", |infra| my_routes(infra.postgres_pool())).await
/// }
/// ```
pub async fn run_http<F>(config_dir: &str, router_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&Infrastructure) -> Router,
{
    // 1. 加载配置
    dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Prometheus recorder not installed, /metrics disabled");
            None
        }
    };

    // 3. 创建基础设施
    let infra = match Infrastructure::from_config(config.clone()).await {
        Ok(infra) => infra,
        Err(e) => {
            error!(error = %e, "Error connecting to the database");
            return Err(e.into());
        }
    };

    // 4. 构建路由
    let health = HealthState::new(infra.postgres_pool(), metrics);
    let app = build_app(router_builder(&infra), health);

    // 5. 启动服务器
    let listener = bind_listener(&config.server).await?;
    let addr = listener.local_addr()?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    infra.postgres_pool().close().await;

    info!("Service stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use std::time::Duration;
    use tower::ServiceExt;
    use warehouse_adapter_postgres::{PostgresConfig, create_lazy_pool};

    fn health_state() -> HealthState {
        let config = PostgresConfig::new("postgres://postgres@127.0.0.1:1/warehouse_db")
            .with_acquire_timeout(Duration::from_millis(300));
        HealthState::new(create_lazy_pool(&config).unwrap(), None)
    }

    #[tokio::test]
    async fn test_service_and_health_routes_merged() {
        let routes = Router::new().route("/api/ping", get(|| async { "pong" }));
        let app = build_app(routes, health_state());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bind_resolves_hostname() {
        let server = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
        };
        let listener = bind_listener(&server).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_cors_is_open() {
        let routes = Router::new().route("/api/ping", get(|| async { "pong" }));
        let app = build_app(routes, health_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .header(header::ORIGIN, "http://dashboard.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
