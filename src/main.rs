use axum::http::{HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paginator::{config::CONFIG, routes};

#[tokio::main]
async fn main() {
    let config = &*CONFIG;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // 生产环境不输出逐请求的调试日志
                let http_level = if config.is_production() { "info" } else { "debug" };
                format!(
                    "paginator={0},paginator_rs={0},tower_http={1}",
                    config.log_level, http_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "🔧 分页配置: default_page={}, default_limit={}, max_limit={:?}, strict={}",
        config.pagination.default_page,
        config.pagination.default_limit,
        config.pagination.max_limit,
        config.pagination.strict
    );

    let origins: Vec<HeaderValue> = config
        .server
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let app = routes::router(config.pagination.clone())
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET]),
        )
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server.server_addr())
        .await
        .expect("无法绑定服务器地址");

    tracing::info!(
        "🚀 Server listening on http://{} ({})",
        listener.local_addr().expect("无法获取监听地址"),
        config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("服务器异常退出");
}

/// 等待 Ctrl-C 信号
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听关闭信号: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("👋 收到关闭信号，正在停止服务...");
}
