use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C 信号；无法注册信号监听时永不返回
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, abandoning in-flight work...");
}
