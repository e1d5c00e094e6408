use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C 信号；信号监听失败时永不返回，由服务器自身决定生命周期
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping classroom server...");
}
