use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化系统访客身份
/// 匿名评分时所有评论作者都显示为访客，缺失时在启动阶段创建
pub(crate) async fn seed_guest(storage: &Arc<dyn Storage>) {
    match storage.get_guest_user().await {
        Ok(Some(guest)) => {
            debug!("Guest identity already exists (ID: {})", guest.id);
            return;
        }
        Ok(None) => {
            info!("No guest identity found in database, creating one...");
        }
        Err(e) => {
            warn!("Failed to look up guest identity: {}, skipping guest seed", e);
            return;
        }
    }

    match storage.create_guest_user().await {
        Ok(guest) => {
            info!(
                "Guest identity created successfully (ID: {}, email: {})",
                guest.id, guest.email
            );
        }
        Err(e) => {
            warn!("Failed to create guest identity: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化访客身份（如果需要）
    seed_guest(&storage).await;

    StartupContext { storage }
}
