use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use biblesearch_backend::config;
use biblesearch_backend::corpus::{store, MemoryCorpus};
use biblesearch_backend::search::SessionCache;
use state::AppState;

/// Periodically drop idle sessions / 定期清理过期会话
fn spawn_session_sweeper(sessions: Arc<SessionCache>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // 第一次 tick 立即返回
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired();
            if removed > 0 {
                tracing::debug!("Purged {} expired search sessions", removed);
            }
        }
    });
}

/// Resolve on Ctrl+C or SIGTERM / 等待退出信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biblesearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    let app_config = config::load_config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Create data directory if not exists / 创建数据目录
    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("Created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    store::run_migrations(&pool).await?;

    // Import USFM files / 导入 USFM 文件
    if let Some(import_dir) = app_config.get_import_dir() {
        if import_dir.is_dir() {
            let stats = store::import_dir(&pool, &import_dir).await?;
            tracing::info!(
                "Imported {} bibles, {} books, {} chapters from {:?} ({} files failed)",
                stats.bibles, stats.books, stats.chapters, import_dir, stats.failed_files
            );
        } else {
            tracing::warn!("Import directory {:?} does not exist, skipping import", import_dir);
        }
    }

    // Load corpus into memory / 加载经文到内存
    let corpus = Arc::new(MemoryCorpus::new());
    let chapters = store::load_into(&pool, &corpus).await?;
    tracing::info!("Loaded {} chapters into the search corpus", chapters);

    let state = Arc::new(AppState::new(pool.clone(), corpus, &app_config));

    if app_config.search.session_ttl_secs > 0 && app_config.search.sweep_interval_secs > 0 {
        spawn_session_sweeper(
            state.sessions.clone(),
            Duration::from_secs(app_config.search.sweep_interval_secs),
        );
    }

    let app = api::router(state.clone());

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 会话结果不跨进程保留
    state.sessions.clear();
    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
