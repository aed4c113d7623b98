//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::search::SessionCacheConfig;

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Database configuration / 数据库配置
    pub database: DatabaseConfig,
    /// Search configuration / 搜索配置
    pub search: SearchConfig,
    /// Corpus import configuration / 经文导入配置
    pub corpus: CorpusConfig,
    /// Read access to bibles / 圣经读取权限
    pub access: AccessConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Database configuration / 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Data directory path / 数据目录路径
    pub data_dir: String,
    /// Main database file path (relative to data_dir) / 主数据库文件路径
    pub db_file: String,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum cached sessions, 0 for unbounded / 最大缓存会话数
    pub max_sessions: usize,
    /// Idle seconds before a session expires, 0 for never / 会话空闲过期秒数
    pub session_ttl_secs: u64,
    /// Seconds between expiry sweeps / 过期清理间隔
    pub sweep_interval_secs: u64,
    /// Editor page opened by hit links / 命中链接打开的编辑器地址
    pub editor_url: String,
    /// Bible searched when the request names none / 默认圣经
    pub default_bible: String,
}

/// Corpus configuration / 经文配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory of `<bible>/<book>.usfm` files imported at startup, empty to skip / 启动导入目录
    pub import_dir: String,
}

/// Access configuration / 权限配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Bibles the user may read, empty means all / 可读圣经列表
    pub readable_bibles: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            db_file: "biblesearch.db".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            session_ttl_secs: 3600,
            sweep_interval_secs: 60,
            editor_url: "/editone/index".to_string(),
            default_bible: String::new(),
        }
    }
}

impl SearchConfig {
    /// Limits for the session result cache / 会话缓存限制
    pub fn session_cache(&self) -> SessionCacheConfig {
        SessionCacheConfig {
            max_sessions: self.max_sessions,
            ttl: (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs)),
        }
    }
}

impl AccessConfig {
    /// Whether `bible` is readable / 是否可读
    pub fn can_read(&self, bible: &str) -> bool {
        self.readable_bibles.is_empty() || self.readable_bibles.iter().any(|b| b == bible)
    }

    /// Keep the readable bibles of `bibles`, order preserved / 过滤可读圣经
    pub fn readable(&self, bibles: Vec<String>) -> Vec<String> {
        bibles.into_iter().filter(|b| self.can_read(b)).collect()
    }
}

impl AppConfig {
    /// Get the full database URL / 获取完整的数据库URL
    pub fn get_database_url(&self) -> String {
        let db_path = Path::new(&self.database.data_dir).join(&self.database.db_file);
        format!("sqlite:{}?mode=rwc", db_path.to_string_lossy())
    }

    /// Get the full data directory path / 获取完整的数据目录路径
    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.database.data_dir)
    }

    /// Get the USFM import directory, if configured / 获取导入目录
    pub fn get_import_dir(&self) -> Option<PathBuf> {
        if self.corpus.import_dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.corpus.import_dir))
        }
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&get_config_path())
}

/// Load configuration from a given path / 从指定路径加载配置
pub fn load_config_from(config_path: &Path) -> Result<AppConfig, String> {
    if config_path.exists() {
        // Load existing config / 加载现有配置
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        // Create default config / 创建默认配置
        let config = AppConfig::default();
        save_config_to(&config, config_path)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
fn save_config_to(config: &AppConfig, config_path: &Path) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"search": {"max_sessions": 5}}"#).unwrap();
        assert_eq!(config.search.max_sessions, 5);
        assert_eq!(config.search.session_ttl_secs, 3600);
        assert_eq!(config.server.port, 8080);
        assert!(config.access.readable_bibles.is_empty());
    }

    #[test]
    fn test_session_cache_limits() {
        let mut search = SearchConfig::default();
        assert_eq!(search.session_cache().ttl, Some(Duration::from_secs(3600)));
        search.session_ttl_secs = 0;
        search.max_sessions = 0;
        let limits = search.session_cache();
        assert_eq!(limits.ttl, None);
        assert_eq!(limits.max_sessions, 0);
    }

    #[test]
    fn test_access_filter() {
        let open = AccessConfig::default();
        assert!(open.can_read("KJV"));

        let restricted = AccessConfig { readable_bibles: vec!["KJV".to_string()] };
        assert!(restricted.can_read("KJV"));
        assert!(!restricted.can_read("NIV"));
        assert_eq!(
            restricted.readable(vec!["NIV".to_string(), "KJV".to_string()]),
            vec!["KJV".to_string()]
        );
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.database.db_file, "biblesearch.db");

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.search.editor_url, config.search.editor_url);
        assert!(reloaded.get_import_dir().is_none());
    }
}
