use derive_more::Display;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    pub static ref GLOBAL_CONFIG: Config = Config::new_from_file(
        &std::env::var("NOTIFY_CONFIG").unwrap_or_else(|_| "config.toml".to_string())
    );
}

#[derive(Deserialize, Serialize, Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreBackend {
    #[serde(rename = "memory")]
    #[display(fmt = "memory")]
    Memory,
    #[serde(rename = "pgsql")]
    #[display(fmt = "pgsql")]
    Pgsql,
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Memory
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub pgsql: Option<SQLConfig>,
    #[serde(default)]
    pub extension: ExtensionConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub mode: String,
    pub addr: String,
    pub thread: usize,
    pub log_level: String,
    pub log_format: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AuthConfig {
    /// HS256 密钥; 为空时只检查 Authorization 头部是否存在
    pub token_secret: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_key")]
    pub key: String,
    /// 写入时的保存时长(秒), 设为 0 时使用存储自身的默认值
    #[serde(default = "default_store_ttl")]
    pub ttl: u64,
    /// 存储的数据无法解析时返回错误, 而不是当作空列表
    #[serde(default)]
    pub strict_decode: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SQLConfig {
    pub mode: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database_name: String,
    pub application_name: String,
    pub ssl: bool,
    pub root_cert: String,
    pub connect_timeout: u64,
    pub keepalives_idle: u64,
    pub pool_size: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExtensionConfig {
    pub id: String,
    pub title: String,
    pub section: String,
}

// 一年, 与状态存储允许的最大保存时长一致
pub const MAX_TTL: u64 = 365 * 24 * 60 * 60;

fn default_store_key() -> String {
    "notifications".to_string()
}

fn default_store_ttl() -> u64 {
    MAX_TTL
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            key: default_store_key(),
            ttl: default_store_ttl(),
            strict_decode: false,
        }
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            id: "notificationmanager".to_string(),
            title: "Notification Manager".to_string(),
            section: "Notifications".to_string(),
        }
    }
}

impl Config {
    pub fn new_from_file(file_path: &str) -> Self {
        let content = std::fs::read_to_string(file_path)
            .unwrap_or_else(|e| panic!("不能读取配置文件 {}: {}", file_path, e));
        Self::from_toml(&content)
            .unwrap_or_else(|e| panic!("配置文件格式错误 {}: {}", file_path, e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
