use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TinylinkError};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable prefix, e.g. `TL__ENGINE__SHORT_CODE_LENGTH=8`
pub const ENV_PREFIX: &str = "TL";

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - engine: 短链接引擎参数（短码长度、TTL、URL 长度上限、清理周期）
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StaticConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 `config.toml` 和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads from an explicit TOML path (missing file is not an error),
    /// then applies `TL__*` environment overrides and validates the result.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        use config::{Config, Environment, File, FileFormat};

        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.engine.validate()?;
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 短链接引擎配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Prefix prepended to codes for display only
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_short_code_length")]
    pub short_code_length: usize,
    #[serde(default = "default_ttl_hours")]
    pub default_ttl_hours: u64,
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,
    #[serde(default = "default_cleanup_interval_minutes")]
    pub cleanup_interval_minutes: u64,
    /// Upper bound on candidate codes tried per creation
    #[serde(default = "default_max_code_attempts")]
    pub max_code_attempts: u32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        super::validators::validate_engine_config(self).map_err(TinylinkError::config)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

// ============================================================
// Default value functions
// ============================================================

fn default_base_url() -> String {
    "http://short.url/".to_string()
}

fn default_short_code_length() -> usize {
    6
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_max_url_length() -> usize {
    2048
}

fn default_cleanup_interval_minutes() -> u64 {
    30
}

fn default_max_code_attempts() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_enable_rotation() -> bool {
    true
}

fn default_max_backups() -> u32 {
    5
}

// ============================================================
// Default implementations
// ============================================================

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            short_code_length: default_short_code_length(),
            default_ttl_hours: default_ttl_hours(),
            max_url_length: default_max_url_length(),
            cleanup_interval_minutes: default_cleanup_interval_minutes(),
            max_code_attempts: default_max_code_attempts(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: default_enable_rotation(),
            max_backups: default_max_backups(),
        }
    }
}
