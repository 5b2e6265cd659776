//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（voicecast.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::application::analysis::MAX_ROSTER_SIZE;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["voicecast", "voicecast.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOICECAST_ANALYSIS__URL=http://analysis:9000`
/// - `VOICECAST_ANALYSIS__API_KEY=...`
/// - `VOICECAST_SYNTHESIS__URL=http://tts-server:8000`
/// - `VOICECAST_SYNTHESIS__OUTPUT_DIR=/data/audio`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("analysis.timeout_secs", 60)?
        .set_default("analysis.language", "en")?
        .set_default("analysis.max_characters", 50)?
        .set_default("synthesis.timeout_secs", 120)?
        .set_default("synthesis.output_dir", "data/audio")?
        .set_default("synthesis.sample_rate", 24000)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOICECAST_SYNTHESIS__URL=http://tts-server:8000
    builder = builder.add_source(
        Environment::with_prefix("VOICECAST")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.analysis.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Analysis timeout cannot be 0".to_string(),
        ));
    }

    if config.synthesis.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Synthesis timeout cannot be 0".to_string(),
        ));
    }

    if !(1..=MAX_ROSTER_SIZE).contains(&config.analysis.max_characters) {
        return Err(ConfigError::ValidationError(format!(
            "max_characters must be between 1 and {}",
            MAX_ROSTER_SIZE
        )));
    }

    if config.synthesis.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Audio output directory cannot be empty".to_string(),
        ));
    }

    for (name, url) in [
        ("Analysis", &config.analysis.url),
        ("Synthesis", &config.synthesis.url),
    ] {
        if url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "{} URL cannot be empty when set",
                name
            )));
        }
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    match &config.analysis.url {
        Some(url) => tracing::info!("Analysis URL: {}", url),
        None => tracing::info!("Analysis: local provider (degraded)"),
    }
    tracing::info!("Analysis Timeout: {}s", config.analysis.timeout_secs);
    tracing::info!("Analysis Language: {}", config.analysis.language);
    tracing::info!("Max Characters: {}", config.analysis.max_characters);
    match &config.synthesis.url {
        Some(url) => tracing::info!("Synthesis URL: {}", url),
        None => tracing::info!("Synthesis: local placeholder"),
    }
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    tracing::info!("Audio Directory: {:?}", config.synthesis.output_dir);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
