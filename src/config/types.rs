//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 文本分析服务配置
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// 语音合成配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 文本分析服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// 外部分析服务 URL，未设置时使用本地降级实现
    #[serde(default)]
    pub url: Option<String>,

    /// Bearer API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// 单次请求超时（秒）
    #[serde(default = "default_analysis_timeout")]
    pub timeout_secs: u64,

    /// 文本语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 角色表上限
    #[serde(default = "default_max_characters")]
    pub max_characters: usize,
}

fn default_analysis_timeout() -> u64 {
    60
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_characters() -> usize {
    50
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_analysis_timeout(),
            language: default_language(),
            max_characters: default_max_characters(),
        }
    }
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 外部 TTS 服务 URL，未设置时使用本地占位合成器
    #[serde(default)]
    pub url: Option<String>,

    /// 单次合成超时（秒）
    #[serde(default = "default_synthesis_timeout")]
    pub timeout_secs: u64,

    /// 音频输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 默认采样率
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// 本地合成器返回的占位音频文件
    #[serde(default)]
    pub placeholder_audio: Option<PathBuf>,
}

fn default_synthesis_timeout() -> u64 {
    120
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/audio")
}

fn default_sample_rate() -> u32 {
    24000
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_synthesis_timeout(),
            output_dir: default_output_dir(),
            sample_rate: default_sample_rate(),
            placeholder_audio: None,
        }
    }
}

impl SynthesisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
