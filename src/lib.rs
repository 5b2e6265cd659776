//! Voicecast - 文本到角色配音流水线
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Character Context: 角色
//! - Dialogue Context: 对白片段
//! - Voice Context: 音色、合成参数、音频产物
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextAnalysis, SpeechSynthesis, VoiceCatalog, AudioStorage）
//! - Analysis: 角色识别、对白归属、音色推荐
//! - Commands / Queries: 合成、定制音色、音色查询
//! - Pipeline: 流水线编排
//!
//! 基础设施层 (infrastructure/):
//! - Memory: 音色目录内存实现
//! - Adapters: 分析服务 / TTS 客户端、本地降级实现、文件存储
//! - Bootstrap: 按配置装配

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
