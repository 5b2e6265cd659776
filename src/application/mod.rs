//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextAnalysis、SpeechSynthesis、VoiceCatalog、AudioStorage）
//! - analysis: 角色识别、对白归属、音色推荐
//! - commands: 合成与音色定制命令及处理器
//! - queries: 音色查询及处理器
//! - pipeline: 流水线编排
//! - error: 应用层错误定义

pub mod analysis;
pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod queries;

// Re-exports
pub use analysis::{
    AnalyzerOptions, AttributorOptions, CharacterAnalyzer, CharacterRoster, DialogueAttributor,
    SuggestionMap, VoiceRecommender,
};

pub use commands::{
    handlers::{SynthesisEngine, MAX_SYNTHESIS_CHARS},
    CustomizeVoice, SynthesizeSpeech,
};

pub use error::PipelineError;

pub use pipeline::{PipelineOrchestrator, PipelineReport, VoiceChoice};

pub use queries::{
    handlers::{GetVoiceHandler, ListVoicesHandler, SuggestVoicesHandler, VoiceResponse},
    GetVoice, ListVoices, SuggestVoices,
};
