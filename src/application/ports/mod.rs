//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod speech_synthesis;
mod text_analysis;
mod voice_catalog;

pub use audio_storage::{content_hash, AudioLocation, AudioStorageError, AudioStoragePort};
pub use speech_synthesis::{SpeechError, SpeechRequest, SpeechResponse, SpeechSynthesisPort};
pub use text_analysis::{
    AnalysisError, CharacterAnalysisRequest, CharacterAnalysisResponse, DialogueAnalysisRequest,
    DialogueAnalysisResponse, TextAnalysisPort,
};
pub use voice_catalog::VoiceCatalogPort;
