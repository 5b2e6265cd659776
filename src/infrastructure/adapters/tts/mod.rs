//! TTS Adapter - 语音合成服务实现

mod http_speech_client;
mod local_speech_synthesizer;

pub use http_speech_client::{HttpSpeechClient, HttpSpeechClientConfig};
pub use local_speech_synthesizer::LocalSpeechSynthesizer;
