//! Voice Commands - 合成与音色定制

use serde_json::{Map, Value};

/// 合成语音命令
///
/// 参数为调用方原样传入的映射，由 ParameterValidator 校验
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice_id: String,
    pub parameters: Map<String, Value>,
}

impl SynthesizeSpeech {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            parameters: Map::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// 定制音色命令
#[derive(Debug, Clone)]
pub struct CustomizeVoice {
    pub voice_id: String,
    pub customizations: Map<String, Value>,
}
