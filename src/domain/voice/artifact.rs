//! Voice Context - 合成产物

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{AudioFormat, SynthesisParameters, VoiceId};

/// 基准语速（词/分钟）
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// 估算音频时长
///
/// `word_count / 150 * (1 / speed)`，进度和费用展示依赖此值，不得改动。
pub fn estimate_duration(text: &str, speed: f64) -> f64 {
    let words = text.split_whitespace().count() as f64;
    (words / WORDS_PER_MINUTE) * (1.0 / speed)
}

/// 音频产物 - 一次合成调用对应一个，生成后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioArtifact {
    pub artifact_id: String,
    pub file_path: PathBuf,
    pub duration_seconds: f64,
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub text_length: usize,
    pub voice_id: VoiceId,
    pub parameters: SynthesisParameters,
    pub created_at: DateTime<Utc>,
}
