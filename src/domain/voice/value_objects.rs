//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

/// 音色唯一标识
///
/// 内置音色形如 `voice_1`，派生音色形如 `custom_voice_1_5`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, &'static str> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("voice id cannot be empty");
        }
        Ok(Self(id))
    }

    /// 派生音色 ID：`custom_{base}_{sequence}`
    pub fn custom(base: &VoiceId, sequence: u64) -> Self {
        Self(format!("custom_{}_{}", base.0, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VoiceId {
    type Error = &'static str;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<VoiceId> for String {
    fn from(id: VoiceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    #[default]
    Mp3,
    Flac,
    Ogg,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" | "mpeg" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
        }
    }
}

/// 音色推荐 - 针对单个角色的一条候选
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSuggestion {
    pub voice_id: String,
    pub display_name: String,
    pub pitch: f64,
    pub speed: f64,
    pub confidence: f64,
}

impl VoiceSuggestion {
    pub fn new(
        voice_id: &str,
        display_name: &str,
        pitch: f64,
        speed: f64,
        confidence: f64,
    ) -> Self {
        Self {
            voice_id: voice_id.to_string(),
            display_name: display_name.to_string(),
            pitch,
            speed,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_id_rejects_blank() {
        assert!(VoiceId::new("  ").is_err());
        assert_eq!(VoiceId::new("voice_1").unwrap().as_str(), "voice_1");
    }

    #[test]
    fn test_voice_id_serde_validates() {
        let id: VoiceId = serde_json::from_str("\"voice_3\"").unwrap();
        assert_eq!(id.as_str(), "voice_3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"voice_3\"");

        assert!(serde_json::from_str::<VoiceId>("\"\"").is_err());
        assert!(serde_json::from_str::<VoiceId>("\"   \"").is_err());
    }

    #[test]
    fn test_custom_voice_id_format() {
        let base = VoiceId::new("voice_2").unwrap();
        assert_eq!(VoiceId::custom(&base, 5).as_str(), "custom_voice_2_5");
    }

    #[test]
    fn test_audio_format_extension() {
        assert_eq!(AudioFormat::from_extension("MP3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::default().extension(), "mp3");
        assert_eq!(AudioFormat::from_extension("aiff"), None);
    }
}
