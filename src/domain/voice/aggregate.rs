//! Voice Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::VoiceId;
use crate::domain::character::Gender;

/// 音色档案
///
/// 不变量:
/// - voice_id 一经分配不可变
/// - is_custom 为 true 时 base_voice_id 必须存在，反之必须为空
/// - 派生音色继承基础音色的 gender/language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    voice_id: VoiceId,
    name: String,
    gender: Gender,
    language: String,
    is_custom: bool,
    base_voice_id: Option<VoiceId>,
    customizations: Map<String, Value>,
    created_at: DateTime<Utc>,
}

impl VoiceProfile {
    /// 创建内置音色
    pub fn builtin(
        voice_id: VoiceId,
        name: impl Into<String>,
        gender: Gender,
        language: impl Into<String>,
    ) -> Self {
        Self {
            voice_id,
            name: name.into(),
            gender,
            language: language.into(),
            is_custom: false,
            base_voice_id: None,
            customizations: Map::new(),
            created_at: Utc::now(),
        }
    }

    /// 基于已有音色派生自定义音色
    ///
    /// 名称取 customizations 中的 `name`（字符串），否则为 `Customized {base}`
    pub fn derive(base: &VoiceProfile, voice_id: VoiceId, customizations: Map<String, Value>) -> Self {
        let name = customizations
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Customized {}", base.name));

        Self {
            voice_id,
            name,
            gender: base.gender,
            language: base.language.clone(),
            is_custom: true,
            base_voice_id: Some(base.voice_id.clone()),
            customizations,
            created_at: Utc::now(),
        }
    }

    /// 内置音色表（目录初始化时注入）
    pub fn builtin_set() -> Vec<VoiceProfile> {
        [
            ("voice_1", "Female 1", Gender::Female),
            ("voice_2", "Male 1", Gender::Male),
            ("voice_3", "Female 2", Gender::Female),
            ("voice_4", "Male 2", Gender::Male),
        ]
        .into_iter()
        .filter_map(|(id, name, gender)| {
            VoiceId::new(id)
                .ok()
                .map(|voice_id| Self::builtin(voice_id, name, gender, "en-US"))
        })
        .collect()
    }

    // Getters
    pub fn voice_id(&self) -> &VoiceId {
        &self.voice_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    pub fn base_voice_id(&self) -> Option<&VoiceId> {
        self.base_voice_id.as_ref()
    }

    pub fn customizations(&self) -> &Map<String, Value> {
        &self.customizations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_set() {
        let voices = VoiceProfile::builtin_set();
        assert_eq!(voices.len(), 4);
        assert_eq!(voices[0].voice_id().as_str(), "voice_1");
        assert!(voices.iter().all(|v| !v.is_custom() && v.base_voice_id().is_none()));
    }

    #[test]
    fn test_derive_inherits_gender_and_language() {
        let base = VoiceProfile::builtin_set().remove(1);
        let mut customizations = Map::new();
        customizations.insert("pitch_shift".to_string(), json!(-2));

        let derived = VoiceProfile::derive(
            &base,
            VoiceId::custom(base.voice_id(), 5),
            customizations,
        );

        assert!(derived.is_custom());
        assert_eq!(derived.gender(), Gender::Male);
        assert_eq!(derived.language(), "en-US");
        assert_eq!(derived.base_voice_id(), Some(base.voice_id()));
        assert_eq!(derived.name(), "Customized Male 1");
    }

    #[test]
    fn test_derive_uses_supplied_name() {
        let base = VoiceProfile::builtin_set().remove(0);
        let mut customizations = Map::new();
        customizations.insert("name".to_string(), json!("Old Sailor"));

        let derived = VoiceProfile::derive(&base, VoiceId::custom(base.voice_id(), 5), customizations);
        assert_eq!(derived.name(), "Old Sailor");
    }
}
