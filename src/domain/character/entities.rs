//! Character Context - Entities

use serde::{Deserialize, Serialize};

use super::Gender;

/// 角色 - 一次分析中识别出的说话者
///
/// 不变量:
/// - name 在同一次分析内唯一
/// - confidence 位于 [0.0, 1.0]
/// - 下游只允许修改 dialogue_count
///
/// 字典形式与外部分析服务的 JSON 一致，缺省字段反序列化为默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dialogue_count: u64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub is_narrator: bool,
    #[serde(default, alias = "character_traits")]
    pub traits: Vec<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub speaking_style: Option<String>,
}

impl Character {
    /// 创建只有名称的角色，其余字段取默认值
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            dialogue_count: 0,
            confidence: 0.0,
            is_narrator: false,
            traits: Vec::new(),
            gender: None,
            age: None,
            speaking_style: None,
        }
    }

    /// 创建旁白角色
    pub fn narrator(name: impl Into<String>) -> Self {
        Self {
            is_narrator: true,
            ..Self::new(name)
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// 有效性别：未设置视为 Unspecified
    pub fn effective_gender(&self) -> Gender {
        self.gender.unwrap_or(Gender::Unspecified)
    }

    /// 记录一条归属到该角色的对白
    pub fn record_dialogue(&mut self) {
        self.dialogue_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_round_trip() {
        let character = Character {
            name: "Elena".to_string(),
            description: "A retired sea captain".to_string(),
            dialogue_count: 12,
            confidence: 0.75,
            is_narrator: false,
            traits: vec!["gruff".to_string(), "loyal".to_string()],
            gender: Some(Gender::Female),
            age: Some("elderly".to_string()),
            speaking_style: Some("clipped".to_string()),
        };

        let value = serde_json::to_value(&character).unwrap();
        let restored: Character = serde_json::from_value(value).unwrap();
        assert_eq!(restored, character);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let restored: Character = serde_json::from_str(r#"{"name": "Tom"}"#).unwrap();
        assert_eq!(restored, Character::new("Tom"));
        assert_eq!(restored.effective_gender(), Gender::Unspecified);
    }

    #[test]
    fn test_accepts_character_traits_alias() {
        let restored: Character =
            serde_json::from_str(r#"{"name": "Tom", "character_traits": ["shy"]}"#).unwrap();
        assert_eq!(restored.traits, vec!["shy".to_string()]);
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let result: Result<Character, _> =
            serde_json::from_str(r#"{"name": "Tom", "gender": "robot"}"#);
        assert!(result.is_err());
    }
}
