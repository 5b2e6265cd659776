//! Voice Context - 合成参数与校验

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

use super::VoiceError;
use crate::domain::Emotion;

/// 音调取值范围
pub const PITCH_RANGE: RangeInclusive<f64> = -10.0..=10.0;

/// 语速取值范围
pub const SPEED_RANGE: RangeInclusive<f64> = 0.5..=2.0;

/// 合成参数（已校验、已补默认值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    pub pitch: f64,
    pub speed: f64,
    pub emotion: Emotion,
    pub emphasis: Vec<String>,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            speed: 1.0,
            emotion: Emotion::Neutral,
            emphasis: Vec::new(),
        }
    }
}

/// 参数校验器
///
/// 每个已知 key 独立校验，未知 key 忽略。
/// 任一 key 非法时整体失败，不返回部分结果。
pub struct ParameterValidator;

impl ParameterValidator {
    pub fn normalize(raw: &Map<String, Value>) -> Result<SynthesisParameters, VoiceError> {
        let defaults = SynthesisParameters::default();

        let pitch = match raw.get("pitch") {
            Some(value) => Self::ranged_number("pitch", value, &PITCH_RANGE)?,
            None => defaults.pitch,
        };

        let speed = match raw.get("speed") {
            Some(value) => Self::ranged_number("speed", value, &SPEED_RANGE)?,
            None => defaults.speed,
        };

        let emotion = match raw.get("emotion") {
            Some(value) => Self::emotion(value)?,
            None => defaults.emotion,
        };

        let emphasis = match raw.get("emphasis") {
            Some(value) => Self::emphasis(value)?,
            None => defaults.emphasis,
        };

        Ok(SynthesisParameters {
            pitch,
            speed,
            emotion,
            emphasis,
        })
    }

    fn ranged_number(
        key: &'static str,
        value: &Value,
        range: &RangeInclusive<f64>,
    ) -> Result<f64, VoiceError> {
        let number = value
            .as_f64()
            .ok_or_else(|| VoiceError::invalid_parameter(key, format!("must be a number, got {}", value)))?;

        if !range.contains(&number) {
            return Err(VoiceError::invalid_parameter(
                key,
                format!(
                    "must be between {:.1} and {:.1}, got {}",
                    range.start(),
                    range.end(),
                    number
                ),
            ));
        }
        Ok(number)
    }

    fn emotion(value: &Value) -> Result<Emotion, VoiceError> {
        let expected = Emotion::ALL
            .iter()
            .map(Emotion::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        value
            .as_str()
            .and_then(Emotion::parse)
            .ok_or_else(|| {
                VoiceError::invalid_parameter("emotion", format!("must be one of [{}], got {}", expected, value))
            })
    }

    fn emphasis(value: &Value) -> Result<Vec<String>, VoiceError> {
        let items = value
            .as_array()
            .ok_or_else(|| VoiceError::invalid_parameter("emphasis", "must be a list of words"))?;

        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    VoiceError::invalid_parameter(
                        "emphasis",
                        format!("must contain only words, got {}", item),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn offending_key(err: VoiceError) -> String {
        match err {
            VoiceError::InvalidParameter { key, .. } => key,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let params = ParameterValidator::normalize(&Map::new()).unwrap();
        assert_eq!(params, SynthesisParameters::default());
    }

    #[test]
    fn test_in_range_values_pass_unchanged() {
        for pitch in [-10.0, -3.25, 0.0, 7.5, 10.0] {
            for speed in [0.5, 0.75, 1.0, 1.9, 2.0] {
                let params =
                    ParameterValidator::normalize(&raw(json!({"pitch": pitch, "speed": speed})))
                        .unwrap();
                assert_eq!(params.pitch, pitch);
                assert_eq!(params.speed, speed);
            }
        }
    }

    #[test]
    fn test_out_of_range_values_fail() {
        for pitch in [-10.01, 10.5, 100.0] {
            let err = ParameterValidator::normalize(&raw(json!({ "pitch": pitch }))).unwrap_err();
            assert_eq!(offending_key(err), "pitch");
        }
        for speed in [0.0, 0.49, 2.01] {
            let err = ParameterValidator::normalize(&raw(json!({ "speed": speed }))).unwrap_err();
            assert_eq!(offending_key(err), "speed");
        }
    }

    #[test]
    fn test_integers_are_numeric() {
        let params = ParameterValidator::normalize(&raw(json!({"pitch": -2, "speed": 1}))).unwrap();
        assert_eq!(params.pitch, -2.0);
        assert_eq!(params.speed, 1.0);
    }

    #[test]
    fn test_non_numeric_pitch_fails() {
        let err = ParameterValidator::normalize(&raw(json!({"pitch": "high"}))).unwrap_err();
        assert_eq!(offending_key(err), "pitch");
    }

    #[test]
    fn test_emotion_must_be_known() {
        let params = ParameterValidator::normalize(&raw(json!({"emotion": "sad"}))).unwrap();
        assert_eq!(params.emotion, Emotion::Sad);

        let err = ParameterValidator::normalize(&raw(json!({"emotion": "bored"}))).unwrap_err();
        assert_eq!(offending_key(err), "emotion");
    }

    #[test]
    fn test_emphasis_must_be_word_list() {
        let params =
            ParameterValidator::normalize(&raw(json!({"emphasis": ["never", "again"]}))).unwrap();
        assert_eq!(params.emphasis, vec!["never".to_string(), "again".to_string()]);

        let err = ParameterValidator::normalize(&raw(json!({"emphasis": "never"}))).unwrap_err();
        assert_eq!(offending_key(err), "emphasis");

        let err = ParameterValidator::normalize(&raw(json!({"emphasis": ["ok", 3]}))).unwrap_err();
        assert_eq!(offending_key(err), "emphasis");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params =
            ParameterValidator::normalize(&raw(json!({"timbre": "warm", "speed": 1.5}))).unwrap();
        assert_eq!(params.speed, 1.5);
    }

    #[test]
    fn test_all_or_nothing() {
        let result = ParameterValidator::normalize(&raw(json!({"pitch": 3.0, "speed": 9.0})));
        assert!(result.is_err());
    }
}
