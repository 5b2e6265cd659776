//! 情绪标签
//!
//! 对白片段与合成参数共用的情绪枚举

use serde::{Deserialize, Serialize};

/// 情绪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Angry,
}

impl Emotion {
    /// 所有合法取值（按固定顺序）
    pub const ALL: [Emotion; 4] = [Self::Neutral, Self::Happy, Self::Sad, Self::Angry];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "neutral" => Some(Self::Neutral),
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "angry" => Some(Self::Angry),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
