//! Voice Recommender - 基于规则的音色推荐
//!
//! 纯函数：只依赖角色的 (is_narrator, gender) 与静态规则表，相同输入得到逐位相同的输出

use indexmap::IndexMap;

use crate::application::error::PipelineError;
use crate::domain::character::{Character, Gender};
use crate::domain::voice::VoiceSuggestion;

/// 角色名 -> 按置信度降序排列的推荐列表，键按角色表顺序排列
pub type SuggestionMap = IndexMap<String, Vec<VoiceSuggestion>>;

/// 音色推荐器
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceRecommender;

impl VoiceRecommender {
    pub fn new() -> Self {
        Self
    }

    pub fn suggest(&self, characters: &[Character]) -> Result<SuggestionMap, PipelineError> {
        if characters.is_empty() {
            return Err(PipelineError::invalid_input("character list cannot be empty"));
        }

        let suggestions: SuggestionMap = characters
            .iter()
            .map(|character| (character.name.clone(), self.suggest_for(character)))
            .collect();

        tracing::debug!(characters = suggestions.len(), "Generated voice suggestions");
        Ok(suggestions)
    }

    /// 单个角色的推荐列表
    pub fn suggest_for(&self, character: &Character) -> Vec<VoiceSuggestion> {
        let mut suggestions = if character.is_narrator {
            vec![
                VoiceSuggestion::new("narrator_1", "Clear Narrator", 0.0, 1.0, 0.95),
                VoiceSuggestion::new("narrator_2", "Storyteller", -1.0, 0.9, 0.90),
            ]
        } else {
            match character.effective_gender() {
                Gender::Male => vec![
                    VoiceSuggestion::new("male_1", "Standard Male", 0.0, 1.0, 0.90),
                    VoiceSuggestion::new("male_2", "Deep Male", -2.0, 0.95, 0.85),
                ],
                Gender::Female => vec![
                    VoiceSuggestion::new("female_1", "Standard Female", 1.0, 1.0, 0.90),
                    VoiceSuggestion::new("female_2", "Soft Female", 2.0, 1.05, 0.85),
                ],
                Gender::Unspecified => vec![VoiceSuggestion::new(
                    "neutral_1",
                    "Neutral Voice",
                    0.0,
                    1.0,
                    0.80,
                )],
            }
        };

        // 稳定排序：置信度相同保持插入顺序
        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        suggestions
    }
}
