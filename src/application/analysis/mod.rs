//! 分析阶段 - 角色识别、对白归属、音色推荐

mod character_analyzer;
mod dialogue_attributor;
mod voice_recommender;

pub use character_analyzer::{
    AnalyzerOptions, CharacterAnalyzer, CharacterRoster, MAX_ANALYSIS_CHARS, MAX_ROSTER_SIZE,
};
pub use dialogue_attributor::{AttributorOptions, DialogueAttributor};
pub use voice_recommender::{SuggestionMap, VoiceRecommender};
