//! Local Analysis Provider - 无外部分析服务时的确定性降级实现
//!
//! 按文本长度生成固定形态的角色表和对白片段，结果只用于演示和测试流程

use async_trait::async_trait;

use crate::application::ports::{
    AnalysisError, CharacterAnalysisRequest, CharacterAnalysisResponse, DialogueAnalysisRequest,
    DialogueAnalysisResponse, TextAnalysisPort,
};
use crate::domain::character::{Character, Gender};
use crate::domain::dialogue::{slice_chars, DialogueSpan};
use crate::domain::Emotion;

/// 本地启发式分析
#[derive(Debug, Default)]
pub struct LocalAnalysisProvider;

impl LocalAnalysisProvider {
    pub fn new() -> Self {
        Self
    }

    /// 角色数 = clamp(len / 10000, 2, 10)，首个为旁白
    ///
    /// 人数只由文本长度决定，不受请求中的 max_characters 影响
    pub fn roster_for(text: &str) -> Vec<Character> {
        let text_length = text.chars().count();
        let count = (text_length / 10_000).clamp(2, 10);
        let lines = (text_length / 500) as u64;

        (0..count)
            .map(|i| {
                let mut character = if i == 0 {
                    let mut narrator = Character::narrator("Narrator");
                    narrator.description = "The narrator of the story".to_string();
                    narrator.traits = vec!["observant".to_string(), "descriptive".to_string()];
                    narrator.speaking_style = Some("formal".to_string());
                    narrator.dialogue_count = lines * 3;
                    narrator
                } else {
                    let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                    let mut supporting = Character::new(format!("Character {}", i)).with_gender(gender);
                    supporting.description = "A supporting character in the story".to_string();
                    supporting.traits = vec!["trait1".to_string(), "trait2".to_string()];
                    supporting.age = Some("adult".to_string());
                    supporting.speaking_style = Some("casual".to_string());
                    supporting.dialogue_count = lines;
                    supporting
                };
                character.confidence = 0.9 - i as f64 * 0.05;
                character
            })
            .collect()
    }

    /// 片段数上限 = clamp(len / 5000, 5, 50)，片段间留出叙述间隔，
    /// 说话者在角色表前三名之间轮换，情绪按 neutral/happy/sad/angry 循环
    pub fn spans_for(text: &str, characters: &[Character]) -> Vec<DialogueSpan> {
        let text_length = text.chars().count();
        let speakers = characters.len().min(3);
        if speakers == 0 {
            return Vec::new();
        }

        let count = (text_length / 5_000).clamp(5, 50);
        let span_length = (text_length / count).min(100);
        let gap = (text_length / (count * 2)).min(500);

        let mut spans = Vec::new();
        let mut position = 0;
        for i in 0..count {
            if span_length == 0 || position + span_length >= text_length {
                break;
            }
            position += gap;
            if position >= text_length {
                break;
            }

            let end = (position + span_length).min(text_length);
            let Some(slice) = slice_chars(text, position, end) else {
                break;
            };

            spans.push(DialogueSpan {
                text: slice.to_string(),
                character_name: characters[i % speakers].name.clone(),
                start_index: position,
                end_index: end,
                confidence: 0.8,
                emotion: Some(Emotion::ALL[i % Emotion::ALL.len()]),
            });
            position += span_length;
        }
        spans
    }
}

#[async_trait]
impl TextAnalysisPort for LocalAnalysisProvider {
    async fn analyze_characters(
        &self,
        request: CharacterAnalysisRequest,
    ) -> Result<CharacterAnalysisResponse, AnalysisError> {
        let characters = Self::roster_for(&request.text);
        tracing::debug!(
            text_len = request.text.len(),
            characters = characters.len(),
            "LocalAnalysisProvider: generated character roster"
        );
        Ok(CharacterAnalysisResponse { characters })
    }

    async fn analyze_dialogue(
        &self,
        request: DialogueAnalysisRequest,
    ) -> Result<DialogueAnalysisResponse, AnalysisError> {
        let dialogues = Self::spans_for(&request.text, &request.characters);
        tracing::debug!(
            text_len = request.text.len(),
            spans = dialogues.len(),
            "LocalAnalysisProvider: generated dialogue spans"
        );
        Ok(DialogueAnalysisResponse { dialogues })
    }

    fn is_degraded(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(len: usize) -> String {
        "abcdefghij".chars().cycle().take(len).collect()
    }

    #[test]
    fn test_roster_size_follows_length() {
        assert_eq!(LocalAnalysisProvider::roster_for(&text(100)).len(), 2);
        assert_eq!(LocalAnalysisProvider::roster_for(&text(25_000)).len(), 2);
        assert_eq!(LocalAnalysisProvider::roster_for(&text(45_000)).len(), 4);
        assert_eq!(LocalAnalysisProvider::roster_for(&text(500_000)).len(), 10);
    }

    #[tokio::test]
    async fn test_roster_ignores_configured_limit() {
        use crate::application::analysis::{AnalyzerOptions, CharacterAnalyzer};
        use std::sync::Arc;

        let analyzer = CharacterAnalyzer::new(
            Arc::new(LocalAnalysisProvider::new()),
            AnalyzerOptions {
                max_characters: 1,
                ..Default::default()
            },
        );

        let roster = analyzer.identify(&text(25_000)).await.unwrap();
        assert!(roster.degraded);
        assert_eq!(roster.characters.len(), 2);

        let roster = analyzer.identify(&text(45_000)).await.unwrap();
        assert_eq!(roster.characters.len(), 4);
    }

    #[test]
    fn test_roster_shape() {
        let roster = LocalAnalysisProvider::roster_for(&text(30_000));

        let narrator = &roster[0];
        assert!(narrator.is_narrator);
        assert_eq!(narrator.name, "Narrator");
        assert_eq!(narrator.gender, None);
        assert_eq!(narrator.dialogue_count, 180);
        assert!((narrator.confidence - 0.9).abs() < 1e-9);

        assert_eq!(roster[1].name, "Character 1");
        assert_eq!(roster[1].gender, Some(Gender::Female));
        assert_eq!(roster[1].dialogue_count, 60);
        assert_eq!(roster[2].gender, Some(Gender::Male));
        assert!((roster[2].confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_spans_are_ordered_and_in_bounds() {
        let source = text(25_000);
        let roster = LocalAnalysisProvider::roster_for(&source);
        let spans = LocalAnalysisProvider::spans_for(&source, &roster);

        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].start_index, 500);
        assert_eq!(spans[0].end_index, 600);
        for pair in spans.windows(2) {
            assert!(pair[0].end_index <= pair[1].start_index);
        }
        for span in &spans {
            assert!(span.end_index <= 25_000);
            assert_eq!(span.text.chars().count(), span.end_index - span.start_index);
            assert!(roster.iter().any(|c| c.name == span.character_name));
        }
        assert_eq!(spans[1].emotion, Some(Emotion::Happy));
        assert_eq!(spans[2].character_name, "Narrator");
    }

    #[test]
    fn test_spans_for_tiny_text() {
        let roster = LocalAnalysisProvider::roster_for("Hi");
        assert!(LocalAnalysisProvider::spans_for("Hi", &roster).is_empty());
        assert!(LocalAnalysisProvider::spans_for(&text(1_000), &[]).is_empty());
    }

    #[test]
    fn test_spans_respect_multibyte_text() {
        let source: String = "天地玄黄宇宙洪荒".chars().cycle().take(2_000).collect();
        let roster = LocalAnalysisProvider::roster_for(&source);
        let spans = LocalAnalysisProvider::spans_for(&source, &roster);

        assert!(!spans.is_empty());
        for span in &spans {
            assert_eq!(
                slice_chars(&source, span.start_index, span.end_index),
                Some(span.text.as_str())
            );
        }
    }
}
