//! Dialogue Attributor - 对白切分与归属

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::character_analyzer::validate_analysis_text;
use crate::application::error::PipelineError;
use crate::application::ports::{AnalysisError, DialogueAnalysisRequest, TextAnalysisPort};
use crate::domain::character::Character;
use crate::domain::dialogue::{slice_chars, DialogueSpan};
use crate::domain::Emotion;

/// 归属选项
#[derive(Debug, Clone)]
pub struct AttributorOptions {
    pub language: String,
    pub timeout: Duration,
}

impl Default for AttributorOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// 对白归属器
///
/// 输出保证:
/// - 片段按 start_index 升序且互不重叠，片段之间的空隙即旁白叙述
/// - 每个 character_name 都能在输入名单中找到
/// - confidence 位于 [0, 1]，emotion 缺省为 neutral
pub struct DialogueAttributor {
    provider: Arc<dyn TextAnalysisPort>,
    options: AttributorOptions,
}

impl DialogueAttributor {
    pub fn new(provider: Arc<dyn TextAnalysisPort>, options: AttributorOptions) -> Self {
        Self { provider, options }
    }

    /// 切分并归属对白
    ///
    /// 全部片段通过校验后才累加各角色的 dialogue_count
    pub async fn attribute(
        &self,
        text: &str,
        characters: &mut [Character],
    ) -> Result<Vec<DialogueSpan>, PipelineError> {
        if characters.is_empty() {
            return Err(PipelineError::attribution("character roster cannot be empty"));
        }
        validate_analysis_text(text)?;

        let request = DialogueAnalysisRequest {
            text: text.to_string(),
            characters: characters.to_vec(),
            language: self.options.language.clone(),
            include_emotion: true,
        };

        let response = tokio::time::timeout(
            self.options.timeout,
            self.provider.analyze_dialogue(request),
        )
        .await
        .map_err(|_| AnalysisError::Timeout)
        .and_then(|result| result)
        .map_err(|e| {
            tracing::error!(error = %e, "Dialogue analysis failed");
            PipelineError::from(e)
        })?;

        let spans = normalize_spans(text, characters, response.dialogues)?;

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for span in &spans {
            *counts.entry(span.character_name.as_str()).or_default() += 1;
        }
        for character in characters.iter_mut() {
            if let Some(count) = counts.get(character.name.as_str()) {
                character.dialogue_count += count;
            }
        }

        tracing::info!(
            spans = spans.len(),
            speakers = counts.len(),
            "Attributed dialogue segments"
        );

        Ok(spans)
    }
}

/// 校验并规范化外部返回的片段
fn normalize_spans(
    text: &str,
    characters: &[Character],
    dialogues: Vec<DialogueSpan>,
) -> Result<Vec<DialogueSpan>, PipelineError> {
    let text_length = text.chars().count();
    let mut spans = Vec::with_capacity(dialogues.len());

    for mut span in dialogues {
        if !characters.iter().any(|c| c.name == span.character_name) {
            return Err(PipelineError::attribution(format!(
                "span at {}..{} names unknown character: {}",
                span.start_index, span.end_index, span.character_name
            )));
        }
        if span.start_index >= span.end_index || span.end_index > text_length {
            return Err(PipelineError::attribution(format!(
                "span {}..{} is empty or outside text of {} chars",
                span.start_index, span.end_index, text_length
            )));
        }

        // 以原文为准重新截取
        span.text = slice_chars(text, span.start_index, span.end_index)
            .map(str::to_string)
            .ok_or_else(|| {
                PipelineError::attribution(format!(
                    "span {}..{} does not fall on character boundaries",
                    span.start_index, span.end_index
                ))
            })?;
        span.confidence = if span.confidence.is_nan() {
            0.0
        } else {
            span.confidence.clamp(0.0, 1.0)
        };
        span.emotion.get_or_insert(Emotion::Neutral);
        spans.push(span);
    }

    spans.sort_by_key(|span| span.start_index);

    if let Some(pair) = spans.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
        return Err(PipelineError::attribution(format!(
            "spans {}..{} and {}..{} overlap",
            pair[0].start_index, pair[0].end_index, pair[1].start_index, pair[1].end_index
        )));
    }

    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CharacterAnalysisRequest, CharacterAnalysisResponse, DialogueAnalysisResponse,
    };
    use async_trait::async_trait;

    struct ScriptedDialogue {
        dialogues: Vec<DialogueSpan>,
    }

    #[async_trait]
    impl TextAnalysisPort for ScriptedDialogue {
        async fn analyze_characters(
            &self,
            _request: CharacterAnalysisRequest,
        ) -> Result<CharacterAnalysisResponse, AnalysisError> {
            Ok(CharacterAnalysisResponse { characters: vec![] })
        }

        async fn analyze_dialogue(
            &self,
            request: DialogueAnalysisRequest,
        ) -> Result<DialogueAnalysisResponse, AnalysisError> {
            assert!(request.include_emotion);
            Ok(DialogueAnalysisResponse {
                dialogues: self.dialogues.clone(),
            })
        }
    }

    const TEXT: &str = "\"Hoist the sails!\" cried Ahab. \"Aye,\" said Starbuck.";

    fn span(name: &str, start: usize, end: usize) -> DialogueSpan {
        DialogueSpan {
            text: "stale".to_string(),
            character_name: name.to_string(),
            start_index: start,
            end_index: end,
            confidence: 1.7,
            emotion: None,
        }
    }

    fn roster() -> Vec<Character> {
        vec![
            Character::narrator("Narrator"),
            Character::new("Ahab"),
            Character::new("Starbuck"),
        ]
    }

    fn attributor(dialogues: Vec<DialogueSpan>) -> DialogueAttributor {
        DialogueAttributor::new(
            Arc::new(ScriptedDialogue { dialogues }),
            AttributorOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_spans_sorted_resliced_and_counted() {
        let mut characters = roster();
        let spans = attributor(vec![span("Starbuck", 31, 37), span("Ahab", 0, 18)])
            .attribute(TEXT, &mut characters)
            .await
            .unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].character_name, "Ahab");
        assert_eq!(spans[0].text, "\"Hoist the sails!\"");
        assert_eq!(spans[1].text, "\"Aye,\"");
        assert!(spans.iter().all(|s| s.confidence == 1.0));
        assert!(spans.iter().all(|s| s.emotion == Some(Emotion::Neutral)));

        assert_eq!(characters[0].dialogue_count, 0);
        assert_eq!(characters[1].dialogue_count, 1);
        assert_eq!(characters[2].dialogue_count, 1);
    }

    #[tokio::test]
    async fn test_empty_roster_is_attribution_error() {
        let result = attributor(vec![]).attribute(TEXT, &mut []).await;
        assert!(matches!(result, Err(PipelineError::Attribution(_))));
    }

    #[tokio::test]
    async fn test_unknown_character_fails_without_counting() {
        let mut characters = roster();
        let result = attributor(vec![span("Ahab", 0, 18), span("Queequeg", 31, 37)])
            .attribute(TEXT, &mut characters)
            .await;

        assert!(matches!(result, Err(PipelineError::Attribution(_))));
        assert!(characters.iter().all(|c| c.dialogue_count == 0));
    }

    #[tokio::test]
    async fn test_overlapping_spans_rejected() {
        let mut characters = roster();
        let result = attributor(vec![span("Ahab", 0, 18), span("Starbuck", 10, 20)])
            .attribute(TEXT, &mut characters)
            .await;
        assert!(matches!(result, Err(PipelineError::Attribution(_))));
    }

    #[tokio::test]
    async fn test_out_of_bounds_span_rejected() {
        let mut characters = roster();
        let result = attributor(vec![span("Ahab", 40, 400)])
            .attribute(TEXT, &mut characters)
            .await;
        assert!(matches!(result, Err(PipelineError::Attribution(_))));
    }

    #[tokio::test]
    async fn test_empty_text_is_invalid_input() {
        let mut characters = roster();
        let result = attributor(vec![]).attribute("", &mut characters).await;
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    /// 对白分析永不返回
    struct StalledDialogue;

    #[async_trait]
    impl TextAnalysisPort for StalledDialogue {
        async fn analyze_characters(
            &self,
            _request: CharacterAnalysisRequest,
        ) -> Result<CharacterAnalysisResponse, AnalysisError> {
            Ok(CharacterAnalysisResponse { characters: vec![] })
        }

        async fn analyze_dialogue(
            &self,
            _request: DialogueAnalysisRequest,
        ) -> Result<DialogueAnalysisResponse, AnalysisError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(DialogueAnalysisResponse { dialogues: vec![] })
        }
    }

    #[tokio::test]
    async fn test_timeout_is_retryable_and_leaves_counts() {
        let attributor = DialogueAttributor::new(
            Arc::new(StalledDialogue),
            AttributorOptions {
                timeout: Duration::from_millis(20),
                ..Default::default()
            },
        );
        let mut characters = roster();
        characters[1].dialogue_count = 7;

        let result = attributor.attribute(TEXT, &mut characters).await;

        match result {
            Err(err) => {
                assert!(matches!(err, PipelineError::ProviderUnavailable(_)));
                assert!(err.is_retryable());
            }
            Ok(spans) => panic!("unexpected spans: {spans:?}"),
        }
        assert_eq!(characters[0].dialogue_count, 0);
        assert_eq!(characters[1].dialogue_count, 7);
        assert_eq!(characters[2].dialogue_count, 0);
    }
}
