//! Pipeline Orchestrator - 文本 → 角色 → 对白 → 音色推荐
//!
//! 任一阶段失败即返回该错误，不返回部分结果。
//! 合成不属于 run，由调用方按角色/音色选择单独发起。

use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::analysis::{
    CharacterAnalyzer, DialogueAttributor, SuggestionMap, VoiceRecommender,
};
use crate::application::commands::handlers::SynthesisEngine;
use crate::application::commands::SynthesizeSpeech;
use crate::application::error::PipelineError;
use crate::domain::character::Character;
use crate::domain::dialogue::DialogueSpan;
use crate::domain::voice::AudioArtifact;

/// 一次分析的完整结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub characters: Vec<Character>,
    pub dialogue_spans: Vec<DialogueSpan>,
    pub suggestions: SuggestionMap,
    /// 角色/对白是否由本地启发式生成
    pub degraded: bool,
}

/// 某个角色选定的音色与原始参数
#[derive(Debug, Clone)]
pub struct VoiceChoice {
    pub voice_id: String,
    pub parameters: Map<String, Value>,
}

impl VoiceChoice {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            parameters: Map::new(),
        }
    }
}

/// 流水线编排器
///
/// 每次 run 只持有本次调用的数据，不同文本的 run 可完全并行
pub struct PipelineOrchestrator {
    analyzer: CharacterAnalyzer,
    attributor: DialogueAttributor,
    recommender: VoiceRecommender,
    engine: Arc<SynthesisEngine>,
}

impl PipelineOrchestrator {
    pub fn new(
        analyzer: CharacterAnalyzer,
        attributor: DialogueAttributor,
        recommender: VoiceRecommender,
        engine: Arc<SynthesisEngine>,
    ) -> Self {
        Self {
            analyzer,
            attributor,
            recommender,
            engine,
        }
    }

    pub fn engine(&self) -> &Arc<SynthesisEngine> {
        &self.engine
    }

    /// analyze → attribute → recommend
    pub async fn run(&self, text: &str) -> Result<PipelineReport, PipelineError> {
        let roster = self.analyzer.identify(text).await?;
        let mut characters = roster.characters;

        let dialogue_spans = self.attributor.attribute(text, &mut characters).await?;
        let suggestions = self.recommender.suggest(&characters)?;

        tracing::info!(
            characters = characters.len(),
            spans = dialogue_spans.len(),
            degraded = roster.degraded,
            "Pipeline run completed"
        );

        Ok(PipelineReport {
            characters,
            dialogue_spans,
            suggestions,
            degraded: roster.degraded,
        })
    }

    /// 可取消的 run，取消后放弃进行中的外部调用
    pub async fn run_cancellable(
        &self,
        text: &str,
        token: &CancellationToken,
    ) -> Result<PipelineReport, PipelineError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::warn!("Pipeline run cancelled");
                Err(PipelineError::Cancelled)
            }
            result = self.run(text) => result,
        }
    }

    /// 按角色的音色选择并发渲染对白片段
    ///
    /// 缺少音色选择的角色在任何合成开始前即报错；
    /// 选择中未指定 emotion 时沿用片段自身的情绪
    pub async fn render_spans(
        &self,
        spans: &[DialogueSpan],
        choices: &HashMap<String, VoiceChoice>,
    ) -> Result<Vec<AudioArtifact>, PipelineError> {
        let commands = spans
            .iter()
            .map(|span| {
                let choice = choices.get(&span.character_name).ok_or_else(|| {
                    PipelineError::invalid_input(format!(
                        "no voice chosen for character: {}",
                        span.character_name
                    ))
                })?;

                let mut parameters = choice.parameters.clone();
                if let Some(emotion) = span.emotion {
                    parameters
                        .entry("emotion")
                        .or_insert_with(|| Value::String(emotion.as_str().to_string()));
                }

                Ok(SynthesizeSpeech::new(span.text.clone(), choice.voice_id.clone())
                    .with_parameters(parameters))
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;

        let artifacts =
            try_join_all(commands.into_iter().map(|command| self.engine.synthesize(command)))
                .await?;

        tracing::info!(artifacts = artifacts.len(), "Rendered dialogue spans");
        Ok(artifacts)
    }
}
