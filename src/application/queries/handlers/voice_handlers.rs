//! Voice Query Handlers

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::application::analysis::{SuggestionMap, VoiceRecommender};
use crate::application::error::PipelineError;
use crate::application::ports::VoiceCatalogPort;
use crate::application::queries::{GetVoice, ListVoices, SuggestVoices};
use crate::domain::character::Gender;
use crate::domain::voice::{VoiceId, VoiceProfile};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色详情响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceResponse {
    pub voice_id: String,
    pub name: String,
    pub gender: Gender,
    pub language: String,
    pub is_custom: bool,
    pub base_voice_id: Option<String>,
    /// 派生时传入的定制项，内置音色为空
    pub customizations: Map<String, Value>,
    pub created_at: String,
}

impl From<VoiceProfile> for VoiceResponse {
    fn from(profile: VoiceProfile) -> Self {
        Self {
            voice_id: profile.voice_id().to_string(),
            name: profile.name().to_string(),
            gender: profile.gender(),
            language: profile.language().to_string(),
            is_custom: profile.is_custom(),
            base_voice_id: profile.base_voice_id().map(VoiceId::to_string),
            customizations: profile.customizations().clone(),
            created_at: profile.created_at().to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetVoice Handler
pub struct GetVoiceHandler {
    catalog: Arc<dyn VoiceCatalogPort>,
}

impl GetVoiceHandler {
    pub fn new(catalog: Arc<dyn VoiceCatalogPort>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetVoice) -> Result<VoiceResponse, PipelineError> {
        let voice_id = VoiceId::new(query.voice_id).map_err(PipelineError::invalid_input)?;
        let voice = self.catalog.resolve(&voice_id)?;
        Ok(VoiceResponse::from(voice))
    }
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    catalog: Arc<dyn VoiceCatalogPort>,
}

impl ListVoicesHandler {
    pub fn new(catalog: Arc<dyn VoiceCatalogPort>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: ListVoices) -> Vec<VoiceResponse> {
        self.catalog
            .list_voices()
            .into_iter()
            .map(VoiceResponse::from)
            .collect()
    }
}

/// SuggestVoices Handler
pub struct SuggestVoicesHandler {
    recommender: VoiceRecommender,
}

impl SuggestVoicesHandler {
    pub fn new(recommender: VoiceRecommender) -> Self {
        Self { recommender }
    }

    pub fn handle(&self, query: SuggestVoices) -> Result<SuggestionMap, PipelineError> {
        self.recommender.suggest(&query.characters)
    }
}
