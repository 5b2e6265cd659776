//! In-Memory Voice Catalog Implementation

use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::application::ports::VoiceCatalogPort;
use crate::domain::voice::{VoiceError, VoiceId, VoiceProfile};

/// 内存音色目录
///
/// 档案存放在 DashMap 中，插入顺序单独记录；
/// 新档案先写入 map 再登记顺序，列表中出现的 ID 总能解析到完整档案
pub struct InMemoryVoiceCatalog {
    voices: DashMap<VoiceId, VoiceProfile>,
    order: RwLock<Vec<VoiceId>>,
    next_sequence: AtomicU64,
}

impl InMemoryVoiceCatalog {
    /// 以内置音色初始化
    pub fn new() -> Self {
        Self::with_voices(VoiceProfile::builtin_set())
    }

    pub fn with_voices(voices: Vec<VoiceProfile>) -> Self {
        let map = DashMap::new();
        let mut order = Vec::with_capacity(voices.len());
        for voice in voices {
            order.push(voice.voice_id().clone());
            map.insert(voice.voice_id().clone(), voice);
        }

        Self {
            next_sequence: AtomicU64::new(order.len() as u64 + 1),
            voices: map,
            order: RwLock::new(order),
        }
    }

    fn snapshot_order(&self) -> Vec<VoiceId> {
        match self.order.read() {
            Ok(order) => order.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for InMemoryVoiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceCatalogPort for InMemoryVoiceCatalog {
    fn list_voices(&self) -> Vec<VoiceProfile> {
        self.snapshot_order()
            .iter()
            .filter_map(|id| self.voices.get(id).map(|v| v.clone()))
            .collect()
    }

    fn resolve(&self, voice_id: &VoiceId) -> Result<VoiceProfile, VoiceError> {
        self.voices
            .get(voice_id)
            .map(|v| v.clone())
            .ok_or_else(|| VoiceError::NotFound(voice_id.clone()))
    }

    fn derive(
        &self,
        base_voice_id: &VoiceId,
        customizations: Map<String, Value>,
    ) -> Result<VoiceId, VoiceError> {
        if let Some(name) = customizations.get("name") {
            if !name.is_string() {
                return Err(VoiceError::InvalidCustomization(
                    "name must be a string".to_string(),
                ));
            }
        }

        let base = self.resolve(base_voice_id)?;

        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        let voice_id = VoiceId::custom(base_voice_id, sequence);
        let profile = VoiceProfile::derive(&base, voice_id.clone(), customizations);

        self.voices.insert(voice_id.clone(), profile);
        match self.order.write() {
            Ok(mut order) => order.push(voice_id.clone()),
            Err(poisoned) => poisoned.into_inner().push(voice_id.clone()),
        }

        tracing::info!(
            voice_id = %voice_id,
            base_voice_id = %base_voice_id,
            "Custom voice derived"
        );
        Ok(voice_id)
    }

    fn contains(&self, voice_id: &VoiceId) -> bool {
        self.voices.contains_key(voice_id)
    }

    fn len(&self) -> usize {
        self.voices.len()
    }
}
