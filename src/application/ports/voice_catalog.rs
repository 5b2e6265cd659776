//! Voice Catalog Port - 音色目录
//!
//! 进程级共享的音色集合，只追加不删除

use serde_json::{Map, Value};

use crate::domain::voice::{VoiceError, VoiceId, VoiceProfile};

/// Voice Catalog Port
///
/// 并发要求:
/// - derive 分配的 ID 在并发调用下不冲突
/// - 读操作与写操作可并发，读到的单个档案总是完整的
pub trait VoiceCatalogPort: Send + Sync {
    /// 按插入顺序列出音色（内置在前）
    fn list_voices(&self) -> Vec<VoiceProfile>;

    /// 按 ID 查找音色
    fn resolve(&self, voice_id: &VoiceId) -> Result<VoiceProfile, VoiceError>;

    /// 基于已有音色派生新音色，返回新 ID
    fn derive(
        &self,
        base_voice_id: &VoiceId,
        customizations: Map<String, Value>,
    ) -> Result<VoiceId, VoiceError>;

    /// 音色是否存在
    fn contains(&self, voice_id: &VoiceId) -> bool {
        self.resolve(voice_id).is_ok()
    }

    /// 音色数量
    fn len(&self) -> usize {
        self.list_voices().len()
    }
}
