//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色档案（内置 / 派生）
//! - 合成参数校验
//! - 音色推荐与合成产物

mod aggregate;
mod artifact;
mod errors;
mod parameters;
mod value_objects;

pub use aggregate::VoiceProfile;
pub use artifact::{estimate_duration, AudioArtifact, WORDS_PER_MINUTE};
pub use errors::VoiceError;
pub use parameters::{ParameterValidator, SynthesisParameters, PITCH_RANGE, SPEED_RANGE};
pub use value_objects::{AudioFormat, VoiceId, VoiceSuggestion};
