//! Analysis Adapter - 文本理解服务实现

mod http_analysis_client;
mod local_analysis_provider;

pub use http_analysis_client::{HttpAnalysisClient, HttpAnalysisClientConfig};
pub use local_analysis_provider::LocalAnalysisProvider;
