//! Command Handlers

mod synthesis_engine;

pub use synthesis_engine::{SynthesisEngine, MAX_SYNTHESIS_CHARS};
