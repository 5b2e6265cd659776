//! Query Handlers

mod voice_handlers;

pub use voice_handlers::{
    GetVoiceHandler, ListVoicesHandler, SuggestVoicesHandler, VoiceResponse,
};
