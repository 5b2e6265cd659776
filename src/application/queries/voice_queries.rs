//! Voice Queries

use crate::domain::character::Character;

/// 获取音色详情查询
#[derive(Debug, Clone)]
pub struct GetVoice {
    pub voice_id: String,
}

/// 列出所有音色查询
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 为角色推荐音色查询
#[derive(Debug, Clone)]
pub struct SuggestVoices {
    pub characters: Vec<Character>,
}
