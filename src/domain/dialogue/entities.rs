//! Dialogue Context - Entities

use serde::{Deserialize, Serialize};

use crate::domain::Emotion;

/// 对白片段 - 归属到某个角色的一段原文
///
/// 不变量:
/// - 0 <= start_index < end_index <= 原文字符数（半开区间，按 Unicode 标量计数）
/// - text 等于原文中 [start_index, end_index) 的子串
/// - 同一次分析内的片段互不重叠，按 start_index 升序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueSpan {
    pub text: String,
    pub character_name: String,
    pub start_index: usize,
    pub end_index: usize,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub emotion: Option<Emotion>,
}

impl DialogueSpan {
    /// 片段长度（字符数）
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否与另一片段重叠
    pub fn overlaps(&self, other: &DialogueSpan) -> bool {
        self.start_index < other.end_index && other.start_index < self.end_index
    }
}

/// 按字符偏移截取子串，越界返回 None
pub fn slice_chars(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let mut byte_start = None;
    let mut byte_end = None;
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == start {
            byte_start = Some(byte_idx);
        }
        if count == end {
            byte_end = Some(byte_idx);
            break;
        }
    }
    let total = text.chars().count();
    if start == total {
        byte_start = Some(text.len());
    }
    if end == total {
        byte_end = Some(text.len());
    }
    match (byte_start, byte_end) {
        (Some(s), Some(e)) => Some(&text[s..e]),
        _ => None,
    }
}
