//! 不分大小寫的字面子字串搜尋
//!
//! 以 Unicode 小寫折疊逐字比對，回傳原字串上的位元組範圍，
//! 因此切出來的片段保留原本的大小寫。

use std::ops::Range;

/// 找出 `needle` 在 `haystack` 中所有不重疊的出現位置（由左至右）
///
/// 空的 `needle` 不匹配任何位置。
pub fn find_all_ignore_case(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let mut matches = Vec::new();

    if folded.is_empty() {
        return matches;
    }

    let mut start = 0;
    while start < haystack.len() {
        if let Some(len) = match_len_at(&haystack[start..], &folded) {
            matches.push(start..start + len);
            start += len;
        } else {
            // 前進一個字元（保持在 char 邊界上）
            start += haystack[start..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
        }
    }

    matches
}

/// 若 `text` 開頭匹配折疊後的 `folded`，回傳匹配的位元組長度
fn match_len_at(text: &str, folded: &[char]) -> Option<usize> {
    let mut pos = 0; // folded 中已比對的字元數

    for (idx, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            if folded.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
        if pos == folded.len() {
            return Some(idx + ch.len_utf8());
        }
    }

    None
}
