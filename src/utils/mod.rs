mod logger;

pub use logger::init_logger;

use unicode_width::UnicodeWidthChar;

/// 計算字符串的視覺寬度（考慮寬字元）
/// 中文字元等寬字元會正確計算為 2，ASCII 字元計算為 1
pub fn visual_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// 計算單個字符的視覺寬度
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// 依視覺寬度截斷字串
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let w = char_width(ch);
        if width + w > max_width {
            return &s[..idx];
        }
        width += w;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("chat"), 4);
        assert_eq!(visual_width("été"), 3);
        assert_eq!(visual_width("苹果"), 4);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Bonjour", 3), "Bon");
        assert_eq!(truncate_to_width("苹果好吃", 5), "苹果");
        assert_eq!(truncate_to_width("chat", 10), "chat");
    }
}
