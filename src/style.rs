//! 顯示樣式
//!
//! 畫面上的每一行都是一串 `Span`。TUI、詳細對話框與純文字報告共用同一套樣式，
//! 只在輸出時決定要不要加色碼。

use anyhow::Result;
use crossterm::{
    queue,
    style::{self, Attribute, Color},
};
use once_cell::sync::Lazy;
use std::io::Write;

use crate::highlight::Segment;
use crate::utils::{char_width, visual_width};

/// 終端是否支援 24-bit 真彩色（啟動時檢測一次）
static TRUE_COLOR: Lazy<bool> = Lazy::new(supports_true_color);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Normal,
    /// 次要文字（標籤、英文例句）
    Dim,
    /// 粗體標題
    Strong,
    /// 詞性標籤
    Badge,
    /// 高亮關鍵詞
    Keyword,
    /// 目前選取的關鍵詞
    Selected,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Normal)
    }

    pub fn width(&self) -> usize {
        visual_width(&self.text)
    }
}

pub type Line = Vec<Span>;

/// 把組合好的句子片段轉成 spans；`selected` 是第幾個高亮片段
pub fn segment_spans(segments: &[Segment<'_>], selected: Option<usize>) -> Vec<Span> {
    let mut highlight_idx = 0;
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Plain { text } => Span::plain(*text),
            Segment::Highlight { text, .. } => {
                let style = if selected == Some(highlight_idx) {
                    SpanStyle::Selected
                } else {
                    SpanStyle::Keyword
                };
                highlight_idx += 1;
                Span::new(*text, style)
            }
        })
        .collect()
}

/// 依視覺寬度把 spans 排成多行，盡量在空白處斷行並保留每段的樣式
pub fn wrap_spans(spans: &[Span], width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Line = Vec::new();
    let mut current_width = 0;

    for span in spans {
        for word in span.text.split_inclusive(' ') {
            let word_width = visual_width(word.trim_end());
            if current_width > 0 && current_width + word_width > width {
                lines.push(trim_line_end(std::mem::take(&mut current)));
                current_width = 0;
            }

            for ch in word.chars() {
                let w = char_width(ch);
                if current_width + w > width && ch != ' ' {
                    lines.push(trim_line_end(std::mem::take(&mut current)));
                    current_width = 0;
                }
                push_char(&mut current, ch, span.style);
                current_width += w;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(trim_line_end(current));
    }
    lines
}

fn push_char(line: &mut Line, ch: char, style: SpanStyle) {
    match line.last_mut() {
        Some(last) if last.style == style => last.text.push(ch),
        _ => line.push(Span::new(ch.to_string(), style)),
    }
}

/// 移除行尾空白（一般樣式的空白才移除，不影響高亮片段）
fn trim_line_end(mut line: Line) -> Line {
    while let Some(last) = line.last_mut() {
        if last.style != SpanStyle::Normal {
            break;
        }
        let trimmed_len = last.text.trim_end_matches(' ').len();
        last.text.truncate(trimmed_len);
        if last.text.is_empty() {
            line.pop();
        } else {
            break;
        }
    }
    line
}

/// 一行的視覺寬度
pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

/// 輸出一行；`color` 為 false 時以括號標示關鍵詞
pub fn write_line<W: Write>(out: &mut W, line: &[Span], color: bool) -> Result<()> {
    for span in line {
        if color {
            apply_style(out, span.style)?;
            queue!(out, style::Print(&span.text))?;
            queue!(out, style::SetAttribute(Attribute::Reset), style::ResetColor)?;
        } else {
            match span.style {
                SpanStyle::Keyword | SpanStyle::Selected => {
                    queue!(out, style::Print(format!("[{}]", span.text)))?
                }
                _ => queue!(out, style::Print(&span.text))?,
            }
        }
    }
    Ok(())
}

pub fn apply_style<W: Write>(out: &mut W, span_style: SpanStyle) -> Result<()> {
    match span_style {
        SpanStyle::Normal => {}
        SpanStyle::Dim => queue!(out, style::SetForegroundColor(Color::DarkGrey))?,
        SpanStyle::Strong => queue!(out, style::SetAttribute(Attribute::Bold))?,
        SpanStyle::Badge => queue!(
            out,
            style::SetAttribute(Attribute::Bold),
            style::SetBackgroundColor(Color::White),
            style::SetForegroundColor(Color::Black)
        )?,
        SpanStyle::Keyword => queue!(
            out,
            style::SetAttribute(Attribute::Bold),
            style::SetBackgroundColor(keyword_background()),
            style::SetForegroundColor(Color::Black)
        )?,
        SpanStyle::Selected => queue!(
            out,
            style::SetAttribute(Attribute::Bold),
            style::SetBackgroundColor(Color::DarkBlue),
            style::SetForegroundColor(Color::White)
        )?,
        SpanStyle::Error => queue!(out, style::SetForegroundColor(Color::Red))?,
    }
    Ok(())
}

fn keyword_background() -> Color {
    if *TRUE_COLOR {
        Color::Rgb {
            r: 229,
            g: 229,
            b: 229,
        }
    } else {
        Color::Grey
    }
}

/// 檢測終端是否支援 24-bit 真彩色
///
/// 檢測策略：
/// 1. 檢查 COLORTERM 環境變數
/// 2. 檢查 TERM 環境變數
/// 3. Windows Terminal
pub fn supports_true_color() -> bool {
    if let Ok(colorterm) = std::env::var("COLORTERM") {
        if colorterm == "truecolor" || colorterm == "24bit" {
            return true;
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        if term.contains("24bit") || term.contains("truecolor") {
            return true;
        }
        // iTerm2, Konsole, 等現代終端
        if term.contains("iterm") || term.contains("konsole") {
            return true;
        }
    }

    #[cfg(windows)]
    if std::env::var("WT_SESSION").is_ok() {
        return true;
    }

    // 預設：降級為 256 色
    false
}
