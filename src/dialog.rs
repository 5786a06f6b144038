// 對話框模組 - 關鍵詞詳細解析

use crate::model::KeywordAnnotation;
use crate::style::{wrap_spans, write_line, Line, Span, SpanStyle};
use crate::utils::{truncate_to_width, visual_width};
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Color},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// 對話框最大寬度
const MAX_WIDTH: usize = 72;

/// 排出詳細解析的內容行
pub fn detail_lines(annotation: &KeywordAnnotation, width: usize) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    let mut header = vec![Span::new(annotation.word.as_str(), SpanStyle::Strong)];
    let kind = annotation.kind.as_str();
    if !kind.is_empty() {
        header.push(Span::plain("  "));
        header.push(Span::new(format!(" {} ", kind), SpanStyle::Badge));
    }
    lines.extend(wrap_spans(&header, width));
    lines.push(Vec::new());

    lines.push(vec![Span::new("ANALYSIS", SpanStyle::Dim)]);
    if annotation.explanation.trim().is_empty() {
        lines.push(vec![Span::new("-", SpanStyle::Dim)]);
    } else {
        lines.extend(wrap_spans(&[Span::plain(annotation.explanation.as_str())], width));
    }
    lines.push(Vec::new());

    lines.push(vec![Span::new("VARIATION EXAMPLES", SpanStyle::Dim)]);
    if annotation.examples.is_empty() {
        lines.push(vec![Span::new("-", SpanStyle::Dim)]);
    }
    for (i, example) in annotation.examples.iter().enumerate() {
        if i > 0 {
            lines.push(Vec::new());
        }
        lines.extend(wrap_spans(&[Span::new(example.fr.as_str(), SpanStyle::Strong)], width));
        if !example.cn.is_empty() {
            lines.extend(wrap_spans(&[Span::plain(example.cn.as_str())], width));
        }
        if !example.en.is_empty() {
            lines.extend(wrap_spans(&[Span::new(example.en.as_str(), SpanStyle::Dim)], width));
        }
    }

    lines
}

/// 對話框在螢幕上的位置與大小
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    box_width: usize,
    body_height: usize,
    left: u16,
    top: u16,
    max_offset: usize,
}

impl Geometry {
    /// 外框佔 2 欄，左右內距各 1
    fn inner_width(cols: usize) -> usize {
        Self::box_width(cols).saturating_sub(4)
    }

    fn box_width(cols: usize) -> usize {
        cols.saturating_sub(4).clamp(16, MAX_WIDTH)
    }

    fn new(terminal_size: (u16, u16), line_count: usize) -> Self {
        let (cols, rows) = (terminal_size.0 as usize, terminal_size.1 as usize);
        let box_width = Self::box_width(cols);
        let body_height = line_count.min(rows.saturating_sub(4).max(1));
        Self {
            box_width,
            body_height,
            left: (cols.saturating_sub(box_width) / 2) as u16,
            top: (rows.saturating_sub(body_height + 2) / 2) as u16,
            max_offset: line_count.saturating_sub(body_height),
        }
    }
}

/// 顯示關鍵詞詳細解析，按 Esc / Enter / q / 空白鍵關閉
///
/// 視窗大小改變時依新尺寸重新排版。
pub fn show_detail(annotation: &KeywordAnnotation, terminal_size: (u16, u16)) -> Result<()> {
    let mut lines = detail_lines(annotation, Geometry::inner_width(terminal_size.0 as usize));
    let mut geometry = Geometry::new(terminal_size, lines.len());
    let mut offset = 0;

    execute!(io::stdout(), cursor::Hide)?;

    loop {
        let body = &lines[offset..offset + geometry.body_height];
        draw_box(body, geometry.left, geometry.top, geometry.box_width, geometry.max_offset > 0)?;

        // 讀取按鍵,只處理 Press 和 Repeat 事件
        loop {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press && key_event.kind != KeyEventKind::Repeat {
                        continue;
                    }

                    match key_event.code {
                        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
                            return Ok(());
                        }
                        KeyCode::Up => offset = offset.saturating_sub(1),
                        KeyCode::Down => offset = (offset + 1).min(geometry.max_offset),
                        _ => {}
                    }
                    break;
                }
                Event::Resize(cols, rows) => {
                    lines = detail_lines(annotation, Geometry::inner_width(cols as usize));
                    geometry = Geometry::new((cols, rows), lines.len());
                    offset = offset.min(geometry.max_offset);
                    execute!(io::stdout(), terminal::Clear(ClearType::All))?;
                    break;
                }
                _ => {}
            }
        }
    }
}

fn draw_box(body: &[Line], left: u16, top: u16, box_width: usize, scrollable: bool) -> Result<()> {
    let mut stdout = io::stdout();
    let inner = box_width.saturating_sub(2);

    let title = if scrollable { " ↑/↓ " } else { "" };
    let top_border = format!(
        "┌{}{}┐",
        title,
        "─".repeat(inner.saturating_sub(visual_width(title)))
    );
    queue!(
        stdout,
        cursor::MoveTo(left, top),
        style::SetForegroundColor(Color::DarkGrey),
        style::Print(top_border),
        style::ResetColor
    )?;

    for (i, line) in body.iter().enumerate() {
        let row = top + 1 + i as u16;
        queue!(
            stdout,
            cursor::MoveTo(left, row),
            style::SetForegroundColor(Color::DarkGrey),
            style::Print("│ "),
            style::ResetColor
        )?;

        let mut used = 0;
        let mut fitted = Vec::new();
        for span in line {
            let text = truncate_to_width(&span.text, inner.saturating_sub(2 + used));
            used += visual_width(text);
            fitted.push(Span::new(text, span.style));
        }
        write_line(&mut stdout, &fitted, true)?;

        // 填滿剩餘空間
        let remaining = inner.saturating_sub(1 + used);
        queue!(
            stdout,
            style::Print(" ".repeat(remaining)),
            style::SetForegroundColor(Color::DarkGrey),
            style::Print("│"),
            style::ResetColor
        )?;
    }

    let bottom = format!("└{}┘", "─".repeat(inner));
    queue!(
        stdout,
        cursor::MoveTo(left, top + 1 + body.len() as u16),
        style::SetForegroundColor(Color::DarkGrey),
        style::Print(bottom),
        style::ResetColor
    )?;

    stdout.flush()?;
    Ok(())
}
