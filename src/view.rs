use crate::app::AppState;
use crate::config::Config;
use crate::input::Focus;
use crate::style::{line_width, segment_spans, wrap_spans, write_line, Line, Span, SpanStyle};
use crate::terminal::Terminal;
use crate::utils::{truncate_to_width, visual_width};
use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{self, Color},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// 左右留白
const MARGIN: usize = 2;

const TITLE: &str = " 法语结构透视助手 ";
const PLACEHOLDER: &str = "请输入法语内容，例如：Je suis allé au cinéma.";

/// 排版結果：每一行內容與輸入游標位置 (col, row)
pub struct Layout {
    pub lines: Vec<Line>,
    pub cursor: Option<(usize, usize)>,
}

pub struct View {
    pub screen_rows: usize,
    pub screen_cols: usize,
}

impl View {
    pub fn new(terminal: &Terminal) -> Self {
        let (cols, rows) = terminal.size();
        Self::with_size(cols as usize, rows as usize)
    }

    pub fn with_size(cols: usize, rows: usize) -> Self {
        Self {
            screen_rows: rows.saturating_sub(1), // 減去狀態欄
            screen_cols: cols,
        }
    }

    pub fn update_size(&mut self, terminal: &Terminal) {
        let (cols, rows) = terminal.size();
        self.screen_rows = (rows as usize).saturating_sub(1);
        self.screen_cols = cols as usize;
    }

    /// 可用的內容寬度
    fn content_width(&self) -> usize {
        self.screen_cols.saturating_sub(MARGIN * 2).max(10)
    }

    pub fn render(&mut self, state: &AppState, config: &Config) -> Result<()> {
        let layout = self.layout(state, config);
        let mut stdout = io::stdout();

        // 隱藏光標
        execute!(stdout, cursor::Hide)?;

        let margin = " ".repeat(MARGIN);
        for screen_row in 0..self.screen_rows {
            queue!(stdout, cursor::MoveTo(0, screen_row as u16))?;
            if let Some(line) = layout.lines.get(screen_row) {
                queue!(stdout, style::Print(&margin))?;
                let fitted = fit_line(line, self.content_width());
                write_line(&mut stdout, &fitted, true)?;
            }
            // 清除行的剩餘部分
            queue!(stdout, Clear(ClearType::UntilNewLine))?;
        }

        self.render_status_bar(state)?;

        match layout.cursor {
            Some((col, row)) if row < self.screen_rows && !state.loading => {
                execute!(stdout, cursor::MoveTo(col as u16, row as u16))?;
                execute!(stdout, cursor::Show)?;
            }
            _ => Terminal::hide_cursor()?,
        }

        stdout.flush()?;
        Ok(())
    }

    /// 排版整個畫面（不輸出）
    pub fn layout(&self, state: &AppState, config: &Config) -> Layout {
        let width = self.content_width();
        let mut lines: Vec<Line> = Vec::new();

        lines.push(vec![
            Span::new(TITLE, SpanStyle::Badge),
            Span::new("  FRLENS", SpanStyle::Dim),
        ]);
        lines.push(Vec::new());

        // 輸入框
        let mut label = vec![Span::new("INPUT SOURCE", SpanStyle::Dim)];
        if !state.input.is_empty() {
            label.push(Span::new("   Ctrl+L CLEAR", SpanStyle::Dim));
        }
        lines.push(label);

        let input_lines = if state.input.is_empty() {
            vec![vec![Span::new(PLACEHOLDER, SpanStyle::Dim)]]
        } else {
            wrap_spans(&[Span::plain(state.input.as_str())], width)
        };
        let cursor = if state.focus == Focus::Input {
            let row = lines.len() + input_lines.len() - 1;
            let col = if state.input.is_empty() {
                0
            } else {
                let trailing = state.input.len() - state.input.trim_end_matches(' ').len();
                input_lines
                    .last()
                    .map(|l| line_width(l))
                    .unwrap_or(0)
                    + trailing
            };
            Some((MARGIN + col.min(width), row))
        } else {
            None
        };
        lines.extend(input_lines);

        // 字數與送出按鈕
        let count = state.input.chars().count();
        let counter_style = if count > config.warn_chars {
            SpanStyle::Error
        } else {
            SpanStyle::Dim
        };
        let action = if state.loading {
            "ANALYZING..."
        } else {
            "Enter  ANALYZE STRUCTURE →"
        };
        lines.push(vec![
            Span::new(format!("{} / {} CHARS", count, config.max_chars), counter_style),
            Span::plain("    "),
            Span::new(action, SpanStyle::Strong),
        ]);

        if let Some(error) = &state.error {
            lines.extend(wrap_spans(
                &[Span::new(format!("● {}", error), SpanStyle::Error)],
                width,
            ));
        }
        lines.push(Vec::new());

        if let Some(result) = &state.result {
            let segments = result.segments();
            let selected = (state.focus == Focus::Sentence).then_some(state.selected);
            lines.extend(wrap_spans(&segment_spans(&segments, selected), width));

            let hint = if state.highlight_count() == 0 {
                "No highlighted words"
            } else if state.focus == Focus::Sentence {
                "←/→ select  Enter expand  Esc back"
            } else {
                "Tab: select highlighted words to expand"
            };
            lines.push(vec![Span::new(hint, SpanStyle::Dim)]);
            lines.push(Vec::new());

            lines.push(vec![Span::new("CHINESE MEANING", SpanStyle::Dim)]);
            lines.extend(wrap_spans(
                &[Span::plain(result.chinese_translation.as_str())],
                width,
            ));
            lines.push(Vec::new());

            let english = &result.english_analysis;
            lines.push(vec![Span::new("STRUCTURE PIVOT (ENGLISH)", SpanStyle::Dim)]);
            if let Some(literal) = english.literal() {
                lines.extend(wrap_spans(&[Span::new(literal, SpanStyle::Strong)], width));
            }
            if let Some(grammar) = english.grammar_en() {
                lines.extend(wrap_spans(
                    &[Span::new("EN", SpanStyle::Badge), Span::plain(format!(" {}", grammar))],
                    width,
                ));
            }
            lines.extend(wrap_spans(
                &[
                    Span::new("CN", SpanStyle::Badge),
                    Span::plain(format!(" {}", english.grammar_cn())),
                ],
                width,
            ));
        }

        Layout { lines, cursor }
    }

    fn render_status_bar(&self, state: &AppState) -> Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, self.screen_rows as u16))?;

        queue!(stdout, style::SetBackgroundColor(Color::DarkGrey))?;
        queue!(stdout, style::SetForegroundColor(Color::White))?;

        let status = if let Some(msg) = &state.message {
            // 如果有消息，優先顯示消息
            format!(" {}", msg)
        } else {
            match state.focus {
                Focus::Input => " Enter:Analyze  Tab:Keywords  Ctrl+L:Clear  Ctrl+Q:Quit".to_string(),
                Focus::Sentence => {
                    format!(
                        " Keyword {}/{}  Enter:Expand  Esc:Input  Ctrl+Q:Quit",
                        state.selected + 1,
                        state.highlight_count()
                    )
                }
            }
        };

        // 確保狀態欄填滿整行
        let status = truncate_to_width(&status, self.screen_cols);
        let padding = self.screen_cols.saturating_sub(visual_width(status));
        queue!(stdout, style::Print(status))?;
        queue!(stdout, style::Print(" ".repeat(padding)))?;
        queue!(stdout, style::ResetColor)?;

        Ok(())
    }
}

/// 截斷超出寬度的行
fn fit_line(line: &[Span], max_width: usize) -> Line {
    let mut fitted = Vec::new();
    let mut width = 0;

    for span in line {
        let remaining = max_width.saturating_sub(width);
        if remaining == 0 {
            break;
        }
        let text = truncate_to_width(&span.text, remaining);
        width += visual_width(text);
        fitted.push(Span::new(text, span.style));
    }

    fitted
}
