//! 非互動模式的純文字報告

use crate::model::AnalysisResult;
use crate::style::{segment_spans, write_line, Span, SpanStyle};
use anyhow::Result;
use std::io::Write;

/// 輸出整份分析報告；`color` 為 false 時關鍵詞以 `[word]` 標示
pub fn write_report<W: Write>(out: &mut W, result: &AnalysisResult, color: bool) -> Result<()> {
    let segments = result.segments();
    write_line(out, &segment_spans(&segments, None), color)?;
    writeln!(out)?;
    writeln!(out)?;

    heading(out, "CHINESE MEANING", color)?;
    writeln!(out, "{}", result.chinese_translation)?;
    writeln!(out)?;

    let english = &result.english_analysis;
    heading(out, "STRUCTURE PIVOT (ENGLISH)", color)?;
    if let Some(literal) = english.literal() {
        writeln!(out, "{}", literal)?;
    }
    if let Some(grammar) = english.grammar_en() {
        writeln!(out, "EN: {}", grammar)?;
    }
    writeln!(out, "CN: {}", english.grammar_cn())?;

    let keywords: Vec<_> = result
        .keywords
        .iter()
        .filter(|k| !k.word.is_empty())
        .collect();
    if keywords.is_empty() {
        out.flush()?;
        return Ok(());
    }

    writeln!(out)?;
    heading(out, "KEYWORDS", color)?;
    for keyword in keywords {
        writeln!(out)?;
        let mut header = vec![Span::new(keyword.word.as_str(), SpanStyle::Strong)];
        if !keyword.kind.as_str().is_empty() {
            header.push(Span::plain(format!(" ({})", keyword.kind)));
        }
        write_line(out, &header, color)?;
        writeln!(out)?;

        if !keyword.explanation.is_empty() {
            writeln!(out, "  {}", keyword.explanation)?;
        }
        for example in &keyword.examples {
            writeln!(out, "  - {}", example.fr)?;
            if !example.cn.is_empty() {
                writeln!(out, "    {}", example.cn)?;
            }
            if !example.en.is_empty() {
                writeln!(out, "    {}", example.en)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn heading<W: Write>(out: &mut W, title: &str, color: bool) -> Result<()> {
    write_line(out, &[Span::new(title, SpanStyle::Dim)], color)?;
    writeln!(out)?;
    Ok(())
}
