//! 互動句子組合器
//!
//! 依關鍵詞順序逐一切分仍為純文字的片段。已高亮的片段不會再被掃描，
//! 所以排在前面的關鍵詞優先佔用字元（例如 "pomme" 先於 "pommes"）。

use super::matcher::find_all_ignore_case;
use crate::model::KeywordAnnotation;

/// 句子的一段連續文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 一般文字
    Plain { text: &'a str },
    /// 高亮文字，附帶產生它的關鍵詞
    Highlight {
        text: &'a str,
        annotation: &'a KeywordAnnotation,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain { text } | Segment::Highlight { text, .. } => *text,
        }
    }

    pub fn annotation(&self) -> Option<&'a KeywordAnnotation> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Highlight { annotation, .. } => Some(*annotation),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }
}

/// 把句子依關鍵詞切成片段
///
/// 空的 `word` 直接略過；找不到的關鍵詞不產生高亮。
/// 無論輸入為何，片段文字依序串接必定等於原句。
pub fn compose<'a>(sentence: &'a str, annotations: &'a [KeywordAnnotation]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    if !sentence.is_empty() {
        segments.push(Segment::Plain { text: sentence });
    }

    for annotation in annotations {
        if annotation.word.is_empty() {
            log::debug!("skipping keyword with empty word");
            continue;
        }

        let mut next = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Plain { text } => split_plain(text, annotation, &mut next),
                highlighted => next.push(highlighted),
            }
        }
        segments = next;
    }

    segments
}

/// 把單一純文字片段依關鍵詞切開，空片段不輸出
fn split_plain<'a>(text: &'a str, annotation: &'a KeywordAnnotation, out: &mut Vec<Segment<'a>>) {
    let mut last = 0;

    for range in find_all_ignore_case(text, &annotation.word) {
        if range.start > last {
            out.push(Segment::Plain {
                text: &text[last..range.start],
            });
        }
        out.push(Segment::Highlight {
            text: &text[range.clone()],
            annotation,
        });
        last = range.end;
    }

    if last < text.len() {
        out.push(Segment::Plain { text: &text[last..] });
    }
}

/// 依序取出所有高亮片段
pub fn highlighted<'s, 'a>(segments: &'s [Segment<'a>]) -> impl Iterator<Item = &'s Segment<'a>> {
    segments.iter().filter(|s| s.is_highlighted())
}

/// 串接所有片段文字
pub fn reconstruct(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeywordType;

    fn kw(word: &str) -> KeywordAnnotation {
        KeywordAnnotation::new(word, KeywordType::Noun)
    }

    fn texts<'a>(segments: &[Segment<'a>]) -> Vec<(&'a str, bool)> {
        segments
            .iter()
            .map(|s| (s.text(), s.is_highlighted()))
            .collect()
    }

    #[test]
    fn test_empty_annotations_single_plain() {
        let segments = compose("Je mange une pomme.", &[]);
        assert_eq!(
            segments,
            vec![Segment::Plain {
                text: "Je mange une pomme."
            }]
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let keywords = vec![kw("fromage"), kw("mangé")];
        let segments = compose("Je mange une pomme.", &keywords);
        assert_eq!(texts(&segments), vec![("Je mange une pomme.", false)]);
    }

    #[test]
    fn test_case_preserved() {
        let keywords = vec![kw("le")];
        let segments = compose("Le chat", &keywords);
        assert_eq!(texts(&segments), vec![("Le", true), (" chat", false)]);
        assert!(std::ptr::eq(
            segments[0].annotation().unwrap(),
            &keywords[0]
        ));
    }

    #[test]
    fn test_multiple_occurrences_share_annotation() {
        let keywords = vec![kw("chien")];
        let segments = compose("Le chien voit le chien", &keywords);
        let hits: Vec<_> = highlighted(&segments).collect();
        assert_eq!(hits.len(), 2);
        for hit in hits {
            assert_eq!(hit.text(), "chien");
            assert!(std::ptr::eq(hit.annotation().unwrap(), &keywords[0]));
        }
    }

    #[test]
    fn test_first_annotation_claims_shared_prefix() {
        let keywords = vec![kw("pomme"), kw("pommes")];
        let segments = compose("pomme pommes", &keywords);
        assert_eq!(
            texts(&segments),
            vec![("pomme", true), (" ", false), ("pomme", true), ("s", false)]
        );
        for hit in highlighted(&segments) {
            assert!(std::ptr::eq(hit.annotation().unwrap(), &keywords[0]));
        }
    }

    #[test]
    fn test_reversed_order_changes_precedence() {
        let keywords = vec![kw("pommes"), kw("pomme")];
        let segments = compose("pomme pommes", &keywords);
        assert_eq!(
            texts(&segments),
            vec![("pomme", true), (" ", false), ("pommes", true)]
        );
        assert!(std::ptr::eq(
            segments[0].annotation().unwrap(),
            &keywords[1]
        ));
        assert!(std::ptr::eq(
            segments[2].annotation().unwrap(),
            &keywords[0]
        ));
    }

    #[test]
    fn test_highlighted_regions_not_rescanned() {
        // "mange" 先佔用，之後的 "an" 只能匹配剩下的純文字
        let keywords = vec![kw("mange"), kw("an")];
        let segments = compose("Je mange du pain", &keywords);
        assert_eq!(
            texts(&segments),
            vec![
                ("Je ", false),
                ("mange", true),
                (" du pain", false),
            ]
        );
    }

    #[test]
    fn test_no_word_boundary_required() {
        let keywords = vec![kw("ai")];
        let segments = compose("Du pain", &keywords);
        assert_eq!(
            texts(&segments),
            vec![("Du p", false), ("ai", true), ("n", false)]
        );
    }

    #[test]
    fn test_empty_word_skipped() {
        let keywords = vec![kw(""), kw("chat")];
        let with_empty = compose("Le chat dort", &keywords);
        let without = compose("Le chat dort", &keywords[1..]);
        assert_eq!(with_empty, without);
        assert_eq!(
            texts(&with_empty),
            vec![("Le ", false), ("chat", true), (" dort", false)]
        );
    }

    #[test]
    fn test_whole_sentence_match_has_no_empty_plain() {
        let keywords = vec![kw("bonjour")];
        let segments = compose("Bonjour", &keywords);
        assert_eq!(texts(&segments), vec![("Bonjour", true)]);
    }

    #[test]
    fn test_adjacent_matches_have_no_empty_plain() {
        let keywords = vec![kw("ha")];
        let segments = compose("hahaha", &keywords);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.is_highlighted() && !s.text().is_empty()));
    }

    #[test]
    fn test_empty_sentence() {
        let keywords = vec![kw("chat")];
        assert!(compose("", &keywords).is_empty());
    }

    #[test]
    fn test_accented_keyword_matches_uppercase() {
        let keywords = vec![kw("été")];
        let segments = compose("ÉTÉ comme été", &keywords);
        let hits: Vec<&str> = highlighted(&segments).map(|s| s.text()).collect();
        assert_eq!(hits, vec!["ÉTÉ", "été"]);
    }

    #[test]
    fn test_reconstruction_holds() {
        let sentences = [
            "Je suis allé au cinéma.",
            "J'aime la pomme, les pommes et LA POMME !",
            "Qu'est-ce que c'est ?",
            "ÉTÉ été Été",
            "aaaa",
            "  espaces  ",
        ];
        let keyword_sets: Vec<Vec<KeywordAnnotation>> = vec![
            vec![],
            vec![kw("")],
            vec![kw("pomme"), kw("pommes"), kw("la")],
            vec![kw("été"), kw("é")],
            vec![kw("a"), kw("aa")],
            vec![kw(" "), kw("s")],
            vec![kw("introuvable")],
            vec![kw("?"), kw("'"), kw("-")],
        ];

        for sentence in sentences {
            for keywords in &keyword_sets {
                let segments = compose(sentence, keywords);
                assert_eq!(reconstruct(&segments), sentence, "keywords: {:?}", keywords);
                assert!(segments.iter().all(|s| !s.text().is_empty()));
            }
        }
    }
}
