//! Incremental highlighting for one open document
//!
//! A [`Document`] owns the text of a buffer together with its token spans.
//! Edits re-lex only the region that can have changed: scanning restarts at
//! a token boundary far enough before the edit that no earlier token could
//! have looked into it, and stops once a fresh token boundary lands on a
//! (shifted) old boundary past the edit. From such a boundary on, the text is
//! unchanged and the scanner carries no state, so the old tail is reused.

use std::ops::Range;

use tracing::{debug, trace};

use crate::error::{HighlightError, Result};

use super::highlight::Theme;
use super::keywords::MAX_LOOKAHEAD;
use super::source::SourceBuffer;
use super::style::Span;
use super::tokens::{Token, TokenKind};

/// A token without its text, as stored by a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl From<Token<'_>> for TokenSpan {
    fn from(token: Token<'_>) -> Self {
        Self {
            kind: token.kind,
            start: token.start,
            end: token.end,
        }
    }
}

/// Replace the bytes in `range` with `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    /// Insert `text` at `offset`
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            range: offset..offset,
            text: text.into(),
        }
    }

    /// Delete the bytes in `range`
    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }

    /// Replace the bytes in `range` with `text`
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Text of one buffer plus its current tokens
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    tokens: Vec<TokenSpan>,
}

impl Document {
    /// Create a document and lex all of it
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = SourceBuffer::new(&text).scan().map(TokenSpan::from).collect();
        Self { text, tokens }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current token spans
    pub fn token_spans(&self) -> &[TokenSpan] {
        &self.tokens
    }

    /// Current tokens, with their text
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.tokens.iter().map(move |span| Token {
            kind: span.kind,
            text: &self.text[span.start..span.end],
            start: span.start,
            end: span.end,
        })
    }

    /// Token covering a byte offset
    pub fn token_at(&self, offset: usize) -> Option<Token<'_>> {
        let idx = self.tokens.partition_point(|t| t.end <= offset);
        let span = self.tokens.get(idx)?;
        Some(Token {
            kind: span.kind,
            text: &self.text[span.start..span.end],
            start: span.start,
            end: span.end,
        })
    }

    /// Styled spans for the tokens overlapping `range`
    ///
    /// Plain tokens are skipped, as in [`highlight`](super::highlight::highlight).
    pub fn spans_in(&self, range: Range<usize>, theme: &Theme) -> Vec<Span> {
        let first = self.tokens.partition_point(|t| t.end <= range.start);
        self.tokens[first..]
            .iter()
            .take_while(|t| t.start < range.end)
            .filter_map(|t| {
                let style = theme.style_for(t.kind);
                (!style.is_default()).then(|| Span::new(t.start, t.end, style))
            })
            .collect()
    }

    /// Apply an edit and re-lex what it touched
    ///
    /// Returns the byte range, in the new text, whose tokens were rebuilt.
    pub fn apply_edit(&mut self, edit: &TextEdit) -> Result<Range<usize>> {
        let (start, end) = (edit.range.start, edit.range.end);
        if start > end
            || end > self.text.len()
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return Err(HighlightError::InvalidEdit {
                start,
                end,
                len: self.text.len(),
            });
        }

        self.text.replace_range(start..end, &edit.text);
        let delta = edit.text.len() as isize - (end - start) as isize;

        // Tokens that end far enough before the edit cannot have seen it.
        let keep = self
            .tokens
            .partition_point(|t| t.end + MAX_LOOKAHEAD <= start);
        let restart = keep.checked_sub(1).map_or(0, |i| self.tokens[i].end);

        // Old boundaries at or past the edit end are resync candidates.
        let old_tail = self.tokens.split_off(keep);
        let mut candidate = old_tail.partition_point(|t| t.start < end);
        let shifted = |t: &TokenSpan| (t.start as isize + delta) as usize;

        let mut relexed = 0;
        let mut resync_end = self.text.len();
        let mut reused: &[TokenSpan] = &[];
        for token in SourceBuffer::new(&self.text).scan_from(restart) {
            self.tokens.push(token.into());
            relexed += 1;
            while candidate < old_tail.len() && shifted(&old_tail[candidate]) < token.end {
                candidate += 1;
            }
            if candidate < old_tail.len() && shifted(&old_tail[candidate]) == token.end {
                resync_end = token.end;
                reused = &old_tail[candidate..];
                break;
            }
        }

        self.tokens.extend(reused.iter().map(|t| TokenSpan {
            kind: t.kind,
            start: shifted(t),
            end: (t.end as isize + delta) as usize,
        }));

        debug!(
            edit_start = start,
            edit_end = end,
            inserted = edit.text.len(),
            restart,
            relexed,
            reused = reused.len(),
            "re-lexed document"
        );
        trace!(tokens = self.tokens.len(), "document token count");

        Ok(restart..resync_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::syntax::tokenize;

    fn full_relex(text: &str) -> Vec<TokenSpan> {
        tokenize(text).into_iter().map(TokenSpan::from).collect()
    }

    fn kinds(doc: &Document) -> Vec<(TokenKind, &str)> {
        doc.tokens().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_new_document() {
        let doc = Document::new("rule \"x\"");
        assert_eq!(doc.text(), "rule \"x\"");
        assert_eq!(doc.token_spans(), full_relex("rule \"x\"").as_slice());
        assert!(Document::new("").token_spans().is_empty());
    }

    #[test]
    fn test_insert_completes_hyphenated_keyword() {
        let mut doc = Document::new("rule \"a\" no-loo true");
        doc.apply_edit(&TextEdit::insert(15, "p")).unwrap();
        assert_eq!(doc.text(), "rule \"a\" no-loop true");
        assert_eq!(
            kinds(&doc),
            vec![
                (TokenKind::Keyword, "rule"),
                (TokenKind::Whitespace, " "),
                (TokenKind::String, "\"a\""),
                (TokenKind::Whitespace, " "),
                (TokenKind::Keyword, "no-loop"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Keyword, "true"),
            ]
        );
    }

    #[test]
    fn test_opening_comment_swallows_rest() {
        let mut doc = Document::new("when\n$p : Person()\nthen\nend");
        doc.apply_edit(&TextEdit::insert(5, "/*")).unwrap();
        let last = doc.tokens().last().unwrap();
        assert_eq!(last.kind, TokenKind::UnterminatedComment);
        assert_eq!(last.end, doc.text().len());

        // closing it again restores the tokens after it
        let close_at = doc.text().find("then").unwrap();
        doc.apply_edit(&TextEdit::insert(close_at, "*/")).unwrap();
        assert_eq!(doc.token_spans(), full_relex(doc.text()).as_slice());
        assert_eq!(doc.tokens().last().unwrap().text, "end");
    }

    #[test]
    fn test_local_edit_reuses_tail() {
        let rule = "rule \"r\"\nwhen\n    $p : Person( age > 18 )\nthen\n    update($p);\nend\n";
        let text = rule.repeat(50);
        let mut doc = Document::new(text.clone());

        let at = text.len() / 2;
        let at = text[at..].find("18").unwrap() + at;
        let changed = doc.apply_edit(&TextEdit::replace(at..at + 2, "21")).unwrap();

        assert!(changed.end - changed.start < 2 * MAX_LOOKAHEAD + 8);
        assert_eq!(doc.token_spans(), full_relex(doc.text()).as_slice());
    }

    #[test]
    fn test_delete_everything() {
        let mut doc = Document::new("rule x end");
        let changed = doc.apply_edit(&TextEdit::delete(0..10)).unwrap();
        assert_eq!(changed, 0..0);
        assert!(doc.token_spans().is_empty());
    }

    #[test]
    fn test_invalid_edits() {
        let mut doc = Document::new("città");
        assert!(matches!(
            doc.apply_edit(&TextEdit::delete(3..1)),
            Err(HighlightError::InvalidEdit { start: 3, end: 1, .. })
        ));
        assert!(matches!(
            doc.apply_edit(&TextEdit::insert(99, "x")),
            Err(HighlightError::InvalidEdit { len: 6, .. })
        ));
        // inside the two-byte 'à'
        assert!(doc.apply_edit(&TextEdit::insert(5, "x")).is_err());
        assert_eq!(doc.text(), "città");
    }

    #[test]
    fn test_token_at() {
        let doc = Document::new("rule x");
        assert_eq!(doc.token_at(0).map(|t| t.text), Some("rule"));
        assert_eq!(doc.token_at(3).map(|t| t.text), Some("rule"));
        assert_eq!(doc.token_at(4).map(|t| t.kind), Some(TokenKind::Whitespace));
        assert_eq!(doc.token_at(5).map(|t| t.text), Some("x"));
        assert!(doc.token_at(6).is_none());
    }

    #[test]
    fn test_spans_in_range() {
        let doc = Document::new("rule 1\nend 2");
        let theme = Theme::new();
        let spans = doc.spans_in(7..12, &theme);
        let ranges: Vec<_> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(ranges, vec![(7, 10), (11, 12)]);
    }

    fn snippet() -> impl Strategy<Value = String> {
        let piece = prop::sample::select(vec![
            "rule", "no-loop", "no", "-loop", "\"", "'", "\\", "/*", "*/", "//", "\n", " ",
            "$x", "@r", "1.5", "e3", ".", "==", "é", "end", "{", "}",
        ]);
        proptest::collection::vec(piece, 0..30).prop_map(|p| p.concat())
    }

    fn edit_strategy() -> impl Strategy<Value = (String, usize, usize, String)> {
        (
            snippet(),
            any::<prop::sample::Index>(),
            any::<prop::sample::Index>(),
            snippet(),
        )
            .prop_map(|(base, a, b, insert)| {
                let boundaries: Vec<usize> = base
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(base.len()))
                    .collect();
                let x = boundaries[a.index(boundaries.len())];
                let y = boundaries[b.index(boundaries.len())];
                (base, x.min(y), x.max(y), insert)
            })
    }

    proptest! {
        #[test]
        fn prop_incremental_matches_full_relex((base, start, end, insert) in edit_strategy()) {
            let mut doc = Document::new(base.clone());
            doc.apply_edit(&TextEdit::replace(start..end, insert.clone())).unwrap();

            let mut expected = base;
            expected.replace_range(start..end, &insert);
            prop_assert_eq!(doc.text(), expected.as_str());
            let full = full_relex(&expected);
            prop_assert_eq!(doc.token_spans(), full.as_slice());
        }

        #[test]
        fn prop_edit_sequences_stay_consistent(
            edits in proptest::collection::vec(edit_strategy(), 1..6)
        ) {
            let mut doc = Document::new("");
            for (snippet, _, _, insert) in edits {
                let at = doc.text().len() / 2;
                let at = crate::syntax::floor_char_boundary(doc.text(), at);
                doc.apply_edit(&TextEdit::insert(at, snippet)).unwrap();
                doc.apply_edit(&TextEdit::insert(0, insert)).unwrap();
                let full = full_relex(doc.text());
                prop_assert_eq!(doc.token_spans(), full.as_slice());
            }
        }
    }
}
