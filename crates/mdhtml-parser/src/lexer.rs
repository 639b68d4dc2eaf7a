//! Line lexer.
//!
//! Splits one line of Markdown into [`Token`]s. At every scan position the
//! rule table is tried top to bottom and the first rule that matches wins;
//! its match is consumed and scanning resumes after it. Rules anchored to the
//! line start are only tried at column 0.
//!
//! The order of the table is load-bearing:
//! - blank line comes before whitespace, because a lone terminator is also
//!   whitespace and the parser needs the blank-line signal to close blocks;
//! - emphasis comes before strong, which is safe because the emphasis body
//!   cannot contain `*`, so `**x**` never matches as emphasis;
//! - auto link comes before raw HTML and special characters, so `<http://..>`
//!   is a link rather than an escaped `<`.

use log::trace;
use mdhtml_core::{MdHtmlError, Result, TokenKind};
use regex::Regex;
use std::iter::FusedIterator;
use std::sync::LazyLock;

// =============================================================================
// Regex patterns
// =============================================================================

/// `1.` through `9.`
static ORDERED_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A[1-9]\.").unwrap());

/// Backslash plus one escapable character
static ESCAPED_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\A\\[\\'*_{}\[\]()#+.!-]"#).unwrap());

/// `<http://...>` or `<https://...>`
static AUTO_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<https?://[^>]*>").unwrap());

/// Four or more spaces, or a tab
static CODE_BLOCK_INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A(?: {4,}|\t)").unwrap());

/// Shortest backtick-delimited span
static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A`[^`]*`").unwrap());

/// `[text](target)`
static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\[[^\]]*\]\([^)]*\)").unwrap());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\w+").unwrap());

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\*[\w\s-]+\*").unwrap());

static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\*\*[\w\s-]+\*\*").unwrap());

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\r?\n\z").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\s+").unwrap());

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A#{1,6}").unwrap());

/// `<tag attrs>body</tag>` spanning the whole line; tag names compared in code
static HTML_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A<([A-Za-z][A-Za-z0-9]*)(?:\s[^<>]*)?>(.*)</([A-Za-z][A-Za-z0-9]*)\s*>\z")
        .unwrap()
});

/// `<tag attrs />` spanning the whole line
static HTML_VOID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A<[A-Za-z][A-Za-z0-9]*(?:\s[^<>]*?)?\s*/>\z").unwrap());

static UNORDERED_LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A[*+-]").unwrap());

static SPECIAL_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A[&<]").unwrap());

// =============================================================================
// Rule table
// =============================================================================

/// Where a rule may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Only at column 0
    LineStart,
    /// At any scan position
    Anywhere,
}

/// Returns the byte length matched at the start of its input.
type Matcher = fn(&str) -> Option<usize>;

/// One entry of the priority-ordered rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: TokenKind,
    pub anchor: Anchor,
    matcher: Matcher,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("anchor", &self.anchor)
            .finish()
    }
}

impl Rule {
    const fn new(kind: TokenKind, anchor: Anchor, matcher: Matcher) -> Self {
        Self {
            kind,
            anchor,
            matcher,
        }
    }

    /// Length of this rule's match at `column` of `line`, if any.
    pub fn match_at(&self, line: &str, column: usize) -> Option<usize> {
        if self.anchor == Anchor::LineStart && column != 0 {
            return None;
        }
        (self.matcher)(&line[column..]).filter(|len| *len > 0)
    }
}

/// The lexer rules in the order they are attempted.
#[rustfmt::skip]
pub static RULES: [Rule; 15] = [
    Rule::new(TokenKind::OrderedListMarker, Anchor::LineStart, |s| prefix_len(&ORDERED_LIST_RE, s)),
    Rule::new(TokenKind::EscapedChar, Anchor::Anywhere, |s| prefix_len(&ESCAPED_CHAR_RE, s)),
    Rule::new(TokenKind::AutoLink, Anchor::Anywhere, |s| prefix_len(&AUTO_LINK_RE, s)),
    Rule::new(TokenKind::CodeBlockIndent, Anchor::LineStart, |s| prefix_len(&CODE_BLOCK_INDENT_RE, s)),
    Rule::new(TokenKind::InlineCode, Anchor::Anywhere, |s| prefix_len(&INLINE_CODE_RE, s)),
    Rule::new(TokenKind::InlineLink, Anchor::Anywhere, |s| prefix_len(&INLINE_LINK_RE, s)),
    Rule::new(TokenKind::Word, Anchor::Anywhere, |s| prefix_len(&WORD_RE, s)),
    Rule::new(TokenKind::EmphasisWord, Anchor::Anywhere, |s| prefix_len(&EMPHASIS_RE, s)),
    Rule::new(TokenKind::StrongWord, Anchor::Anywhere, |s| prefix_len(&STRONG_RE, s)),
    Rule::new(TokenKind::BlankLine, Anchor::LineStart, |s| prefix_len(&BLANK_LINE_RE, s)),
    Rule::new(TokenKind::Whitespace, Anchor::Anywhere, |s| prefix_len(&WHITESPACE_RE, s)),
    Rule::new(TokenKind::HeaderMarker, Anchor::LineStart, |s| prefix_len(&HEADER_RE, s)),
    Rule::new(TokenKind::RawHtml, Anchor::LineStart, raw_html_len),
    Rule::new(TokenKind::UnorderedListMarker, Anchor::LineStart, |s| prefix_len(&UNORDERED_LIST_RE, s)),
    Rule::new(TokenKind::SpecialChar, Anchor::Anywhere, |s| prefix_len(&SPECIAL_CHAR_RE, s)),
];

fn prefix_len(re: &Regex, s: &str) -> Option<usize> {
    re.find(s).map(|m| m.end())
}

/// A line that is exactly one element: either a self-closing tag, or an
/// opening tag whose name matches the final closing tag.
fn raw_html_len(s: &str) -> Option<usize> {
    if HTML_VOID_RE.is_match(s) {
        return Some(s.len());
    }
    let caps = HTML_ELEMENT_RE.captures(s)?;
    let open = caps.get(1)?.as_str();
    let close = caps.get(3)?.as_str();
    open.eq_ignore_ascii_case(close).then_some(s.len())
}

// =============================================================================
// Tokens
// =============================================================================

/// A lexed token: its kind and the exact text it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Lazy token stream over one line.
///
/// Yields `Err` once if scanning gets stuck, then ends.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    line: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            failed: false,
        }
    }

    /// The text not yet consumed.
    pub fn remaining(&self) -> &'a str {
        &self.line[self.pos..]
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.line.len() {
            return None;
        }

        for rule in RULES.iter() {
            if let Some(len) = rule.match_at(self.line, self.pos) {
                let text = &self.line[self.pos..self.pos + len];
                trace!("{} at {}: {:?}", rule.kind, self.pos, text);
                self.pos += len;
                return Some(Ok(Token::new(rule.kind, text)));
            }
        }

        self.failed = true;
        Some(Err(MdHtmlError::Lex {
            column: self.pos,
            remaining: self.remaining().to_string(),
        }))
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenize one line lazily.
pub fn tokenize(line: &str) -> Lexer<'_> {
    Lexer::new(line)
}

/// Tokenize one line into a vector, stopping at the first error.
pub fn tokenize_all(line: &str) -> Result<Vec<Token<'_>>> {
    tokenize(line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize_all(line).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_rule_table_follows_kind_order() {
        let order: Vec<_> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(order, TokenKind::ALL.to_vec());
    }

    #[test]
    fn test_plain_words() {
        let tokens = tokenize_all("Hello world").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(Word, "Hello"),
                Token::new(Whitespace, " "),
                Token::new(Word, "world"),
            ]
        );
    }

    #[test]
    fn test_header_marker() {
        let tokens = tokenize_all("### text").unwrap();
        assert_eq!(tokens[0], Token::new(HeaderMarker, "###"));
        assert_eq!(kinds("### text"), vec![HeaderMarker, Whitespace, Word]);
    }

    #[test]
    fn test_header_marker_only_at_line_start() {
        assert!(tokenize_all("a #b").is_err());
    }

    #[test]
    fn test_seven_hashes_leave_one_unmatched() {
        let err = tokenize_all("####### x").unwrap_err();
        assert!(matches!(err, MdHtmlError::Lex { column: 6, .. }));
    }

    #[test]
    fn test_strong_not_split_into_emphasis() {
        let tokens = tokenize_all("**my strong word**").unwrap();
        assert_eq!(tokens, vec![Token::new(StrongWord, "**my strong word**")]);
    }

    #[test]
    fn test_emphasis_and_strong_on_one_line() {
        assert_eq!(
            kinds("*my emphasis word* **my strong word**"),
            vec![EmphasisWord, Whitespace, StrongWord]
        );
    }

    #[test]
    fn test_blank_line_beats_whitespace() {
        assert_eq!(kinds("\n"), vec![BlankLine]);
        assert_eq!(kinds("\r\n"), vec![BlankLine]);
    }

    #[test]
    fn test_trailing_terminator_is_whitespace() {
        assert_eq!(kinds("word\n"), vec![Word, Whitespace]);
    }

    #[test]
    fn test_unordered_markers() {
        for line in ["* Bird", "+ Bird", "- Bird"] {
            assert_eq!(kinds(line), vec![UnorderedListMarker, Whitespace, Word]);
        }
    }

    #[test]
    fn test_ordered_marker() {
        let tokens = tokenize_all("1. Bird").unwrap();
        assert_eq!(tokens[0], Token::new(OrderedListMarker, "1."));
    }

    #[test]
    fn test_zero_is_not_an_ordered_marker() {
        assert!(tokenize_all("0. x").is_err());
    }

    #[test]
    fn test_escaped_chars() {
        assert_eq!(
            kinds(r"\*literal asterisks\*"),
            vec![EscapedChar, Word, Whitespace, Word, EscapedChar]
        );
        for c in ['\\', '\'', '*', '_', '{', '}', '[', ']', '(', ')', '#', '+', '-', '.', '!'] {
            let line = format!("\\{}", c);
            assert_eq!(kinds(&line), vec![EscapedChar], "escape of {:?}", c);
        }
    }

    #[test]
    fn test_code_block_indent() {
        assert_eq!(kinds("    let x")[0], CodeBlockIndent);
        assert_eq!(kinds("\tlet x")[0], CodeBlockIndent);
        assert_eq!(kinds("   x")[0], Whitespace);
    }

    #[test]
    fn test_inline_code_is_shortest_span() {
        let tokens = tokenize_all("`a` and `b`").unwrap();
        assert_eq!(tokens[0], Token::new(InlineCode, "`a`"));
        assert_eq!(tokens[4], Token::new(InlineCode, "`b`"));
    }

    #[test]
    fn test_inline_link() {
        let tokens = tokenize_all("see [home](http://example.com)").unwrap();
        assert_eq!(tokens[2], Token::new(InlineLink, "[home](http://example.com)"));
    }

    #[test]
    fn test_auto_link_before_special_char() {
        let tokens = tokenize_all("<http://example.com>").unwrap();
        assert_eq!(tokens, vec![Token::new(AutoLink, "<http://example.com>")]);
    }

    #[test]
    fn test_raw_html_element() {
        let tokens = tokenize_all("<h1> inline </h1>").unwrap();
        assert_eq!(tokens, vec![Token::new(RawHtml, "<h1> inline </h1>")]);
        assert_eq!(kinds(r#"<a href="x">y</a>"#), vec![RawHtml]);
    }

    #[test]
    fn test_raw_html_self_closing() {
        assert_eq!(kinds("<br />"), vec![RawHtml]);
        assert_eq!(kinds(r#"<img src="a.png"/>"#), vec![RawHtml]);
    }

    #[test]
    fn test_raw_html_needs_matching_close_tag() {
        // Falls through to special char, then stalls on `>`.
        assert!(tokenize_all("<b>bold</i>").is_err());
    }

    #[test]
    fn test_special_chars() {
        assert_eq!(kinds("a & b"), vec![Word, Whitespace, SpecialChar, Whitespace, Word]);
        assert_eq!(kinds("a < b")[2], SpecialChar);
    }

    #[test]
    fn test_lex_error_reports_position() {
        let err = tokenize_all("Hello, world").unwrap_err();
        match err {
            MdHtmlError::Lex { column, remaining } => {
                assert_eq!(column, 5);
                assert_eq!(remaining, ", world");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lexer_is_fused_after_error() {
        let mut lexer = tokenize("a ,b");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_empty_line_has_no_tokens() {
        assert!(tokenize_all("").unwrap().is_empty());
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(kinds("héllo wörld"), vec![Word, Whitespace, Word]);
    }
}
