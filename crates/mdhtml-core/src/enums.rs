//! Core enums for mdhtml parsing.
//!
//! [`TokenKind`] is the closed set of lexical categories, declared in the
//! order the lexer tries them. [`ListType`] names the two list blocks that
//! can stay open across lines.

use serde::{Deserialize, Serialize};

/// The kind of a lexed token.
///
/// Variants are declared in match-priority order: when more than one
/// pattern could match at a scan position, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// `1.` through `9.` at the start of a line
    OrderedListMarker,
    /// Backslash followed by an escapable punctuation character
    EscapedChar,
    /// `<http://...>`
    AutoLink,
    /// Four or more leading spaces, or a leading tab
    CodeBlockIndent,
    /// `` `code` ``
    InlineCode,
    /// `[text](target)`
    InlineLink,
    /// Run of alphanumeric or underscore characters
    Word,
    /// `*words*`
    EmphasisWord,
    /// `**words**`
    StrongWord,
    /// A line holding nothing but its terminator
    BlankLine,
    /// Run of whitespace
    Whitespace,
    /// One to six `#` at the start of a line
    HeaderMarker,
    /// A line that is exactly one HTML element
    RawHtml,
    /// `*`, `+` or `-` at the start of a line
    UnorderedListMarker,
    /// `&` or `<`
    SpecialChar,
}

impl TokenKind {
    /// Every kind, in lexer priority order.
    pub const ALL: [TokenKind; 15] = [
        TokenKind::OrderedListMarker,
        TokenKind::EscapedChar,
        TokenKind::AutoLink,
        TokenKind::CodeBlockIndent,
        TokenKind::InlineCode,
        TokenKind::InlineLink,
        TokenKind::Word,
        TokenKind::EmphasisWord,
        TokenKind::StrongWord,
        TokenKind::BlankLine,
        TokenKind::Whitespace,
        TokenKind::HeaderMarker,
        TokenKind::RawHtml,
        TokenKind::UnorderedListMarker,
        TokenKind::SpecialChar,
    ];

    /// Whether the inline `term` loop accepts this kind.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            TokenKind::Word
                | TokenKind::Whitespace
                | TokenKind::EmphasisWord
                | TokenKind::StrongWord
                | TokenKind::EscapedChar
                | TokenKind::InlineLink
                | TokenKind::InlineCode
                | TokenKind::SpecialChar
                | TokenKind::AutoLink
        )
    }

    /// Stable lower snake-case name.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::OrderedListMarker => "ordered_list_marker",
            TokenKind::EscapedChar => "escaped_char",
            TokenKind::AutoLink => "auto_link",
            TokenKind::CodeBlockIndent => "code_block_indent",
            TokenKind::InlineCode => "inline_code",
            TokenKind::InlineLink => "inline_link",
            TokenKind::Word => "word",
            TokenKind::EmphasisWord => "emphasis_word",
            TokenKind::StrongWord => "strong_word",
            TokenKind::BlankLine => "blank_line",
            TokenKind::Whitespace => "whitespace",
            TokenKind::HeaderMarker => "header_marker",
            TokenKind::RawHtml => "raw_html",
            TokenKind::UnorderedListMarker => "unordered_list_marker",
            TokenKind::SpecialChar => "special_char",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the type of list being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    /// Bulleted list (`*`, `+`, `-`)
    Unordered,
    /// Numbered list (`1.`)
    Ordered,
}

impl ListType {
    /// Tag emitted when the list opens, including its trailing newline.
    pub fn open_tag(&self) -> &'static str {
        match self {
            ListType::Unordered => "<ul>\n",
            ListType::Ordered => "<ol>\n",
        }
    }

    pub fn close_tag(&self) -> &'static str {
        match self {
            ListType::Unordered => "</ul>",
            ListType::Ordered => "</ol>",
        }
    }
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListType::Unordered => write!(f, "unordered"),
            ListType::Ordered => write!(f, "ordered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_priority_order() {
        assert_eq!(TokenKind::ALL.first(), Some(&TokenKind::OrderedListMarker));
        assert_eq!(TokenKind::ALL.last(), Some(&TokenKind::SpecialChar));
        let blank = TokenKind::ALL.iter().position(|k| *k == TokenKind::BlankLine);
        let ws = TokenKind::ALL.iter().position(|k| *k == TokenKind::Whitespace);
        assert!(blank < ws);
    }

    #[test]
    fn test_inline_kinds() {
        let inline: Vec<_> = TokenKind::ALL.iter().filter(|k| k.is_inline()).collect();
        assert_eq!(inline.len(), 9);
        assert!(!TokenKind::HeaderMarker.is_inline());
        assert!(!TokenKind::BlankLine.is_inline());
        assert!(!TokenKind::CodeBlockIndent.is_inline());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::StrongWord.to_string(), "strong_word");
        assert_eq!(ListType::Ordered.to_string(), "ordered");
    }

    #[test]
    fn test_list_tags() {
        assert_eq!(ListType::Unordered.open_tag(), "<ul>\n");
        assert_eq!(ListType::Ordered.close_tag(), "</ol>");
    }
}
