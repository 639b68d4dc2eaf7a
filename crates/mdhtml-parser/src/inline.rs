//! Inline element renderers.
//!
//! Each renderer turns exactly one token into HTML appended to the output
//! buffer. None of them look at neighbouring tokens.

use crate::lexer::Token;
use mdhtml_core::{MdHtmlError, Result, TokenKind};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for decomposing a link: [text](inside parens)
static LINK_PARTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\[(.*)\]\((.*)\)\z").unwrap());

/// A decomposed `[text](url title)` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineLink<'a> {
    pub text: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
}

impl<'a> InlineLink<'a> {
    /// Split the raw `[text](target)` match into its parts.
    ///
    /// The parenthesized target is split at its first whitespace run into
    /// URL and title; the title is kept exactly as written.
    pub fn parse(raw: &'a str) -> Result<Self> {
        let caps = LINK_PARTS_RE
            .captures(raw)
            .ok_or_else(|| malformed("inline link", raw))?;
        let text = caps.get(1).map_or("", |m| m.as_str());
        let target = caps.get(2).map_or("", |m| m.as_str()).trim();

        let (url, title) = match target.split_once(char::is_whitespace) {
            Some((url, title)) => (url, Some(title.trim()).filter(|t| !t.is_empty())),
            None => (target, None),
        };
        if url.is_empty() {
            return Err(malformed("inline link", raw));
        }

        Ok(Self { text, url, title })
    }
}

fn malformed(construct: &'static str, text: &str) -> MdHtmlError {
    MdHtmlError::MalformedInline {
        construct,
        text: text.to_string(),
    }
}

/// Strip `n` delimiter bytes from both ends of a token.
fn strip_delimiters<'a>(token: &Token<'a>, n: usize, construct: &'static str) -> Result<&'a str> {
    let text = token.text;
    if text.len() < 2 * n {
        return Err(malformed(construct, text));
    }
    text.get(n..text.len() - n)
        .ok_or_else(|| malformed(construct, text))
}

/// Write an attribute value. A value already wrapped in matching quotes is
/// kept as written; anything else is double-quoted with `"` encoded.
fn push_attribute(value: &str, out: &mut String) {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        out.push_str(value);
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

/// Encode a special character token. Anything else passes through.
pub fn escape_special(text: &str) -> &str {
    match text {
        "&" => "&amp;",
        "<" => "&lt;",
        other => other,
    }
}

/// Encode every special character in a run of text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        out.push_str(escape_special(&text[i..i + c.len_utf8()]));
    }
    out
}

/// Render one inline token into `out`.
///
/// Returns a grammar error if `token` is not an inline kind.
pub fn render(token: &Token<'_>, out: &mut String) -> Result<()> {
    match token.kind {
        TokenKind::Word | TokenKind::Whitespace => out.push_str(token.text),
        TokenKind::EmphasisWord => {
            let inner = strip_delimiters(token, 1, "emphasis")?;
            out.push_str("<em>");
            out.push_str(inner);
            out.push_str("</em>");
        }
        TokenKind::StrongWord => {
            let inner = strip_delimiters(token, 2, "strong emphasis")?;
            out.push_str("<strong>");
            out.push_str(inner);
            out.push_str("</strong>");
        }
        TokenKind::EscapedChar => {
            let escaped = token
                .text
                .strip_prefix('\\')
                .filter(|rest| !rest.is_empty())
                .ok_or_else(|| malformed("escaped character", token.text))?;
            out.push_str(escaped);
        }
        TokenKind::InlineCode => {
            let inner = strip_delimiters(token, 1, "code span")?;
            out.push_str("<code>");
            out.push_str(inner);
            out.push_str("</code>");
        }
        TokenKind::InlineLink => {
            let link = InlineLink::parse(token.text)?;
            out.push_str("<a href=\"");
            out.push_str(link.url);
            out.push('"');
            if let Some(title) = link.title {
                out.push_str(" title=");
                push_attribute(title, out);
            }
            out.push('>');
            out.push_str(link.text);
            out.push_str("</a>");
        }
        TokenKind::AutoLink => {
            let url = strip_delimiters(token, 1, "automatic link")?;
            out.push_str("<a href=\"");
            out.push_str(url);
            out.push_str("\">");
            out.push_str(url);
            out.push_str("</a>");
        }
        TokenKind::SpecialChar => out.push_str(escape_special(token.text)),
        other => {
            return Err(MdHtmlError::Grammar {
                expected: "inline element".to_string(),
                found: Some(other),
            })
        }
    }
    Ok(())
}
