//! mdhtml Parser
//!
//! A line-at-a-time Markdown to HTML converter. Each call to
//! [`Parser::parse`] lexes one line, applies exactly one block rule to it and
//! returns the HTML for that line. Lists and indented code blocks stay open
//! across calls until a blank line closes them.
//!
//! # Example
//!
//! ```
//! use mdhtml_parser::Parser;
//!
//! let mut parser = Parser::new();
//! assert_eq!(parser.parse("* Bird").unwrap(), "<ul>\n<li>Bird</li>");
//! assert_eq!(parser.parse("* Magic").unwrap(), "<li>Magic</li>");
//! assert_eq!(parser.parse("").unwrap(), "</ul>");
//! ```

pub mod inline;
pub mod lexer;

pub use inline::{escape_special, escape_text, InlineLink};
pub use lexer::{tokenize, tokenize_all, Lexer, Token};

use log::debug;
use mdhtml_core::{BlockState, ListType, MdHtmlError, Result, TokenKind, CODE_BLOCK_OPEN};

// =============================================================================
// Parser
// =============================================================================

/// Markdown to HTML parser for one document.
///
/// Holds the block state that must survive between lines. Feed it the lines
/// of a document in order; one parser per document.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    state: BlockState,
}

impl Parser {
    /// Create a parser with no blocks open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser resuming from a saved block state.
    pub fn with_state(state: BlockState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Convert one line to HTML.
    ///
    /// A trailing `\n` or `\r\n` is optional and never copied to the output.
    /// On error the block state is left exactly as it was before the call.
    pub fn parse(&mut self, line: &str) -> Result<String> {
        let text = strip_terminator(line);
        let mut line_parser = LineParser::new(text, self.state);
        let output = line_parser.line()?;
        self.state = line_parser.state;
        Ok(output)
    }

    /// Close whatever is still open at the end of a document.
    pub fn finish(&mut self) -> String {
        let closing = self.state.close_all();
        if !closing.is_empty() {
            debug!("closing open blocks at end of input: {}", closing);
        }
        closing
    }

    /// Reset the parser to initial state.
    pub fn reset(&mut self) {
        self.state = BlockState::new();
    }

    /// Convert a complete document, one fragment per line joined by `\n`.
    ///
    /// Blocks left open by the last line are closed.
    pub fn parse_document(&mut self, content: &str) -> Result<String> {
        let mut fragments = Vec::new();
        for line in content.lines() {
            fragments.push(self.parse(line)?);
        }
        let closing = self.finish();
        if !closing.is_empty() {
            fragments.push(closing);
        }
        Ok(fragments.join("\n"))
    }
}

/// Strip a trailing `\n` or `\r\n`. A `\r` on its own is content.
fn strip_terminator(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}

// =============================================================================
// Line grammar
// =============================================================================

/// Recursive-descent pass over a single line.
///
/// ```text
/// line      ::= blank_line | header | list_item | raw_html | code_block | term
/// header    ::= HEADER_MARKER [WHITESPACE] term
/// list_item ::= (UNORDERED_LIST_MARKER | ORDERED_LIST_MARKER) [WHITESPACE] term
/// term      ::= { WORD | WHITESPACE | EMPHASIS_WORD | STRONG_WORD | ESCAPED_CHAR
///               | INLINE_LINK | INLINE_CODE | SPECIAL_CHAR | AUTO_LINK }
/// ```
struct LineParser<'a> {
    /// The line without its terminator
    text: &'a str,
    tokens: Lexer<'a>,
    /// Last token consumed
    current: Option<Token<'a>>,
    /// Next token, not yet consumed
    lookahead: Option<Token<'a>>,
    /// Staged copy of the parser's block state
    state: BlockState,
    output: String,
}

impl<'a> LineParser<'a> {
    fn new(text: &'a str, state: BlockState) -> Self {
        // An empty line is lexed as its terminator so it yields BLANK_LINE.
        let source = if text.is_empty() { "\n" } else { text };
        Self {
            text,
            tokens: lexer::tokenize(source),
            current: None,
            lookahead: None,
            state,
            output: String::new(),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lookahead.take();
        self.lookahead = self.tokens.next().transpose()?;
        Ok(())
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.lookahead.map(|t| t.kind)
    }

    /// Consume the lookahead if it is of `kind`.
    fn accept(&mut self, kind: TokenKind) -> Result<bool> {
        if self.peek_kind() == Some(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek_kind() {
            None => Ok(()),
            found => Err(MdHtmlError::Grammar {
                expected: "end of line".to_string(),
                found,
            }),
        }
    }

    fn current_text(&self) -> &'a str {
        self.current.map_or("", |t| t.text)
    }

    fn line(&mut self) -> Result<String> {
        // Inside a code block nothing but a blank line is tokenized.
        if self.state.code_block_open && !self.text.is_empty() {
            self.output.push_str(self.text);
            return Ok(std::mem::take(&mut self.output));
        }

        self.advance()?;

        // Both rules own the rest of the line and must not lex past the
        // first token.
        match self.peek_kind() {
            Some(TokenKind::CodeBlockIndent) => {
                self.code_block();
                return Ok(std::mem::take(&mut self.output));
            }
            Some(TokenKind::RawHtml) => {
                self.advance()?;
                self.raw_html();
            }
            _ => {
                if self.accept(TokenKind::BlankLine)? {
                    self.blank_line();
                } else if self.accept(TokenKind::HeaderMarker)? {
                    self.header()?;
                } else if self.accept(TokenKind::UnorderedListMarker)? {
                    self.list_item(ListType::Unordered)?;
                } else if self.accept(TokenKind::OrderedListMarker)? {
                    self.list_item(ListType::Ordered)?;
                } else {
                    self.term()?;
                }
            }
        }

        self.expect_end()?;
        Ok(std::mem::take(&mut self.output))
    }

    fn blank_line(&mut self) {
        let closing = self.state.close_all();
        if !closing.is_empty() {
            debug!("blank line closes {}", closing);
        }
        self.output.push_str(&closing);
    }

    fn header(&mut self) -> Result<()> {
        let level = self.current_text().len();
        self.accept(TokenKind::Whitespace)?;
        self.output.push_str(&format!("<h{}>", level));
        self.term()?;
        self.output.push_str(&format!(" </h{}>", level));
        Ok(())
    }

    fn list_item(&mut self, list_type: ListType) -> Result<()> {
        if let Some(open) = self.state.current_list() {
            if open != list_type {
                debug!("{} list closed by {} item", open, list_type);
                self.state.close_list(open);
                self.output.push_str(open.close_tag());
            }
        }
        if self.state.open_list(list_type) {
            debug!("{} list opened", list_type);
            self.output.push_str(list_type.open_tag());
        }

        self.accept(TokenKind::Whitespace)?;
        self.output.push_str("<li>");
        self.term()?;
        self.output.push_str("</li>");
        Ok(())
    }

    fn raw_html(&mut self) {
        self.output.push_str(self.current_text());
    }

    fn code_block(&mut self) {
        if !self.state.code_block_open {
            debug!("code block opened");
            self.state.code_block_open = true;
            self.output.push_str(CODE_BLOCK_OPEN);
        }
        self.output.push_str(self.text);
    }

    fn term(&mut self) -> Result<()> {
        if self.state.code_block_open {
            return Ok(());
        }
        while let Some(kind) = self.peek_kind() {
            if !kind.is_inline() {
                break;
            }
            self.advance()?;
            if let Some(token) = self.current {
                inline::render(&token, &mut self.output)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
