//! Block state carried between lines.
//!
//! [`BlockState`] records which multi-line blocks have emitted their opening
//! tag but not yet their closing tag. The parser stages changes on a copy and
//! writes it back only once a line has been converted successfully.

use crate::enums::ListType;
use serde::{Deserialize, Serialize};

/// Closing tag for an open code block.
pub const CODE_BLOCK_CLOSE: &str = "</code></pre>";

/// Opening tag for a code block.
pub const CODE_BLOCK_OPEN: &str = "<pre><code>";

/// Open/closed flags for the blocks that span lines.
///
/// # Example
///
/// ```
/// use mdhtml_core::{BlockState, ListType};
///
/// let mut state = BlockState::new();
/// state.open_list(ListType::Unordered);
/// assert_eq!(state.current_list(), Some(ListType::Unordered));
/// assert_eq!(state.close_all(), "</ul>");
/// assert!(state.is_idle());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockState {
    /// A `<ul>` has been emitted without its `</ul>`
    pub unordered_list_open: bool,
    /// An `<ol>` has been emitted without its `</ol>`
    pub ordered_list_open: bool,
    /// A `<pre><code>` has been emitted without its `</code></pre>`
    pub code_block_open: bool,
}

impl BlockState {
    /// All flags cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is open.
    pub fn is_idle(&self) -> bool {
        !self.unordered_list_open && !self.ordered_list_open && !self.code_block_open
    }

    pub fn is_list_open(&self, list_type: ListType) -> bool {
        match list_type {
            ListType::Unordered => self.unordered_list_open,
            ListType::Ordered => self.ordered_list_open,
        }
    }

    /// The list currently open, unordered taking precedence.
    pub fn current_list(&self) -> Option<ListType> {
        if self.unordered_list_open {
            Some(ListType::Unordered)
        } else if self.ordered_list_open {
            Some(ListType::Ordered)
        } else {
            None
        }
    }

    /// Mark a list as open. Returns `false` if it already was.
    pub fn open_list(&mut self, list_type: ListType) -> bool {
        let flag = match list_type {
            ListType::Unordered => &mut self.unordered_list_open,
            ListType::Ordered => &mut self.ordered_list_open,
        };
        !std::mem::replace(flag, true)
    }

    /// Mark a list as closed. Returns `true` if it was open.
    pub fn close_list(&mut self, list_type: ListType) -> bool {
        let flag = match list_type {
            ListType::Unordered => &mut self.unordered_list_open,
            ListType::Ordered => &mut self.ordered_list_open,
        };
        std::mem::replace(flag, false)
    }

    /// Close every open block and return the closing tags, innermost first.
    ///
    /// A list cannot start while a code block is open, so when both are open
    /// the code block is the inner one: `</code></pre>` comes first, then
    /// `</ul>`, then `</ol>`.
    pub fn close_all(&mut self) -> String {
        let mut out = String::new();
        if std::mem::replace(&mut self.code_block_open, false) {
            out.push_str(CODE_BLOCK_CLOSE);
        }
        if self.close_list(ListType::Unordered) {
            out.push_str(ListType::Unordered.close_tag());
        }
        if self.close_list(ListType::Ordered) {
            out.push_str(ListType::Ordered.close_tag());
        }
        out
    }
}
