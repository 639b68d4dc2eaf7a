//! mdhtml Core
//!
//! This crate provides core types, block state, and error definitions
//! for the mdhtml Markdown to HTML converter.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`BlockState`] - The open/closed flags for blocks that span lines
//! - [`TokenKind`], [`ListType`] - Lexical and block enums
//! - [`MdHtmlError`] - Error types

pub mod enums;
pub mod error;
pub mod state;

pub use enums::{ListType, TokenKind};
pub use error::{MdHtmlError, Result};
pub use state::{BlockState, CODE_BLOCK_CLOSE, CODE_BLOCK_OPEN};
