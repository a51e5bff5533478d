//! minscript_scanner: Lexer/tokenizer for minscript source text.
//!
//! A single-pass scanner that turns raw source into an ordered token
//! sequence plus a list of advisory lexical errors, with support for:
//! - Reserved words and reserved literal identifiers
//! - One- and two-character operators
//! - Decimal, hex, and float numeric literals
//! - String literals (verbatim, no escape processing)
//! - Line and block comments, emitted inline as tokens

mod char_codes;
mod scanner;
mod token;

pub use scanner::{tokenize, LexError, ScanOutput, Scanner};
pub use token::{
    is_operator_text, is_reserved_literal, is_reserved_word, Token, TokenFlags, TokenId, TokenKind,
};
