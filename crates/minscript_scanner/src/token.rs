//! Token records produced by the scanner, and the static classification
//! tables for keywords, reserved literals, operators, and punctuation.

use minscript_core::text::{TextPos, TextSpan};
use std::fmt;

/// Index of a token in the scanner's output sequence.
///
/// The output sequence doubles as an arena: the token currently being grown
/// is addressed by its index rather than held by reference, so entries keep
/// mutating in place after they have been appended.
pub type TokenId = usize;

bitflags::bitflags! {
    /// Flags attached to a token by the scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        const NONE         = 0;
        /// Numeric literal carries a `0x`/`0X` prefix.
        const IS_HEX       = 1 << 0;
        /// Numeric literal contains a float delimiter.
        const IS_FLOAT     = 1 << 1;
        /// String or block comment was cut off by end of input.
        const UNTERMINATED = 1 << 2;
    }
}

/// The classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A name that is neither a reserved word nor a reserved literal.
    Identifier,
    /// A reserved word (`if`, `while`, `function`, ...).
    Reserved,
    /// A built-in literal identifier (`null`, `undefined`, `true`, `false`).
    ReservedLiteral,
    /// A numeric literal (decimal, hex, or float).
    Number,
    /// A quoted string literal; text excludes the delimiting quotes.
    String,
    /// An operator, one or two characters long.
    Operator,
    /// A comment, line or block; appears inline in the token sequence.
    Comment,

    // Punctuation: single-character, non-extending.
    Comma,
    Dot,
    BracketOpen,
    BracketClose,
    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    Semicolon,
    Colon,
}

impl TokenKind {
    /// Map a punctuation character to its token kind.
    pub fn from_punctuation(ch: char) -> Option<TokenKind> {
        match ch {
            ',' => Some(TokenKind::Comma),
            '.' => Some(TokenKind::Dot),
            '[' => Some(TokenKind::BracketOpen),
            ']' => Some(TokenKind::BracketClose),
            '(' => Some(TokenKind::ParenOpen),
            ')' => Some(TokenKind::ParenClose),
            '{' => Some(TokenKind::BraceOpen),
            '}' => Some(TokenKind::BraceClose),
            ';' => Some(TokenKind::Semicolon),
            ':' => Some(TokenKind::Colon),
            _ => None,
        }
    }

    /// Whether this kind is one of the punctuation kinds.
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::BracketOpen
                | TokenKind::BracketClose
                | TokenKind::ParenOpen
                | TokenKind::ParenClose
                | TokenKind::BraceOpen
                | TokenKind::BraceClose
                | TokenKind::Semicolon
                | TokenKind::Colon
        )
    }

    /// Whether this kind grows by the identifier rules (reclassify-then-retest).
    pub fn is_identifier_class(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier | TokenKind::Reserved | TokenKind::ReservedLiteral
        )
    }

    /// Stable snake_case name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Reserved => "reserved",
            TokenKind::ReservedLiteral => "reserved_literal",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Operator => "operator",
            TokenKind::Comment => "comment",
            TokenKind::Comma => "comma",
            TokenKind::Dot => "dot",
            TokenKind::BracketOpen => "bracket_open",
            TokenKind::BracketClose => "bracket_close",
            TokenKind::ParenOpen => "paren_open",
            TokenKind::ParenClose => "paren_close",
            TokenKind::BraceOpen => "brace_open",
            TokenKind::BraceClose => "brace_close",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Colon => "colon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if text is a reserved word of the language.
pub fn is_reserved_word(text: &str) -> bool {
    matches!(
        text,
        "if" | "else"
            | "while"
            | "default"
            | "do"
            | "function"
            | "export"
            | "continue"
            | "return"
            | "for"
            | "break"
            | "let"
            | "const"
    )
}

/// Check if text is a reserved literal identifier.
pub fn is_reserved_literal(text: &str) -> bool {
    matches!(text, "null" | "undefined" | "true" | "false")
}

/// Check if text is a recognized operator, one or two characters.
/// Only the listed two-character combinations are valid; any other adjacent
/// operator characters stay separate tokens.
pub fn is_operator_text(text: &str) -> bool {
    matches!(
        text,
        "=" | "<"
            | ">"
            | "+"
            | "-"
            | "/"
            | "*"
            | "?"
            | "++"
            | "--"
            | "+="
            | "-="
            | "<="
            | ">="
            | "=="
    )
}

/// A classified, positioned span of source text.
#[derive(Debug, Clone)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The accumulated literal characters (raw, no escape processing).
    pub text: String,
    /// Start character offset in the source.
    pub pos: TextPos,
    /// End character offset in the source (exclusive).
    pub end: TextPos,
    /// Token flags (numeric format, unterminated).
    pub flags: TokenFlags,
    /// The quote character that delimited this token, for strings only.
    pub quote: Option<char>,
}

impl Token {
    pub fn new(kind: TokenKind, pos: TextPos, end: TextPos) -> Self {
        Self {
            kind,
            text: String::new(),
            pos,
            end,
            flags: TokenFlags::NONE,
            quote: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = Some(quote);
        self
    }

    /// The source span this token covers.
    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    /// The length of this token in characters.
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this token has zero length.
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Whether this numeric literal carries a hex prefix.
    pub fn is_hex(&self) -> bool {
        self.flags.contains(TokenFlags::IS_HEX)
    }

    /// Whether this numeric literal contains a float delimiter.
    pub fn is_float(&self) -> bool {
        self.flags.contains(TokenFlags::IS_FLOAT)
    }

    /// Whether this token was cut off by end of input.
    pub fn is_unterminated(&self) -> bool {
        self.flags.contains(TokenFlags::UNTERMINATED)
    }
}
