//! Character classification used by the scanner.
//!
//! All classes are defined at the character-code level; there is no Unicode
//! table lookup anywhere. A character that falls into none of these classes
//! is identifier material.

/// Check if a character is whitespace (space, tab, or line break).
/// Carriage return is deliberately not in this set.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

/// Check if a character opens or closes a string literal.
#[inline]
pub fn is_quote(ch: char) -> bool {
    ch == '\'' || ch == '"'
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character is a hex digit letter (`a`-`f`, either case).
/// Decimal digits inside hex literals are covered by [`is_digit`].
#[inline]
pub fn is_hex_digit_letter(ch: char) -> bool {
    matches!(ch, 'a'..='f' | 'A'..='F')
}

/// Check if a character marks the hex sub-grammar after a leading zero.
#[inline]
pub fn is_hex_delimiter(ch: char) -> bool {
    ch == 'x' || ch == 'X'
}

/// The character that switches a numeric literal into its float form.
pub const FLOAT_DELIMITER: char = '.';

/// Check if a character can begin or extend an operator token.
#[inline]
pub fn is_operator_char(ch: char) -> bool {
    matches!(ch, '=' | '<' | '>' | '+' | '-' | '/' | '*' | '?')
}

/// Look up the comment terminator for a two-character opener window.
/// Returns the terminator the scanner must skip to, or `None` when the
/// window does not open a comment.
#[inline]
pub fn comment_terminator(prev: char, ch: char) -> Option<&'static str> {
    match (prev, ch) {
        ('/', '/') => Some("\n"),
        ('/', '*') => Some("*/"),
        _ => None,
    }
}

/// Check if a lone operator character could still become a comment opener
/// with one more character of lookahead.
#[inline]
pub fn is_comment_opener_prefix(ch: char) -> bool {
    ch == '/'
}
