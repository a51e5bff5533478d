//! The minscript scanner.
//!
//! Converts source text into an ordered sequence of classified tokens plus a
//! list of lexical errors, in a single left-to-right pass with one character
//! of lookbehind and no backtracking. Comments are tokens like any other and
//! appear inline in the output; downstream consumers filter them as needed.

use crate::char_codes::{
    comment_terminator, is_comment_opener_prefix, is_digit, is_hex_delimiter, is_hex_digit_letter,
    is_operator_char, is_quote, is_white_space, FLOAT_DELIMITER,
};
use crate::token::{
    is_operator_text, is_reserved_literal, is_reserved_word, Token, TokenFlags, TokenId, TokenKind,
};
use minscript_core::text::TextPos;
use minscript_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// A lexical error, tied to the token that was being built when it was
/// detected. The token stays in the output sequence; errors are advisory
/// and never abort the scan.
#[derive(Debug, Clone)]
pub struct LexError {
    /// The realized diagnostic, carrying the offending token's span as it
    /// stood at detection time.
    pub diagnostic: Diagnostic,
    /// Index of the offending token in the output sequence.
    pub token: TokenId,
}

/// The scanner's complete output: tokens in source order, errors in
/// detection order. Both may be empty; scanning never fails.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Flatten the error list into a diagnostic collection for display layers.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        let mut collection = DiagnosticCollection::new();
        for error in &self.errors {
            collection.add(error.diagnostic.clone());
        }
        collection
    }
}

/// Scan source text into tokens and errors.
pub fn tokenize(text: &str) -> ScanOutput {
    Scanner::new(text).scan()
}

/// The single-pass character classifier.
///
/// The output token sequence doubles as an arena: the token currently being
/// grown is addressed by its index, so already-appended entries keep mutating
/// in place until the scanner stops referencing them. The lone exception is a
/// freshly created `/` operator, which is held back one character because it
/// may turn out to be the first half of a comment opener; it is committed to
/// the arena as soon as the next character rules that out.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// The raw previous character, for two-character window tests.
    prev: Option<char>,
    /// Tokens emitted so far.
    tokens: Vec<Token>,
    /// Errors recorded so far.
    errors: Vec<LexError>,
    /// Arena index of the token currently being grown.
    current: Option<TokenId>,
    /// The quote character of the string currently open.
    open_quote: Option<char>,
    /// The comment token currently being grown. Held out of the arena until
    /// its terminator closes it.
    comment: Option<Token>,
    /// Terminator of the open comment (`"\n"` or `"*/"`).
    comment_close: Option<&'static str>,
    /// A one-character operator awaiting confirmation that it is not a
    /// comment opener.
    pending_operator: Option<Token>,
    /// Growth-suppression latch: freezes a malformed numeric literal and
    /// silences further errors for it until the next token is created.
    suppress_growth: bool,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            prev: None,
            tokens: Vec::new(),
            errors: Vec::new(),
            current: None,
            open_quote: None,
            comment: None,
            comment_close: None,
            pending_operator: None,
            suppress_growth: false,
        }
    }

    /// Run the scan to completion, consuming the scanner.
    pub fn scan(mut self) -> ScanOutput {
        while self.pos < self.text.len() {
            let ch = self.text[self.pos];
            self.step(ch);
            self.prev = Some(ch);
            self.pos += 1;
        }
        self.finish()
    }

    /// End offset for a token whose last character is the current one.
    #[inline]
    fn end_of_current(&self) -> TextPos {
        self.pos as TextPos + 1
    }

    /// Classify one character.
    fn step(&mut self, ch: char) {
        if self.comment_close.is_some() {
            self.scan_comment_char(ch);
            return;
        }

        // Comment openers are detected on a two-character window before any
        // other classification, but never inside a string. The previous
        // character is the raw source character, whether or not it already
        // belongs to a finished token.
        if self.open_quote.is_none() {
            if let Some(prev) = self.prev {
                if let Some(terminator) = comment_terminator(prev, ch) {
                    self.begin_comment(prev, ch, terminator);
                    return;
                }
            }
        }

        // The window test failed, so a held-back `/` really was an operator.
        if let Some(op) = self.pending_operator.take() {
            self.current = Some(self.tokens.len());
            self.tokens.push(op);
        }

        // The quote character that opened the current string closes it.
        // The closing quote is consumed but excluded from the text.
        if self.open_quote == Some(ch) {
            let end = self.end_of_current();
            if let Some(id) = self.current.take() {
                self.tokens[id].end = end;
            }
            self.open_quote = None;
            return;
        }

        // Inside a string every character is content, verbatim.
        if self.open_quote.is_some() {
            let end = self.end_of_current();
            if let Some(id) = self.current {
                let token = &mut self.tokens[id];
                token.text.push(ch);
                token.end = end;
            }
            return;
        }

        if is_quote(ch) {
            self.begin_string(ch);
            return;
        }

        // Whitespace ends the current token unconditionally, without
        // inspecting its kind, and is never itself emitted.
        if is_white_space(ch) {
            self.current = None;
            return;
        }

        // Grow the current token if this character is compatible with it.
        if let Some(id) = self.current {
            let consumed = match self.tokens[id].kind {
                kind if kind.is_identifier_class() => self.grow_name(id, ch),
                TokenKind::Operator => self.grow_operator(id, ch),
                TokenKind::Number => self.grow_number(id, ch),
                // Strings are handled above; punctuation and comments are
                // never the current token.
                _ => false,
            };
            if consumed {
                return;
            }
            self.current = None;
        }

        self.begin_fresh(ch);
    }

    /// Enter skip mode for a comment. The previous character was the first
    /// half of the opener: if it was held back as a provisional operator it
    /// is discarded, never having reached the output sequence.
    fn begin_comment(&mut self, prev: char, ch: char, terminator: &'static str) {
        self.pending_operator = None;
        let pos = self.pos as TextPos;
        let mut token = Token::new(TokenKind::Comment, pos - 1, pos + 1);
        token.text.push(prev);
        token.text.push(ch);
        self.comment = Some(token);
        self.comment_close = Some(terminator);
    }

    /// Consume one character of an open comment.
    ///
    /// Line comments close on the terminator without including it, keeping
    /// their end offset one past the last content character. Block comments
    /// append every character first and then compare the raw two-character
    /// window against the terminator, so the closing marker is part of the
    /// text and the end offset is one past the closing slash.
    fn scan_comment_char(&mut self, ch: char) {
        let terminator = match self.comment_close {
            Some(terminator) => terminator,
            None => return,
        };
        if terminator.len() == 1 {
            if terminator.starts_with(ch) {
                self.finish_comment();
            } else if let Some(token) = self.comment.as_mut() {
                token.text.push(ch);
                token.end = self.pos as TextPos + 1;
            }
            return;
        }
        if let Some(token) = self.comment.as_mut() {
            token.text.push(ch);
            token.end = self.pos as TextPos + 1;
        }
        let mut expected = terminator.chars();
        if self.prev == expected.next() && Some(ch) == expected.next() {
            self.finish_comment();
        }
    }

    /// Close the open comment and commit it to the output sequence.
    fn finish_comment(&mut self) {
        self.comment_close = None;
        if let Some(token) = self.comment.take() {
            self.tokens.push(token);
        }
    }

    /// Open a string token. It is appended immediately with empty text; the
    /// quote character itself is recorded but not part of the text.
    fn begin_string(&mut self, quote: char) {
        // A new token of any kind clears the suppression latch.
        self.suppress_growth = false;
        let pos = self.pos as TextPos;
        let token = Token::new(TokenKind::String, pos, pos + 1).with_quote(quote);
        self.current = Some(self.tokens.len());
        self.tokens.push(token);
        self.open_quote = Some(quote);
    }

    /// Grow an identifier-class token by one character, or end it when an
    /// operator or punctuation character follows.
    fn grow_name(&mut self, id: TokenId, ch: char) -> bool {
        if is_operator_char(ch) || TokenKind::from_punctuation(ch).is_some() {
            return false;
        }
        let end = self.end_of_current();
        let token = &mut self.tokens[id];
        // Reclassify-then-retest: a reserved word or literal that keeps
        // growing first drops back to identifier, then the whole new text is
        // retested, so "if" -> "iffy" lands on identifier.
        token.kind = TokenKind::Identifier;
        token.text.push(ch);
        if is_reserved_word(&token.text) {
            token.kind = TokenKind::Reserved;
        } else if is_reserved_literal(&token.text) {
            token.kind = TokenKind::ReservedLiteral;
        }
        token.end = end;
        true
    }

    /// Grow an operator token by one character if the concatenation is
    /// itself a recognized operator.
    fn grow_operator(&mut self, id: TokenId, ch: char) -> bool {
        let end = self.end_of_current();
        let token = &mut self.tokens[id];
        let mut extended = token.text.clone();
        extended.push(ch);
        if !is_operator_text(&extended) {
            return false;
        }
        token.text = extended;
        token.end = end;
        true
    }

    /// Grow a numeric literal by one character.
    ///
    /// The float delimiter takes precedence over its punctuation reading
    /// while the number is live; any other operator or punctuation character
    /// ends the number. Once the suppression latch is set the token is
    /// frozen: further characters are consumed silently until a boundary
    /// character starts the next token.
    fn grow_number(&mut self, id: TokenId, ch: char) -> bool {
        if self.suppress_growth {
            return !(is_operator_char(ch) || TokenKind::from_punctuation(ch).is_some());
        }
        if ch == FLOAT_DELIMITER {
            if self.tokens[id].text.contains(FLOAT_DELIMITER) {
                self.record_error(&messages::INVALID_FLOAT_NUMBER, id);
                self.suppress_growth = true;
            } else {
                let end = self.end_of_current();
                let token = &mut self.tokens[id];
                token.text.push(ch);
                token.flags |= TokenFlags::IS_FLOAT;
                token.end = end;
            }
            return true;
        }
        if is_operator_char(ch) || TokenKind::from_punctuation(ch).is_some() {
            return false;
        }
        let end = self.end_of_current();
        let token = &mut self.tokens[id];
        if is_digit(ch) {
            token.text.push(ch);
            token.end = end;
            return true;
        }
        // The hex prefix is recognized exactly once, immediately after a
        // lone leading zero; any other x/X falls through to the error path.
        if is_hex_delimiter(ch) && token.text == "0" {
            token.text.push(ch);
            token.flags |= TokenFlags::IS_HEX;
            token.end = end;
            return true;
        }
        if token.is_hex() && is_hex_digit_letter(ch) {
            token.text.push(ch);
            token.end = end;
            return true;
        }
        let message: &'static DiagnosticMessage = if token.is_hex() {
            &messages::INVALID_HEX_NUMBER
        } else {
            &messages::INVALID_NUMBER
        };
        self.record_error(message, id);
        self.suppress_growth = true;
        true
    }

    /// Start a brand-new token at the current character. Creating a token
    /// clears the growth-suppression latch: a malformed literal stays frozen
    /// only until the next token boundary.
    fn begin_fresh(&mut self, ch: char) {
        self.suppress_growth = false;
        let pos = self.pos as TextPos;
        if let Some(kind) = TokenKind::from_punctuation(ch) {
            // Punctuation is appended and finalized immediately; no current
            // reference is retained and it never merges with its neighbors.
            self.tokens
                .push(Token::new(kind, pos, pos + 1).with_text(String::from(ch)));
            return;
        }
        if is_operator_char(ch) {
            let token = Token::new(TokenKind::Operator, pos, pos + 1).with_text(String::from(ch));
            if is_comment_opener_prefix(ch) {
                // Lookahead-confirmed commit: hold the token back one
                // character in case the next one completes a comment opener.
                self.pending_operator = Some(token);
            } else {
                self.current = Some(self.tokens.len());
                self.tokens.push(token);
            }
            return;
        }
        let kind = if is_digit(ch) {
            TokenKind::Number
        } else {
            TokenKind::Identifier
        };
        self.current = Some(self.tokens.len());
        self.tokens
            .push(Token::new(kind, pos, pos + 1).with_text(String::from(ch)));
    }

    /// Record an advisory error against a token. The token stays in the
    /// output sequence; its span is captured as it stands at detection time.
    fn record_error(&mut self, message: &'static DiagnosticMessage, token: TokenId) {
        let span = self.tokens[token].span();
        self.errors.push(LexError {
            diagnostic: Diagnostic::with_span(span, message, &[]),
            token,
        });
    }

    /// Flush end-of-input state and return the accumulated output.
    ///
    /// A pending `/` can no longer open a comment and is committed. A line
    /// comment is terminated by end of input like a line break; a block
    /// comment and a string are emitted in their last recorded state, marked
    /// unterminated, with an error referencing them.
    fn finish(mut self) -> ScanOutput {
        if let Some(op) = self.pending_operator.take() {
            self.tokens.push(op);
        }
        if let Some(terminator) = self.comment_close.take() {
            if let Some(mut token) = self.comment.take() {
                if terminator.len() == 1 {
                    self.tokens.push(token);
                } else {
                    token.flags |= TokenFlags::UNTERMINATED;
                    let id = self.tokens.len();
                    self.tokens.push(token);
                    self.record_error(&messages::UNTERMINATED_COMMENT, id);
                }
            }
        }
        if self.open_quote.is_some() {
            if let Some(id) = self.current.take() {
                self.tokens[id].flags |= TokenFlags::UNTERMINATED;
                self.record_error(&messages::UNTERMINATED_STRING_LITERAL, id);
            }
        }
        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }
}
