//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes minscript constructs and
//! reports lexical errors without ever aborting the scan.

use minscript_scanner::{tokenize, TokenKind};

/// Helper: scan all tokens from source and return as (kind, text) pairs.
fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .tokens
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

#[test]
fn test_empty_source() {
    let output = tokenize("");
    assert!(output.tokens.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn test_whitespace_only() {
    let output = tokenize("   \n\t  ");
    assert!(output.tokens.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn test_declaration_statement() {
    let tokens = scan_all("const msg = 'hi';");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Reserved, "const".to_string()),
            (TokenKind::Identifier, "msg".to_string()),
            (TokenKind::Operator, "=".to_string()),
            (TokenKind::String, "hi".to_string()),
            (TokenKind::Semicolon, ";".to_string()),
        ]
    );
}

#[test]
fn test_keywords() {
    let kinds = scan_kinds(
        "if else while default do function export continue return for break let const",
    );
    assert_eq!(kinds.len(), 13);
    assert!(kinds.iter().all(|k| *k == TokenKind::Reserved));
}

#[test]
fn test_reserved_literals() {
    let kinds = scan_kinds("null undefined true false");
    assert!(kinds.iter().all(|k| *k == TokenKind::ReservedLiteral));
}

#[test]
fn test_keyword_prefix_collision() {
    // "iffy" grows through "if" (reserved) and must land on identifier.
    let tokens = scan_all("iffy");
    assert_eq!(tokens, vec![(TokenKind::Identifier, "iffy".to_string())]);
}

#[test]
fn test_keyword_ends_at_punctuation() {
    // The reserved classification is kept when the token ends at a
    // punctuation boundary rather than growing past the keyword.
    let tokens = scan_all("if(x)");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Reserved, "if".to_string()),
            (TokenKind::ParenOpen, "(".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::ParenClose, ")".to_string()),
        ]
    );
}

#[test]
fn test_identifier_with_digits() {
    let tokens = scan_all("a1b2");
    assert_eq!(tokens, vec![(TokenKind::Identifier, "a1b2".to_string())]);
}

#[test]
fn test_operators() {
    let tokens = scan_all("= < > + - / * ? ++ -- += -= <= >= ==");
    assert_eq!(tokens.len(), 15);
    assert!(tokens.iter().all(|(k, _)| *k == TokenKind::Operator));
}

#[test]
fn test_multi_char_operator_greediness() {
    // "<==" must be "<=" then "=", never "<", "=", "=".
    let tokens = scan_all("<==");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Operator, "<=".to_string()),
            (TokenKind::Operator, "=".to_string()),
        ]
    );
}

#[test]
fn test_adjacent_operators_without_combination() {
    let tokens = scan_all("+++");
    // "++" greedily, then a lone "+".
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Operator, "++".to_string()),
            (TokenKind::Operator, "+".to_string()),
        ]
    );
}

#[test]
fn test_operator_ends_identifier() {
    let tokens = scan_all("a<=b==c");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, "a".to_string()),
            (TokenKind::Operator, "<=".to_string()),
            (TokenKind::Identifier, "b".to_string()),
            (TokenKind::Operator, "==".to_string()),
            (TokenKind::Identifier, "c".to_string()),
        ]
    );
}

#[test]
fn test_punctuation_never_merges() {
    let tokens = scan_all("[[]]");
    assert_eq!(
        scan_kinds("[[]]"),
        vec![
            TokenKind::BracketOpen,
            TokenKind::BracketOpen,
            TokenKind::BracketClose,
            TokenKind::BracketClose,
        ]
    );
    assert!(tokens.iter().all(|(_, text)| text.len() == 1));
}

#[test]
fn test_member_access() {
    let tokens = scan_all("obj.field");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, "obj".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Identifier, "field".to_string()),
        ]
    );
}

#[test]
fn test_leading_dot_is_punctuation() {
    let tokens = scan_all(".5");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Number, "5".to_string()),
        ]
    );
}

// --- Numeric literals ---

#[test]
fn test_decimal_number() {
    let output = tokenize("1024");
    assert_eq!(output.tokens.len(), 1);
    let token = &output.tokens[0];
    assert_eq!(token.kind, TokenKind::Number);
    assert!(!token.is_hex());
    assert!(!token.is_float());
}

#[test]
fn test_hex_number() {
    let output = tokenize("0x1A");
    assert_eq!(output.tokens.len(), 1);
    let token = &output.tokens[0];
    assert_eq!(token.text, "0x1A");
    assert!(token.is_hex());
    assert!(!token.is_float());
    assert!(output.errors.is_empty());
}

#[test]
fn test_hex_number_uppercase_prefix() {
    let output = tokenize("0X2f");
    assert_eq!(output.tokens[0].text, "0X2f");
    assert!(output.tokens[0].is_hex());
    assert!(output.errors.is_empty());
}

#[test]
fn test_float_number() {
    let output = tokenize("0.25");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "0.25");
    assert!(output.tokens[0].is_float());
    assert!(output.errors.is_empty());
}

#[test]
fn test_number_ends_at_operator() {
    let tokens = scan_all("1+2");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Number, "1".to_string()),
            (TokenKind::Operator, "+".to_string()),
            (TokenKind::Number, "2".to_string()),
        ]
    );
}

#[test]
fn test_invalid_number_single_error() {
    // The literal freezes at "1" and the rest of the malformed run is
    // consumed without further errors.
    let output = tokenize("1abc");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "1");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].diagnostic.message_text, "Invalid number");
}

#[test]
fn test_invalid_hex_number() {
    let output = tokenize("0xg");
    assert_eq!(output.tokens[0].text, "0x");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].diagnostic.message_text, "Invalid hex number");
}

#[test]
fn test_hex_delimiter_after_nonzero_is_invalid() {
    let output = tokenize("10x");
    assert_eq!(output.tokens[0].text, "10");
    assert!(!output.tokens[0].is_hex());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].diagnostic.message_text, "Invalid number");
}

#[test]
fn test_double_float_delimiter() {
    let output = tokenize("1.2.3");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "1.2");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].diagnostic.message_text,
        "Invalid float number"
    );
}

#[test]
fn test_suppression_latch_clears_at_next_literal() {
    let output = tokenize("1a 2b");
    let texts: Vec<&str> = output.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["1", "2"]);
    // One error per malformed literal, not per malformed character.
    assert_eq!(output.errors.len(), 2);
}

#[test]
fn test_suppression_latch_clears_at_string() {
    let output = tokenize("1a'x'");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.tokens[1].kind, TokenKind::String);
    assert_eq!(output.tokens[1].text, "x");
    assert_eq!(output.errors.len(), 1);
}

#[test]
fn test_latched_number_ends_at_punctuation() {
    let output = tokenize("1a.5");
    let tokens: Vec<(TokenKind, &str)> = output
        .tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str()))
        .collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Number, "1"),
            (TokenKind::Dot, "."),
            (TokenKind::Number, "5"),
        ]
    );
    assert_eq!(output.errors.len(), 1);
}

// --- Strings ---

#[test]
fn test_string_round_trip() {
    let output = tokenize("'abc'");
    let token = &output.tokens[0];
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "abc");
    assert_eq!(token.quote, Some('\''));
}

#[test]
fn test_double_quoted_string() {
    let output = tokenize("\"abc\"");
    assert_eq!(output.tokens[0].quote, Some('"'));
}

#[test]
fn test_empty_string() {
    let output = tokenize("''");
    let token = &output.tokens[0];
    assert_eq!(token.text, "");
    assert_eq!((token.pos, token.end), (0, 2));
}

#[test]
fn test_other_quote_is_string_content() {
    let output = tokenize("'a\"b'");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "a\"b");
}

#[test]
fn test_string_swallows_whitespace_and_operators() {
    let output = tokenize("'a + b;'");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "a + b;");
}

#[test]
fn test_no_escape_processing() {
    let output = tokenize(r"'a\n'");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, r"a\n");
}

#[test]
fn test_comment_opener_inside_string_is_content() {
    let output = tokenize("'//not a comment'");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].kind, TokenKind::String);
    assert_eq!(output.tokens[0].text, "//not a comment");
}

#[test]
fn test_unterminated_string_reported() {
    let output = tokenize("'abc");
    assert_eq!(output.tokens.len(), 1);
    assert!(output.tokens[0].is_unterminated());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].diagnostic.message_text,
        "Unterminated string literal"
    );
    assert_eq!(output.errors[0].token, 0);
}

// --- Comments ---

#[test]
fn test_line_comment_asymmetry() {
    // The line terminator is consumed but excluded from the text.
    let output = tokenize("// hi\n");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "// hi");
    assert_eq!((output.tokens[0].pos, output.tokens[0].end), (0, 5));
}

#[test]
fn test_block_comment_asymmetry() {
    // The closing marker is part of the text.
    let output = tokenize("/* hi */");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "/* hi */");
    assert_eq!((output.tokens[0].pos, output.tokens[0].end), (0, 8));
}

#[test]
fn test_comment_between_tokens() {
    let tokens = scan_all("a /* x */ b");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, "a".to_string()),
            (TokenKind::Comment, "/* x */".to_string()),
            (TokenKind::Identifier, "b".to_string()),
        ]
    );
}

#[test]
fn test_line_comment_after_expression() {
    let tokens = scan_all("let a = 1 // init\nlet b = 2");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Reserved, "let".to_string()),
            (TokenKind::Identifier, "a".to_string()),
            (TokenKind::Operator, "=".to_string()),
            (TokenKind::Number, "1".to_string()),
            (TokenKind::Comment, "// init".to_string()),
            (TokenKind::Reserved, "let".to_string()),
            (TokenKind::Identifier, "b".to_string()),
            (TokenKind::Operator, "=".to_string()),
            (TokenKind::Number, "2".to_string()),
        ]
    );
}

#[test]
fn test_division_is_not_a_comment() {
    let tokens = scan_all("a / b");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, "a".to_string()),
            (TokenKind::Operator, "/".to_string()),
            (TokenKind::Identifier, "b".to_string()),
        ]
    );
}

#[test]
fn test_block_comment_short_close() {
    // The window test uses the raw previous character, so the opener's own
    // asterisk can close the comment.
    let output = tokenize("/*/");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(output.tokens[0].text, "/*/");
    assert!(output.errors.is_empty());
}

#[test]
fn test_block_close_can_open_line_comment() {
    // The slash that closes a block comment is also the raw previous
    // character for the next window test, so "/**//" ends with a line
    // comment whose span overlaps the block comment's last character.
    let output = tokenize("/**//");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.tokens[0].text, "/**/");
    assert_eq!((output.tokens[0].pos, output.tokens[0].end), (0, 4));
    assert_eq!(output.tokens[1].kind, TokenKind::Comment);
    assert_eq!(output.tokens[1].text, "//");
    assert_eq!((output.tokens[1].pos, output.tokens[1].end), (3, 5));
}

#[test]
fn test_unterminated_block_comment_reported() {
    let output = tokenize("a /* gone");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.tokens[1].kind, TokenKind::Comment);
    assert!(output.tokens[1].is_unterminated());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].diagnostic.message_text,
        "Unterminated comment"
    );
    assert_eq!(output.errors[0].token, 1);
}

#[test]
fn test_line_comment_at_end_of_input_is_clean() {
    let output = tokenize("// tail");
    assert_eq!(output.tokens.len(), 1);
    assert!(!output.tokens[0].is_unterminated());
    assert!(output.errors.is_empty());
}

#[test]
fn test_punctuation_is_single_char() {
    let output = tokenize("f(a, b); // call\nlist[0] = {x: 1.5};");
    for token in &output.tokens {
        if token.kind.is_punctuation() {
            assert_eq!(token.len(), 1, "punctuation merged: {:?}", token);
        }
    }
}

// --- Offsets ---

#[test]
fn test_offsets_are_ordered_and_nonempty() {
    let source = "function add(a, b) { return a + b; } // done\nlet r = add(0x1F, 2.5);";
    let output = tokenize(source);
    assert!(!output.tokens.is_empty());
    for token in &output.tokens {
        assert!(token.pos < token.end, "empty span for {:?}", token);
    }
    // Non-comment, non-string tokens never overlap.
    let solid: Vec<_> = output
        .tokens
        .iter()
        .filter(|t| !matches!(t.kind, TokenKind::Comment | TokenKind::String))
        .collect();
    for pair in solid.windows(2) {
        assert!(
            pair[0].end <= pair[1].pos,
            "overlap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_token_text_matches_source_slice() {
    let source = "let total = count + 12;";
    let output = tokenize(source);
    for token in &output.tokens {
        let slice: String = source
            .chars()
            .skip(token.pos as usize)
            .take((token.end - token.pos) as usize)
            .collect();
        assert_eq!(slice, token.text, "span/text mismatch for {:?}", token);
    }
}

// --- Error tokens stay in the output ---

#[test]
fn test_errors_reference_live_tokens() {
    let output = tokenize("let bad = 0xzz; let ok = 1;");
    assert!(output.has_errors());
    for error in &output.errors {
        assert!(error.token < output.tokens.len());
        assert_eq!(output.tokens[error.token].kind, TokenKind::Number);
    }
    // Scanning continued past the malformed literal.
    let texts: Vec<&str> = output.tokens.iter().map(|t| t.text.as_str()).collect();
    assert!(texts.contains(&"ok"));
}

#[test]
fn test_diagnostics_collection() {
    let output = tokenize("1a 2b");
    let diagnostics = output.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 2);
}
