//! msc: The minscript command-line tokenizer.
//!
//! Usage:
//!   msc [options] [file...]
//!
//! Scans each input file and prints the token stream and any lexical
//! diagnostics. Exits with code 1 when a diagnostic was reported.

use clap::Parser as ClapParser;
use minscript_core::text::LineMap;
use minscript_diagnostics::DiagnosticCollection;
use minscript_scanner::{tokenize, ScanOutput, TokenKind};
use serde_json::json;
use std::fs;
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "msc", about = "minscript - a tokenizer for minscript source files", disable_version_flag = true)]
struct Cli {
    /// minscript files to scan.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Emit a machine-readable JSON dump instead of the token table.
    #[arg(long)]
    json: bool,

    /// Leave comment tokens out of the listing.
    #[arg(long = "skip-comments")]
    skip_comments: bool,

    /// Only print diagnostics, not the token table.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Print the tokenizer version.
    #[arg(short = 'v', long)]
    version: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("msc Version 0.1.0");
        return;
    }

    if cli.files.is_empty() {
        print_error("No input files found.");
        process::exit(1);
    }

    let mut error_count = 0usize;
    for file in &cli.files {
        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(err) => {
                print_error(&format!("Cannot read '{}': {}", file, err));
                process::exit(1);
            }
        };
        let output = tokenize(&source);
        error_count += output.errors.len();

        if cli.json {
            println!("{}", render_json(file, &output));
        } else {
            if !cli.quiet {
                print_tokens(&output, cli.skip_comments);
            }
            print_diagnostics(file, &source, &output.diagnostics());
        }
    }

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_tokens(output: &ScanOutput, skip_comments: bool) {
    for token in &output.tokens {
        if skip_comments && token.kind == TokenKind::Comment {
            continue;
        }
        let mut detail = String::new();
        if token.is_hex() {
            detail.push_str(" hex");
        }
        if token.is_float() {
            detail.push_str(" float");
        }
        if token.is_unterminated() {
            detail.push_str(" unterminated");
        }
        if let Some(quote) = token.quote {
            detail.push_str(&format!(" quote={}", quote));
        }
        println!(
            "{GRAY}{:>5}..{:<5}{RESET} {CYAN}{:<16}{RESET} {:?}{GRAY}{}{RESET}",
            token.pos,
            token.end,
            token.kind.name(),
            token.text,
            detail,
        );
    }
}

fn print_diagnostics(file: &str, source: &str, diagnostics: &DiagnosticCollection) {
    if diagnostics.is_empty() {
        return;
    }
    let line_map = LineMap::new(source);
    for diagnostic in diagnostics.diagnostics() {
        let location = diagnostic
            .span
            .map(|span| line_map.line_and_column_of(span.start))
            .map(|lc| format!("({},{})", lc.line + 1, lc.character + 1))
            .unwrap_or_default();
        eprintln!(
            "{BOLD}{}{}{RESET}: {RED}{}{RESET} MS{}: {}",
            file, location, diagnostic.category, diagnostic.code, diagnostic.message_text,
        );
    }
}

fn render_json(file: &str, output: &ScanOutput) -> String {
    let tokens: Vec<_> = output
        .tokens
        .iter()
        .map(|token| {
            let mut value = json!({
                "kind": token.kind.name(),
                "text": token.text,
                "start": token.pos,
                "end": token.end,
            });
            if token.kind == TokenKind::Number {
                value["is_hex"] = json!(token.is_hex());
                value["is_float"] = json!(token.is_float());
            }
            if let Some(quote) = token.quote {
                value["quote"] = json!(quote.to_string());
            }
            if token.is_unterminated() {
                value["unterminated"] = json!(true);
            }
            value
        })
        .collect();
    let errors: Vec<_> = output
        .errors
        .iter()
        .map(|error| {
            json!({
                "message": error.diagnostic.message_text,
                "code": error.diagnostic.code,
                "token": error.token,
            })
        })
        .collect();
    json!({ "file": file, "tokens": tokens, "errors": errors }).to_string()
}

fn print_error(message: &str) {
    eprintln!("{RED}error{RESET}: {}", message);
}
