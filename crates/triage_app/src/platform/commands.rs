use std::path::PathBuf;

use thiserror::Error;
use triage_core::{Category, CategoryFilter, InputKind};

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(InputKind),
    Write(String),
    Open(PathBuf),
    Clear,
    Dismiss,
    Submit,
    History,
    Filter(CategoryFilter),
    Page(usize),
    NextPage,
    PrevPage,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command {0:?}; type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid page number {0:?}")]
    InvalidPage(String),
    #[error("unknown filter {0:?}; use all, produtivo or improdutivo")]
    InvalidFilter(String),
}

/// Parse a command line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "text" => Command::Select(InputKind::Text),
        "pdf" => Command::Select(InputKind::Pdf),
        "txt" => Command::Select(InputKind::Txt),
        "write" => Command::Write(unescape(rest)),
        "file" | "open" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("file"));
            }
            Command::Open(PathBuf::from(rest))
        }
        "clear" => Command::Clear,
        "dismiss" => Command::Dismiss,
        "submit" | "send" => Command::Submit,
        "history" => Command::History,
        "filter" => Command::Filter(parse_filter(rest)?),
        "page" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("page"));
            }
            let page = rest
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidPage(rest.to_string()))?;
            Command::Page(page)
        }
        "next" => Command::NextPage,
        "prev" | "previous" => Command::PrevPage,
        "back" | "new" => Command::Back,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_filter(raw: &str) -> Result<CategoryFilter, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MissingArgument("filter"));
    }
    if raw.eq_ignore_ascii_case("all") {
        return Ok(CategoryFilter::All);
    }
    raw.parse::<Category>()
        .map(CategoryFilter::from)
        .map_err(|_| ParseError::InvalidFilter(raw.to_string()))
}

/// `\n` becomes a newline and `\\` a backslash, so multi-line emails fit on one line.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
