// src/interp.rs

//! Placeholder interpolation of command arguments from status fields.
//!
//! With `-I DELIM`, every `DELIM<token>DELIM` in an argument is replaced
//! by the corresponding field value of the triggering target's snapshot,
//! or by its real path for the `path` keyword. Interpolation is a pure
//! function over the immutable template plus one snapshot; all
//! placeholders are validated against the configured field sets at
//! startup so bad templates fail before polling begins.

use std::path::Path;

use crate::errors::{Result, StatwatchError};
use crate::status::{StatusSnapshot, WatchedField};
use crate::types::WatchTarget;

/// Program name plus raw argument strings, immutable after parse.
///
/// The program name itself is never interpolated.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandTemplate {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

/// One recognized placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Field(WatchedField),
    Path,
}

fn resolve_token(token: &str) -> Option<Token> {
    if token.eq_ignore_ascii_case("path") {
        return Some(Token::Path);
    }
    WatchedField::from_token(token).map(Token::Field)
}

/// Delimiter-bound tokens in one argument: (byte offset of the opening
/// delimiter, token text).
///
/// Doubled delimiters (empty tokens) are not placeholders, and a
/// delimiter with no closing partner ends the scan; in both cases the
/// surrounding text passes through verbatim.
fn find_tokens<'a>(arg: &'a str, delim: &str) -> Vec<(usize, &'a str)> {
    let mut tokens = Vec::new();
    let mut search_from = 0;

    while let Some(rel) = arg[search_from..].find(delim) {
        let open = search_from + rel;
        let key_start = open + delim.len();
        let Some(rel_close) = arg[key_start..].find(delim) else {
            break;
        };
        let close = key_start + rel_close;
        if close > key_start {
            tokens.push((open, &arg[key_start..close]));
        }
        search_from = close + delim.len();
    }

    tokens
}

fn render_argument(
    arg: &str,
    delim: &str,
    snapshot: &StatusSnapshot,
    real_path: &Path,
) -> Result<String> {
    let mut out = String::new();
    let mut copied_to = 0;

    for (offset, token) in find_tokens(arg, delim) {
        out.push_str(&arg[copied_to..offset]);

        match resolve_token(token) {
            Some(Token::Path) => out.push_str(&real_path.to_string_lossy()),
            Some(Token::Field(field)) => match snapshot.value(field) {
                Some(value) => out.push_str(&value.to_string()),
                None => {
                    return Err(StatwatchError::UnknownPlaceholder {
                        token: token.to_string(),
                    });
                }
            },
            None => {
                return Err(StatwatchError::UnknownPlaceholder {
                    token: token.to_string(),
                });
            }
        }

        copied_to = offset + token.len() + 2 * delim.len();
    }

    out.push_str(&arg[copied_to..]);
    Ok(out)
}

/// Render the full argv for one trigger.
///
/// `real_path` is the canonicalized path of the triggering target; with no
/// delimiter configured the template passes through verbatim.
pub fn render(
    template: &CommandTemplate,
    delim: Option<&str>,
    snapshot: &StatusSnapshot,
    real_path: &Path,
) -> Result<Vec<String>> {
    let mut argv = Vec::with_capacity(template.args.len() + 1);
    argv.push(template.program.clone());

    match delim {
        Some(delim) if !delim.is_empty() => {
            for arg in &template.args {
                argv.push(render_argument(arg, delim, snapshot, real_path)?);
            }
        }
        _ => argv.extend(template.args.iter().cloned()),
    }

    Ok(argv)
}

/// Startup validation, run before any polling.
///
/// Every token must resolve, and every referenced field must be watched by
/// **every** target: any target may be the one that triggers, and its
/// snapshot carries only its own fields.
pub fn validate(
    template: &CommandTemplate,
    delim: Option<&str>,
    targets: &[WatchTarget],
) -> Result<()> {
    let Some(delim) = delim.filter(|d| !d.is_empty()) else {
        return Ok(());
    };

    for arg in &template.args {
        for (_, token) in find_tokens(arg, delim) {
            match resolve_token(token) {
                Some(Token::Path) => {}
                Some(Token::Field(field)) => {
                    if targets.iter().any(|t| !t.fields.contains(&field)) {
                        return Err(StatwatchError::UnknownPlaceholder {
                            token: token.to_string(),
                        });
                    }
                }
                None => {
                    return Err(StatwatchError::UnknownPlaceholder {
                        token: token.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}
