use std::collections::BTreeSet;
use std::error::Error;
use std::path::{Path, PathBuf};

use statwatch::errors::StatwatchError;
use statwatch::interp::{CommandTemplate, render, validate};
use statwatch::status::{StatusSnapshot, WatchedField};
use statwatch::types::WatchTarget;

type TestResult = Result<(), Box<dyn Error>>;

fn template(args: &[&str]) -> CommandTemplate {
    CommandTemplate::new(
        "handler".to_string(),
        args.iter().map(|s| s.to_string()).collect(),
    )
}

fn snapshot() -> StatusSnapshot {
    StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_000),
        (WatchedField::Size, 4096),
        (WatchedField::Mode, 0o100644),
    ])
}

fn target(path: &str, fields: &[WatchedField]) -> WatchTarget {
    WatchTarget {
        path: PathBuf::from(path),
        fields: fields.iter().copied().collect::<BTreeSet<_>>(),
    }
}

#[test]
fn size_placeholder_renders_decimal() -> TestResult {
    let argv = render(
        &template(&["|size|"]),
        Some("|"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv, vec!["handler", "4096"]);
    Ok(())
}

#[test]
fn program_name_is_never_interpolated() -> TestResult {
    let tpl = CommandTemplate::new("|size|".to_string(), vec!["|size|".to_string()]);
    let argv = render(&tpl, Some("|"), &snapshot(), Path::new("/tmp/watched"))?;
    assert_eq!(argv, vec!["|size|", "4096"]);
    Ok(())
}

#[test]
fn multiple_placeholders_resolve_in_one_pass() -> TestResult {
    let argv = render(
        &template(&["|size|-|mtime|"]),
        Some("|"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv, vec!["handler", "4096-1700000000"]);
    Ok(())
}

#[test]
fn path_keyword_substitutes_real_path() -> TestResult {
    let argv = render(
        &template(&["|path|"]),
        Some("|"),
        &snapshot(),
        Path::new("/real/resolved/file"),
    )?;
    assert_eq!(argv, vec!["handler", "/real/resolved/file"]);
    Ok(())
}

#[test]
fn short_flag_tokens_are_case_sensitive() -> TestResult {
    // `m` is mtime, `M` is mode.
    let argv = render(
        &template(&["|m|", "|M|"]),
        Some("|"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv[1], "1700000000");
    assert_eq!(argv[2], (0o100644 as i64).to_string());
    Ok(())
}

#[test]
fn empty_token_passes_through() -> TestResult {
    let argv = render(
        &template(&["a||b"]),
        Some("|"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv[1], "a||b");
    Ok(())
}

#[test]
fn unmatched_delimiter_passes_through() -> TestResult {
    let argv = render(
        &template(&["50|size"]),
        Some("|"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv[1], "50|size");
    Ok(())
}

#[test]
fn no_delimiter_passes_template_verbatim() -> TestResult {
    let argv = render(
        &template(&["|size|"]),
        None,
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv, vec!["handler", "|size|"]);
    Ok(())
}

#[test]
fn multi_character_delimiter() -> TestResult {
    let argv = render(
        &template(&["%%size%%"]),
        Some("%%"),
        &snapshot(),
        Path::new("/tmp/watched"),
    )?;
    assert_eq!(argv[1], "4096");
    Ok(())
}

#[test]
fn unknown_token_fails_validation() {
    let targets = [target("watched", &[WatchedField::Size])];
    let err = validate(&template(&["|bogus|"]), Some("|"), &targets).unwrap_err();
    assert!(matches!(
        err,
        StatwatchError::UnknownPlaceholder { ref token } if token == "bogus"
    ));
}

#[test]
fn unwatched_field_fails_validation() {
    // The template references size, but one target only watches mtime;
    // its snapshot would have no size value to substitute.
    let targets = [
        target("a", &[WatchedField::Mtime, WatchedField::Size]),
        target("b", &[WatchedField::Mtime]),
    ];
    let err = validate(&template(&["|size|"]), Some("|"), &targets).unwrap_err();
    assert!(matches!(
        err,
        StatwatchError::UnknownPlaceholder { ref token } if token == "size"
    ));
}

#[test]
fn path_keyword_always_validates() -> TestResult {
    let targets = [target("watched", &[WatchedField::Mtime])];
    validate(&template(&["|path|"]), Some("|"), &targets)?;
    Ok(())
}

#[test]
fn validation_without_delimiter_is_a_no_op() -> TestResult {
    let targets = [target("watched", &[WatchedField::Mtime])];
    validate(&template(&["|bogus|"]), None, &targets)?;
    Ok(())
}
