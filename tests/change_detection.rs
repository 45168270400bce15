use std::collections::BTreeSet;
use std::error::Error;

use statwatch::status::{StatusSnapshot, WatchedField, changed_fields};

type TestResult = Result<(), Box<dyn Error>>;

fn fields(list: &[WatchedField]) -> BTreeSet<WatchedField> {
    list.iter().copied().collect()
}

#[test]
fn unchanged_values_do_not_trigger() -> TestResult {
    let prev = StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_000),
        (WatchedField::Size, 4096),
    ]);
    let next = prev.clone();

    let diff = changed_fields(
        Some(&prev),
        &next,
        &fields(&[WatchedField::Mtime, WatchedField::Size]),
    );
    assert!(diff.is_empty());
    Ok(())
}

#[test]
fn first_sample_establishes_baseline_without_triggering() -> TestResult {
    let next = StatusSnapshot::from_values([(WatchedField::Mtime, 1_700_000_000)]);

    let diff = changed_fields(None, &next, &fields(&[WatchedField::Mtime]));
    assert!(diff.is_empty());
    Ok(())
}

#[test]
fn any_watched_field_difference_triggers() -> TestResult {
    let prev = StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_000),
        (WatchedField::Size, 4096),
    ]);
    let next = StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_000),
        (WatchedField::Size, 8192),
    ]);

    let diff = changed_fields(
        Some(&prev),
        &next,
        &fields(&[WatchedField::Mtime, WatchedField::Size]),
    );
    assert_eq!(diff, vec![WatchedField::Size]);
    Ok(())
}

#[test]
fn only_watched_fields_are_compared() -> TestResult {
    let prev = StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_000),
        (WatchedField::Size, 4096),
    ]);
    let next = StatusSnapshot::from_values([
        (WatchedField::Mtime, 1_700_000_999),
        (WatchedField::Size, 4096),
    ]);

    // mtime differs, but only size is in the watched set.
    let diff = changed_fields(Some(&prev), &next, &fields(&[WatchedField::Size]));
    assert!(diff.is_empty());
    Ok(())
}

#[test]
fn comparison_is_exact_equality() -> TestResult {
    let prev = StatusSnapshot::from_values([(WatchedField::Size, 4096)]);
    let next = StatusSnapshot::from_values([(WatchedField::Size, 4097)]);

    let diff = changed_fields(Some(&prev), &next, &fields(&[WatchedField::Size]));
    assert_eq!(diff, vec![WatchedField::Size]);
    Ok(())
}
