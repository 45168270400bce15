use statwatch::engine::{Decision, RunPolicy};

#[test]
fn limit_halts_with_success_after_exactly_n_runs() {
    let mut policy = RunPolicy::new(2, false);

    assert!(policy.should_run());
    assert_eq!(policy.record_run(true), Decision::Continue);
    assert!(policy.should_run());
    assert_eq!(policy.record_run(true), Decision::HaltSuccess);
    assert!(!policy.should_run());
    assert_eq!(policy.runs_completed(), 2);
}

#[test]
fn zero_limit_is_unlimited() {
    let mut policy = RunPolicy::new(0, false);

    for _ in 0..100 {
        assert!(policy.should_run());
        assert_eq!(policy.record_run(true), Decision::Continue);
    }
}

#[test]
fn failure_without_force_halts() {
    let mut policy = RunPolicy::new(0, false);
    assert_eq!(policy.record_run(false), Decision::HaltFailure);
}

#[test]
fn force_tolerates_failures_and_ignores_the_limit() {
    // -f normalizes to unlimited runs even with an explicit -l 1.
    let mut policy = RunPolicy::new(1, true);

    assert_eq!(policy.record_run(false), Decision::Continue);
    assert_eq!(policy.record_run(true), Decision::Continue);
    assert_eq!(policy.record_run(true), Decision::Continue);
    assert!(policy.should_run());
}

#[test]
fn failure_halts_even_when_limit_is_reached() {
    // A failed final run reports failure, not a satisfied limit.
    let mut policy = RunPolicy::new(1, false);
    assert_eq!(policy.record_run(false), Decision::HaltFailure);
}
