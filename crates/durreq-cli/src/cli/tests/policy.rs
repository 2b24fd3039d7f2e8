//! Global retry flags and how they combine with the config file.

use super::parse_cli;
use durreq_core::config::DurreqConfig;
use std::time::Duration;

#[test]
fn global_flags_after_subcommand() {
    let cli = parse_cli(&[
        "durreq",
        "get",
        "http://example.com/",
        "--attempts",
        "5",
        "--delay",
        "0.25",
        "--log-level",
        "debug",
    ]);
    assert_eq!(cli.attempts, Some(5));
    assert_eq!(cli.delay, Some(0.25));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
}

#[test]
fn config_used_when_flags_absent() {
    let cli = parse_cli(&["durreq", "get", "http://example.com/"]);
    let policy = cli.retry_policy(&DurreqConfig::default()).unwrap();
    assert_eq!(policy.attempts, 3);
    assert_eq!(policy.delay, Duration::from_secs(1));
}

#[test]
fn flags_override_config() {
    let cli = parse_cli(&["durreq", "--attempts", "7", "--delay", "2", "get", "http://x/"]);
    let policy = cli.retry_policy(&DurreqConfig::default()).unwrap();
    assert_eq!(policy.attempts, 7);
    assert_eq!(policy.delay, Duration::from_secs(2));
}

#[test]
fn invalid_overrides_are_rejected() {
    let cfg = DurreqConfig::default();
    let zero = parse_cli(&["durreq", "--attempts", "0", "get", "http://x/"]);
    assert!(zero.retry_policy(&cfg).is_err());
    let negative = parse_cli(&["durreq", "--delay", "-1", "get", "http://x/"]);
    assert!(negative.retry_policy(&cfg).is_err());
}
