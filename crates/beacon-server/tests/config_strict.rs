#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use beacon_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
metrics:
  bukets: [0.1, 1.0] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.app.environment, "production");
    assert_eq!(cfg.app.version, "1.0.0");
    assert_eq!(cfg.metrics.prefix, "beacon");
    assert_eq!(cfg.metrics.duration_buckets.first(), Some(&0.0005));
    assert_eq!(cfg.metrics.duration_buckets.last(), Some(&10.0));
}

#[test]
fn full_config_round_trips_values() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9090"
app:
  version: "2.3.4"
  environment: "staging"
metrics:
  prefix: "web"
  duration_buckets: [0.01, 0.1, 1.0]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9090);
    assert_eq!(cfg.app.version, "2.3.4");
    assert_eq!(cfg.app.environment, "staging");
    assert_eq!(cfg.metrics.prefix, "web");
    assert_eq!(cfg.metrics.duration_buckets, vec![0.01, 0.1, 1.0]);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn rejects_bad_listen_address() {
    let bad = "version: 1\nserver:\n  listen: \"not-an-addr\"\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_unsorted_buckets() {
    let bad = "version: 1\nmetrics:\n  duration_buckets: [1.0, 0.5]\n";
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("strictly ascending"), "{err}");
}

#[test]
fn rejects_invalid_prefix() {
    let bad = "version: 1\nmetrics:\n  prefix: \"my-app\"\n";
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn environment_override_wins_unless_blank() {
    let mut cfg = config::load_from_str("version: 1\napp:\n  environment: qa\n").unwrap();

    cfg.apply_env_overrides(Some("   ".into()));
    assert_eq!(cfg.app.environment, "qa");

    cfg.apply_env_overrides(None);
    assert_eq!(cfg.app.environment, "qa");

    cfg.apply_env_overrides(Some("development".into()));
    assert_eq!(cfg.app.environment, "development");
}

#[test]
fn missing_file_is_an_error_for_explicit_load() {
    let err = config::load_from_file("/nonexistent/beacon.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
