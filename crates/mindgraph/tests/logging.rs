//! Tests for logging configuration

use mindgraph::core::logging::{
    init_logging, resolve_format, resolve_level, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV,
};
use std::str::FromStr;

#[test]
fn test_log_format_from_str() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert_eq!(variants, &["compact", "pretty", "json"]);
    for name in variants {
        assert!(LogFormat::from_str(name).is_ok());
    }
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "MINDGRAPH_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "MINDGRAPH_LOG_FORMAT");
}

#[test]
fn test_explicit_arguments_win() {
    assert_eq!(resolve_level(Some("trace")), "trace");
    assert_eq!(resolve_format(Some("json")), "json");
}

#[test]
fn test_invalid_format_rejected() {
    // Format is validated before any subscriber is installed
    let result = init_logging(Some("info"), Some("xml"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid log format"));
}

#[test]
fn test_repeated_init_does_not_panic() {
    let _ = init_logging(Some("off"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
}
