//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        bound_mode = "at_most"
        custom_counts = false

        [cost]
        weights = [1, 2, 50, 5000]

        [termination]
        seconds_spent_limit = 30
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.bound_mode, BoundMode::AtMost);
    assert!(!config.custom_counts);
    assert_eq!(config.cost.weights, [1, 2, 50, 5000]);
    assert!(!config.cost.forbid_unavailable);
    assert_eq!(config.termination.unwrap().seconds_spent_limit, Some(30));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        bound_mode: at-least
        cost:
          forbid_unavailable: true
        termination:
          minutes_spent_limit: 2
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.bound_mode, BoundMode::AtLeast);
    assert!(config.custom_counts);
    assert_eq!(config.cost.weights, DEFAULT_WEIGHTS);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(120)));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.bound_mode, BoundMode::Exact);
    assert!(config.custom_counts);
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.cost_model().unwrap(), CostModel::default());
}

#[test]
fn test_unknown_bound_mode_rejected() {
    let err = SolverConfig::from_toml_str(r#"bound_mode = "sometimes""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
    assert!(err.to_string().contains("sometimes"));
}

#[test]
fn test_invalid_weights() {
    let config = SolverConfig::new().with_weights([10, 5, 1, 0]);
    assert!(matches!(config.cost_model(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_bound_mode(BoundMode::AtMost)
        .without_custom_counts()
        .with_forbid_unavailable(true)
        .with_termination_seconds(60);

    assert_eq!(config.bound_mode, BoundMode::AtMost);
    assert!(!config.custom_counts);
    assert!(config.cost_model().unwrap().forbids_unavailable());
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
}

#[test]
fn test_zero_time_limit_is_unbounded() {
    let config = SolverConfig::new().with_termination_seconds(0);
    assert_eq!(config.time_limit(), None);
}

#[test]
fn test_load_missing_file() {
    let result = SolverConfig::load("definitely/not/here.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
