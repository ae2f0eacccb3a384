//! Plan fixture parsing and analysis tests

use sqlcx_analyzer::{parse_fixture, ComplexityAnalyzer};
use sqlcx_core::complexity::ComplexityClass;
use sqlcx_core::config::AnalyzerConfig;
use sqlcx_core::error::Error;

#[test]
fn test_analyze_yaml_fixture() {
    let yaml = r#"
plan:
  - type: ALL
    table: users
    rows: 5000
  - type: subquery
    query: "SELECT user_id FROM orders WHERE total > 100"
subqueries:
  "SELECT user_id FROM orders WHERE total > 100":
    - type: range
      table: orders
      key: idx_total
"#;

    let parsed = parse_fixture(yaml).expect("fixture should parse");
    parsed.validate().expect("fixture should be well formed");

    let result = ComplexityAnalyzer::default()
        .estimate_complexity(&parsed.plan, &parsed.provider)
        .unwrap();
    assert_eq!(result.dominant(), ComplexityClass::Linear);
    assert!(result.to_string().contains("O(log n) Range Scan"));
}

#[test]
fn test_analyze_json_fixture() {
    let json = r#"{
        "plan": [ {"type": "eq_ref"}, {"type": "const"} ]
    }"#;

    let parsed = parse_fixture(json).unwrap();
    let result = ComplexityAnalyzer::default()
        .estimate_complexity(&parsed.plan, &parsed.provider)
        .unwrap();
    assert_eq!(result.dominant(), ComplexityClass::Constant);
    assert_eq!(
        result.to_string(),
        "Estimated Complexity. \n\
         Description:\tO(1) Index Lookup + O(1) Constant Lookup.\n\
         Complexity:\tO(1) + O(1)\n\
         Dominant Complexity: O(1)\n"
    );
}

#[test]
fn test_fixture_config_bounds_recursion() {
    let yaml = r#"
config:
  max_depth: 1
plan:
  - { type: subquery, query: "outer" }
subqueries:
  outer: [ { type: subquery, query: "inner" } ]
  inner: [ { type: ALL } ]
"#;

    let parsed = parse_fixture(yaml).unwrap();
    let mut config = AnalyzerConfig::default();
    parsed.config.apply(&mut config);
    assert_eq!(config.max_depth, 1);

    let err = ComplexityAnalyzer::new(config)
        .estimate_complexity(&parsed.plan, &parsed.provider)
        .unwrap_err();
    match err {
        Error::RecursionLimit { limit, query } => {
            assert_eq!(limit, 1);
            assert_eq!(query, "inner");
        }
        other => panic!("expected RecursionLimit, got {other:?}"),
    }

    let result = ComplexityAnalyzer::new(AnalyzerConfig::with_max_depth(2))
        .estimate_complexity(&parsed.plan, &parsed.provider)
        .unwrap();
    assert_eq!(result.dominant(), ComplexityClass::Linear);
}

#[test]
fn test_unregistered_subquery_is_provider_error() {
    let yaml = r#"
plan:
  - { type: subquery, query: "SELECT missing" }
"#;

    let parsed = parse_fixture(yaml).unwrap();
    assert!(parsed.validate().is_ok());
    let err = ComplexityAnalyzer::default()
        .estimate_complexity(&parsed.plan, &parsed.provider)
        .unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
    assert!(!err.is_plan_error());
}

#[test]
fn test_validate_rejects_missing_type() {
    let yaml = r#"
plan:
  - { type: ALL }
  - { table: t2 }
"#;

    let err = parse_fixture(yaml).unwrap().validate().unwrap_err();
    assert!(matches!(err, Error::MalformedPlan { index: 1, .. }));
}

#[test]
fn test_parse_invalid_yaml() {
    assert!(parse_fixture("plan: [").is_err());
}
