//! Configuration Tests.

use isb_core::common::ConfigError;
use isb_core::config::{Config, PrefetcherKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn defaults_match_reference_parameters() {
    let config = Config::default();
    assert_eq!(config.general.cores, 1);
    assert_eq!(config.general.line_shift, 6);
    assert_eq!(config.prefetcher, PrefetcherKind::Isb);
    assert_eq!(config.isb.training_entries, 128);
    assert_eq!(config.isb.amc_entries, 128);
    assert_eq!(config.isb.chunk_size, 256);
    assert_eq!(config.isb.degree, 2);
    assert_eq!(config.isb.max_confidence, 3);
    assert_eq!(config.stride.table_entries, 16);
    assert_eq!(config.fill.mshr_threshold, 8);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_document_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.isb.degree, 2);
    assert_eq!(config.prefetcher, PrefetcherKind::Isb);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = Config::from_json(r#"{ "isb": { "degree": 4, "amc_entries": 32 } }"#).unwrap();
    assert_eq!(config.isb.degree, 4);
    assert_eq!(config.isb.amc_entries, 32);
    assert_eq!(config.isb.training_entries, 128);
    assert_eq!(config.isb.chunk_size, 256);
}

#[rstest]
#[case("\"ISB\"", PrefetcherKind::Isb)]
#[case("\"Isb\"", PrefetcherKind::Isb)]
#[case("\"StrideFsm\"", PrefetcherKind::StrideFsm)]
#[case("\"None\"", PrefetcherKind::None)]
fn prefetcher_names(#[case] name: &str, #[case] kind: PrefetcherKind) {
    let json = format!(r#"{{ "prefetcher": {name} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().prefetcher, kind);
}

#[rstest]
#[case(r#"{ "isb": { "degree": 0 } }"#)]
#[case(r#"{ "isb": { "degree": 16 } }"#)]
fn degree_out_of_range(#[case] json: &str) {
    assert!(matches!(
        Config::from_json(json),
        Err(ConfigError::InvalidDegree { max: 16, .. })
    ));
}

#[rstest]
#[case(r#"{ "isb": { "training_entries": 0 } }"#, "training")]
#[case(r#"{ "isb": { "amc_entries": 0 } }"#, "amc")]
#[case(r#"{ "stride": { "table_entries": 0 } }"#, "stride")]
fn zero_capacity(#[case] json: &str, #[case] expected: &str) {
    match Config::from_json(json) {
        Err(ConfigError::ZeroCapacity { table }) => assert_eq!(table, expected),
        other => panic!("expected ZeroCapacity, got {other:?}"),
    }
}

#[test]
fn other_invalid_values() {
    assert!(matches!(
        Config::from_json(r#"{ "isb": { "chunk_size": 0 } }"#),
        Err(ConfigError::ZeroChunkSize)
    ));
    assert!(matches!(
        Config::from_json(r#"{ "isb": { "max_confidence": 4 } }"#),
        Err(ConfigError::InvalidConfidence(4))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "general": { "line_shift": 0 } }"#),
        Err(ConfigError::InvalidLineShift(0))
    ));
    assert!(matches!(
        Config::from_json(r#"{ "general": { "cores": 0 } }"#),
        Err(ConfigError::ZeroCores)
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Config::from_json("{ \"isb\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid config JSON"));
}

#[test]
fn unknown_engine_is_a_parse_error() {
    assert!(matches!(
        Config::from_json(r#"{ "prefetcher": "Markov" }"#),
        Err(ConfigError::Parse(_))
    ));
}
