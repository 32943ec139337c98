#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// --- defaults ---

#[test]
fn defaults_match_constants() {
    let c = ViewerConfig::default();
    assert_eq!(c.min_scale, 0.1);
    assert_eq!(c.max_scale, 5.0);
    assert_eq!(c.fit_padding, 10.0);
    assert_eq!(c.debounce_ms, 600.0);
    assert_eq!(c.settle_ms, 400.0);
    assert_eq!(c.wheel_sensitivity, 0.002);
}

#[test]
fn defaults_validate() {
    assert!(ViewerConfig::default().validate().is_ok());
}

#[test]
fn scale_range_from_config() {
    let r = ViewerConfig::default().scale_range();
    assert_eq!((r.min, r.max), (0.1, 5.0));
}

// --- from_lookup ---

#[test]
fn lookup_empty_yields_defaults() {
    let c = ViewerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(c, ViewerConfig::default());
}

#[test]
fn lookup_overrides_values() {
    let c = ViewerConfig::from_lookup(lookup_from(&[
        ("VIEWER_MAX_SCALE", "8"),
        ("VIEWER_DEBOUNCE_MS", " 250 "),
        ("VIEWER_FIT_PADDING", "0"),
    ]))
    .unwrap();
    assert_eq!(c.max_scale, 8.0);
    assert_eq!(c.debounce_ms, 250.0);
    assert_eq!(c.fit_padding, 0.0);
    assert_eq!(c.settle_ms, 400.0);
}

#[test]
fn lookup_unparseable_value_falls_back() {
    let c = ViewerConfig::from_lookup(lookup_from(&[("VIEWER_SETTLE_MS", "soon")])).unwrap();
    assert_eq!(c.settle_ms, 400.0);
}

#[test]
fn lookup_inverted_range_is_rejected() {
    let err = ViewerConfig::from_lookup(lookup_from(&[("VIEWER_MIN_SCALE", "6")])).unwrap_err();
    assert!(matches!(err, ConfigError::ScaleRange { .. }));
}

// --- from_json ---

#[test]
fn json_partial_object_uses_defaults() {
    let c = ViewerConfig::from_json(r#"{"min_scale": 0.25, "settle_ms": 100}"#).unwrap();
    assert_eq!(c.min_scale, 0.25);
    assert_eq!(c.settle_ms, 100.0);
    assert_eq!(c.max_scale, 5.0);
}

#[test]
fn json_empty_object_is_default() {
    assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
}

#[test]
fn json_malformed_is_error() {
    assert!(matches!(ViewerConfig::from_json("{not json"), Err(ConfigError::Json(_))));
}

#[test]
fn json_unknown_field_is_error() {
    assert!(matches!(ViewerConfig::from_json(r#"{"zoom": 2}"#), Err(ConfigError::Json(_))));
}

// --- validate ---

#[test]
fn zero_min_scale_is_rejected() {
    let c = ViewerConfig { min_scale: 0.0, ..ViewerConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::ScaleRange { .. })));
}

#[test]
fn negative_padding_is_rejected() {
    let c = ViewerConfig { fit_padding: -1.0, ..ViewerConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::Negative { field: "fit_padding", .. })));
}

#[test]
fn zero_debounce_is_rejected() {
    let c = ViewerConfig { debounce_ms: 0.0, ..ViewerConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::NotPositive { field: "debounce_ms", .. })));
}

#[test]
fn nan_settle_is_rejected() {
    let c = ViewerConfig { settle_ms: f64::NAN, ..ViewerConfig::default() };
    assert!(matches!(c.validate(), Err(ConfigError::NotPositive { field: "settle_ms", .. })));
}

#[test]
fn error_messages_are_descriptive() {
    let c = ViewerConfig { min_scale: 3.0, max_scale: 2.0, ..ViewerConfig::default() };
    let msg = c.validate().unwrap_err().to_string();
    assert!(msg.contains("min 3"));
    assert!(msg.contains("max 2"));
}
