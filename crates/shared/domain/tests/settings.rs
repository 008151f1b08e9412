use serde_json::json;
use sqlmap_domain::{CacheScope, Settings};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn settings_defaults_are_sane() {
    let settings = Settings::default();

    assert!(settings.class_cache_enabled);
    assert!(settings.class_cache_capacity.is_none());
    assert_eq!(settings.local_cache_scope, CacheScope::Session);
}

#[test]
fn settings_deserialize_with_partial_input() {
    let raw = json!({ "local_cache_scope": "STATEMENT", "class_cache_capacity": 256 });

    let settings: Settings = serde_json::from_value(raw).expect("settings deserialize");
    assert!(settings.class_cache_enabled);
    assert_eq!(settings.class_cache_capacity, Some(256));
    assert_eq!(settings.local_cache_scope, CacheScope::Statement);
}

#[test]
fn settings_clone_on_write() {
    let shared = Settings::default();
    let mut local = shared.clone();
    local.class_cache_enabled = false;

    assert!(shared.class_cache_enabled);
    assert!(!local.class_cache_enabled);
}

#[test]
fn cache_scope_string_forms() {
    assert_eq!(CacheScope::Session.to_string(), "SESSION");
    assert_eq!(CacheScope::from_str("statement").unwrap(), CacheScope::Statement);
    assert!(CacheScope::from_str("TRANSACTION").is_err());

    for scope in CacheScope::iter() {
        assert_eq!(CacheScope::from_str(scope.as_ref()).unwrap(), scope);
        let encoded = serde_json::to_value(scope).unwrap();
        assert_eq!(encoded, json!(scope.to_string()));
    }
}

#[test]
fn only_statement_scope_clears_after_each_statement() {
    assert!(CacheScope::Statement.clears_after_statement());
    assert!(!CacheScope::Session.clears_after_statement());
    assert_eq!(serde_json::from_value::<CacheScope>(json!("session")).unwrap(), CacheScope::Session);
}
