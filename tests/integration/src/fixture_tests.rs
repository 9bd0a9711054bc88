//! Golden test over the checked-in fixture roots
//!
//! `test-fixtures/roots/vendor` plays the package defaults and
//! `test-fixtures/roots/admin` the administrator overrides.

use podcfg::net::Schema;
use podcfg::stage0::Credentials;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn root(name: &str) -> PathBuf {
    fixtures().join("roots").join(name)
}

#[test]
fn effective_config_matches_golden_file() {
    let config = podcfg::get_config_from(&[root("vendor"), root("admin")]).unwrap();

    let actual = serde_json::to_value(&config).unwrap();
    let expected: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixtures().join("expected/effective.json")).unwrap())
            .unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn admin_overrides_vendor_defaults() {
    let config = podcfg::get_config_from(&[root("vendor"), root("admin")]).unwrap();

    assert_eq!(
        config.stage0.auth_per_host["registry.example.com"],
        Credentials::oauth_bearer("admin-token")
    );
    assert_eq!(
        config.stage0.auth_per_host["mirror.example.com"],
        Credentials::basic("vendor", "secret")
    );

    let default = config.net.networks.get("default").unwrap();
    assert_eq!(default.runtime.conf_basename(), "05-default.conf");
    assert!(default.ip_masq());
}

#[test]
fn legacy_file_is_shadowed_by_current_schema() {
    let config = podcfg::get_config_from(&[root("vendor")]).unwrap();

    assert_eq!(config.net.schema, Schema::Current);
    assert!(!config.net.networks.contains("old"));
    assert_eq!(config.net.networks.len(), 2);
}

#[test]
fn reversed_roots_let_vendor_win() {
    let config = podcfg::get_config_from(&[root("admin"), root("vendor")]).unwrap();

    assert_eq!(
        config.stage0.auth_per_host["registry.example.com"],
        Credentials::basic("vendor", "secret")
    );
    assert_eq!(
        config.stage0.stage1.location.as_deref(),
        Some("/usr/lib/podcfg/stage1-images/stage1-coreos.aci")
    );
    // the stub in admin has no base in an earlier root
    assert_eq!(
        config.net.networks.get("default").unwrap().runtime.conf_basename(),
        "10-default.conf"
    );
}

#[test]
fn pod_config_reads_legacy_networks_only() {
    let config = podcfg::get_pod_config(root("vendor")).unwrap();

    assert_eq!(config.schema, Schema::Legacy);
    let names: Vec<&str> = config.networks.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["old"]);
}
