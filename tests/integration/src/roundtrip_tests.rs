//! Exporting an effective config and resolving it again from one root

use podcfg::EffectiveConfig;
use podcfg_test_utils::TestRoots;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture_root(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/roots")
        .join(name)
}

fn write_synthetic_root(roots: &TestRoots, config: &EffectiveConfig) {
    for (i, doc) in config.stage0.to_documents().iter().enumerate() {
        roots.write_json(
            "synthetic",
            &format!("stage0/{}/doc-{i:02}.json", doc.subdirectory),
            &doc.value,
        );
    }
    for doc in config.net.to_documents() {
        roots.write_json(
            "synthetic",
            &format!("stage1/{}/{}", doc.subdirectory, doc.filename),
            &doc.value,
        );
    }
}

#[test]
fn fixture_survives_export_and_reload() {
    let original = podcfg::get_config_from(&[fixture_root("vendor"), fixture_root("admin")]).unwrap();

    let roots = TestRoots::new();
    write_synthetic_root(&roots, &original);
    let reloaded = podcfg::get_config_from(&[roots.root("synthetic")]).unwrap();

    assert_eq!(reloaded, original);
}

#[test]
fn stage0_only_config_survives_export_and_reload() {
    let roots = TestRoots::new();
    roots.stage0(
        "a",
        "auth.d",
        "docker.json",
        r#"{"rktKind": "dockerAuth", "rktVersion": "v1", "registries": ["quay.io", "docker.io"],
            "credentials": {"user": "u", "password": "p"}}"#,
    );
    roots.stage0(
        "b",
        "stage1.d",
        "s.json",
        r#"{"rktKind": "stage1", "rktVersion": "v1", "name": "n", "version": "v"}"#,
    );
    let original = podcfg::get_config_from(&roots.roots(&["a", "b"])).unwrap();

    let out = TestRoots::new();
    write_synthetic_root(&out, &original);
    // no network files on either side, both fall back to the legacy schema
    let reloaded = podcfg::get_config_from(&[out.root("synthetic")]).unwrap();

    assert_eq!(reloaded.stage0, original.stage0);
    assert_eq!(reloaded.net, original.net);
}

#[test]
fn networks_sharing_a_file_stem_all_survive_reload() {
    let roots = TestRoots::new();
    roots.stage1(
        "a",
        "net.d",
        "foo.json",
        r#"{"rktKind": "network", "rktVersion": "v1", "priority": 10, "name": "alpha",
            "cniConf": {"type": "ptp"}}"#,
    );
    roots.stage1(
        "b",
        "net.d",
        "foo.json",
        r#"{"rktKind": "network", "rktVersion": "v1", "priority": 20, "name": "beta",
            "cniConf": {"type": "bridge"}}"#,
    );
    let original = podcfg::get_config_from(&roots.roots(&["a", "b"])).unwrap();

    let out = TestRoots::new();
    write_synthetic_root(&out, &original);
    let reloaded = podcfg::get_config_from(&[out.root("synthetic")]).unwrap();

    let summary = |config: &EffectiveConfig| -> Vec<(String, String)> {
        config
            .net
            .networks
            .iter()
            .map(|n| (n.name().to_string(), n.runtime.conf_basename()))
            .collect()
    };
    assert_eq!(
        summary(&original),
        vec![
            ("alpha".to_string(), "10-foo.conf".to_string()),
            ("beta".to_string(), "20-foo.conf".to_string()),
        ]
    );
    assert_eq!(
        summary(&reloaded),
        vec![
            ("alpha".to_string(), "10-foo.conf".to_string()),
            ("beta".to_string(), "20-foo-1.conf".to_string()),
        ]
    );
    for net in original.net.networks.iter() {
        let again = reloaded.net.networks.get(net.name()).unwrap();
        assert_eq!(again.conf, net.conf);
        assert_eq!(again.conf_bytes, net.conf_bytes);
    }
}
