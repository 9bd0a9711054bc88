//! Override properties of layered resolution

use podcfg::stage0::{ConfigurablePaths, Credentials, Stage1Data, Stage1Image};
use podcfg_test_utils::TestRoots;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

type Layer = BTreeMap<String, String>;

fn layer() -> impl Strategy<Value = Layer> {
    prop::collection::btree_map("[a-e]\\.example\\.com", "[a-z]{1,8}", 0..5)
}

fn write_layer(roots: &TestRoots, name: &str, layer: &Layer) {
    // keep the root present even when the layer is empty
    roots.mkdir(name, "stage0/auth.d");
    for (i, (host, token)) in layer.iter().enumerate() {
        roots.write_json(
            name,
            &format!("stage0/auth.d/{i}.json"),
            &serde_json::json!({
                "rktKind": "auth",
                "rktVersion": "v1",
                "domains": [host],
                "type": "oauth",
                "credentials": {"token": token},
            }),
        );
    }
}

fn resolve(roots: &TestRoots, names: &[&str]) -> BTreeMap<String, Credentials> {
    podcfg::get_config_from(&roots.roots(names))
        .unwrap()
        .stage0
        .auth_per_host
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn redeclaring_a_subset_changes_nothing(a in layer(), b in layer(), keep in prop::collection::vec(any::<bool>(), 5)) {
        let c: Layer = a
            .iter()
            .zip(keep.iter().cycle())
            .filter(|(_, keep)| **keep)
            .map(|((k, v), _)| (k.clone(), v.clone()))
            .collect();
        let roots = TestRoots::new();
        write_layer(&roots, "a", &a);
        write_layer(&roots, "b", &b);
        write_layer(&roots, "c", &c);

        prop_assert_eq!(resolve(&roots, &["a", "c", "b"]), resolve(&roots, &["a", "b"]));
    }

    #[test]
    fn later_layer_wins_on_overlap(a in layer(), b in layer()) {
        let roots = TestRoots::new();
        write_layer(&roots, "a", &a);
        write_layer(&roots, "b", &b);

        let mut expected: BTreeMap<String, Credentials> = a
            .iter()
            .map(|(host, token)| (host.clone(), Credentials::oauth_bearer(token.clone())))
            .collect();
        for (host, token) in &b {
            expected.insert(host.clone(), Credentials::oauth_bearer(token.clone()));
        }

        prop_assert_eq!(resolve(&roots, &["a", "b"]), expected);
    }
}

/// Paths and stage1 settings declared by one root
#[derive(Debug, Clone, Default)]
struct Settings {
    data: Option<String>,
    images: Option<String>,
    image: Option<(String, String)>,
    location: Option<String>,
}

fn settings() -> impl Strategy<Value = Settings> {
    (
        prop::option::of("/data/[a-c]"),
        prop::option::of("/images/[a-c]"),
        prop::option::of(("[a-c]\\.example\\.com/stage1", "[0-9]\\.[0-9]")),
        prop::option::of("/stage1/[a-c]\\.aci"),
    )
        .prop_map(|(data, images, image, location)| Settings {
            data,
            images,
            image,
            location,
        })
}

fn subset(settings: &Settings, keep: &[bool]) -> Settings {
    Settings {
        data: settings.data.clone().filter(|_| keep[0]),
        images: settings.images.clone().filter(|_| keep[1]),
        image: settings.image.clone().filter(|_| keep[2]),
        location: settings.location.clone().filter(|_| keep[3]),
    }
}

fn write_settings(roots: &TestRoots, name: &str, settings: &Settings) {
    roots.mkdir(name, "stage0");
    let mut paths = serde_json::json!({"rktKind": "paths", "rktVersion": "v1"});
    if let Some(data) = &settings.data {
        paths["data"] = data.as_str().into();
    }
    if let Some(images) = &settings.images {
        paths["stage1-images"] = images.as_str().into();
    }
    roots.write_json(name, "stage0/paths.d/paths.json", &paths);

    let mut stage1 = serde_json::json!({"rktKind": "stage1", "rktVersion": "v1"});
    if let Some((image, version)) = &settings.image {
        stage1["name"] = image.as_str().into();
        stage1["version"] = version.as_str().into();
    }
    if let Some(location) = &settings.location {
        stage1["location"] = location.as_str().into();
    }
    roots.write_json(name, "stage0/stage1.d/stage1.json", &stage1);
}

fn resolve_settings(roots: &TestRoots, names: &[&str]) -> (ConfigurablePaths, Stage1Data) {
    let stage0 = podcfg::get_config_from(&roots.roots(names)).unwrap().stage0;
    (stage0.paths, stage0.stage1)
}

fn expected_settings(layers: &[&Settings]) -> (ConfigurablePaths, Stage1Data) {
    let mut paths = ConfigurablePaths::default();
    let mut stage1 = Stage1Data::default();
    for layer in layers {
        if let Some(data) = &layer.data {
            paths.data_dir = Some(PathBuf::from(data));
        }
        if let Some(images) = &layer.images {
            paths.stage1_images_dir = Some(PathBuf::from(images));
        }
        if let Some((name, version)) = &layer.image {
            stage1.image = Some(Stage1Image {
                name: name.clone(),
                version: version.clone(),
            });
        }
        if let Some(location) = &layer.location {
            stage1.location = Some(location.clone());
        }
    }
    (paths, stage1)
}

/// Networks declared by one root: name to (priority, type)
type NetLayer = BTreeMap<String, (u8, String)>;

fn net_layer() -> impl Strategy<Value = NetLayer> {
    prop::collection::btree_map("[a-d]", (0u8..100, "[a-z]{1,6}"), 0..4)
}

fn write_net_layer(roots: &TestRoots, name: &str, layer: &NetLayer) {
    roots.mkdir(name, "stage1/net.d");
    for (net, (priority, net_type)) in layer {
        roots.write_json(
            name,
            &format!("stage1/net.d/{net}.json"),
            &serde_json::json!({
                "rktKind": "network",
                "rktVersion": "v1",
                "priority": priority,
                "name": net,
                "cniConf": {"type": net_type},
            }),
        );
    }
}

fn resolve_networks(roots: &TestRoots, names: &[&str]) -> podcfg::net::Networks {
    podcfg::get_config_from(&roots.roots(names)).unwrap().net.networks
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn redeclaring_a_subset_of_settings_changes_nothing(
        a in settings(),
        b in settings(),
        keep in prop::collection::vec(any::<bool>(), 4),
    ) {
        let c = subset(&a, &keep);
        let roots = TestRoots::new();
        write_settings(&roots, "a", &a);
        write_settings(&roots, "b", &b);
        write_settings(&roots, "c", &c);

        prop_assert_eq!(
            resolve_settings(&roots, &["a", "c", "b"]),
            resolve_settings(&roots, &["a", "b"])
        );
    }

    #[test]
    fn last_non_empty_setting_wins_per_field(a in settings(), b in settings(), c in settings()) {
        let roots = TestRoots::new();
        write_settings(&roots, "a", &a);
        write_settings(&roots, "b", &b);
        write_settings(&roots, "c", &c);

        prop_assert_eq!(
            resolve_settings(&roots, &["a", "b", "c"]),
            expected_settings(&[&a, &b, &c])
        );
    }

    #[test]
    fn redeclaring_a_subset_of_networks_changes_nothing(
        a in net_layer(),
        b in net_layer(),
        keep in prop::collection::vec(any::<bool>(), 4),
    ) {
        let c: NetLayer = a
            .iter()
            .zip(keep.iter())
            .filter(|(_, keep)| **keep)
            .map(|((k, v), _)| (k.clone(), v.clone()))
            .collect();
        let roots = TestRoots::new();
        write_net_layer(&roots, "a", &a);
        write_net_layer(&roots, "b", &b);
        write_net_layer(&roots, "c", &c);

        prop_assert_eq!(
            resolve_networks(&roots, &["a", "c", "b"]),
            resolve_networks(&roots, &["a", "b"])
        );
    }

    #[test]
    fn later_network_declaration_replaces_earlier(a in net_layer(), b in net_layer()) {
        let roots = TestRoots::new();
        write_net_layer(&roots, "a", &a);
        write_net_layer(&roots, "b", &b);

        let mut expected: BTreeMap<String, (String, Option<String>)> = BTreeMap::new();
        for layer in [&a, &b] {
            for (net, (priority, net_type)) in layer {
                expected.insert(
                    net.clone(),
                    (format!("{priority:02}-{net}.conf"), Some(net_type.clone())),
                );
            }
        }

        let networks = resolve_networks(&roots, &["a", "b"]);
        let actual: BTreeMap<String, (String, Option<String>)> = networks
            .iter()
            .map(|n| {
                (
                    n.name().to_string(),
                    (n.runtime.conf_basename(), n.net_type().map(str::to_string)),
                )
            })
            .collect();
        prop_assert_eq!(networks.len(), expected.len());
        prop_assert_eq!(actual, expected);
    }
}
