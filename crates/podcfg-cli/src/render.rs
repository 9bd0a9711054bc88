//! Plain-text rendering of resolved configuration

use podcfg::net::Networks;
use podcfg::stage0::{Credentials, resolve_auth_per_host};
use std::collections::BTreeMap;
use std::fmt::Write;

/// One line per network: name, type, ip masquerading and runtime file.
pub fn networks_table(networks: &Networks) -> String {
    let width = networks
        .iter()
        .map(|n| n.name().len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<10}  {:<6}  CONF", "NAME", "TYPE", "MASQ");
    for net in networks {
        let _ = writeln!(
            out,
            "{:<width$}  {:<10}  {:<6}  {}",
            net.name(),
            net.net_type().unwrap_or("-"),
            net.ip_masq(),
            net.runtime.conf_path.display()
        );
    }
    out
}

/// `host: Header: value`, sorted by host.
pub fn auth_headers(auth: &BTreeMap<String, Credentials>) -> String {
    let mut out = String::new();
    for (host, (name, value)) in resolve_auth_per_host(auth) {
        let _ = writeln!(out, "{host}: {name}: {value}");
    }
    out
}
