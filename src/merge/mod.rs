mod error;

pub use self::error::Error;

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    mapping::MappingTable,
    profile::{Listener, Profile, RelayGroup, SocksProxy},
    upstream::ProxyServer,
};

/// First hop of every generated relay chain.
pub const RELAY_ENTRY_PROXY: &str = "Switch-Proxy";

const SOCKS_LOCAL: &str = "socks_local";
const SOCKS_REMOTE: &str = "socks_remote";

/// Summary of one mapping entry after a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub key: String,
    pub listener: String,
    pub port: u16,
    pub relay_group: String,
    pub upstream: String,
}

/// Cross-references the mapping table against the upstream proxy list and
/// splices the generated entries into `profile`.
///
/// Generated outbounds and relay groups are appended to the profile's
/// `proxies` and `proxy-groups`; the `listeners` list is replaced wholesale.
/// Any validation failure aborts the merge before the profile is touched.
pub fn merge(
    mapping: &MappingTable,
    upstreams: &[ProxyServer],
    profile: &mut Profile,
) -> Result<Vec<Binding>, Error> {
    let mut proxies = Vec::with_capacity(upstreams.len());
    let mut name_by_ip: HashMap<&str, String> = HashMap::with_capacity(upstreams.len());

    for (index, upstream) in upstreams.iter().enumerate() {
        let port: u16 = upstream.port.parse().map_err(|_| Error::InvalidUpstreamPort {
            line_number: upstream.line_number,
            port: upstream.port.clone(),
        })?;

        let name = format!("socks_out_{:02}", index + 1);
        debug!("Generated outbound {} for {}:{}", name, upstream.ip, port);

        // Duplicate IPs keep the name of the last credential seen.
        name_by_ip.insert(upstream.ip.as_str(), name.clone());

        proxies.push(SocksProxy::new(
            name,
            upstream.ip.clone(),
            port,
            upstream.username.clone(),
            upstream.password.clone(),
        ));
    }

    let mut listeners = Vec::with_capacity(mapping.len());
    let mut groups = Vec::with_capacity(mapping.len());
    let mut bindings = Vec::with_capacity(mapping.len());

    for (key, entry) in mapping.ordered_entries() {
        let listener_name = format!("socks_{key}");
        let group_name = format!("socks_relay_{key}");

        let local = string_field(entry, SOCKS_LOCAL).ok_or_else(|| Error::InvalidLocalAddress {
            key: key.to_owned(),
            value: field_repr(entry, SOCKS_LOCAL),
        })?;
        let (_local_ip, local_port) =
            local.split_once(':').ok_or_else(|| Error::InvalidLocalAddress {
                key: key.to_owned(),
                value: field_repr(entry, SOCKS_LOCAL),
            })?;
        let port: u16 = local_port.parse().map_err(|_| Error::InvalidLocalPort {
            key: key.to_owned(),
            port: local_port.to_owned(),
        })?;

        let remote = string_field(entry, SOCKS_REMOTE)
            .ok_or_else(|| Error::MissingRemote { key: key.to_owned() })?;
        let target = resolve_upstream(&name_by_ip, remote).ok_or_else(|| {
            Error::UnresolvedRemote { key: key.to_owned(), remote: remote.to_owned() }
        })?;

        debug!("Generated listener {} on port {} -> {} -> {}", listener_name, port, group_name, target);

        listeners.push(Listener::new(listener_name.clone(), port, group_name.clone()));
        groups.push(RelayGroup::new(
            group_name.clone(),
            vec![RELAY_ENTRY_PROXY.to_owned(), target.clone()],
        ));
        bindings.push(Binding {
            key: key.to_owned(),
            listener: listener_name,
            port,
            relay_group: group_name,
            upstream: target.clone(),
        });
    }

    profile.append_proxies(&proxies);
    profile.replace_listeners(&listeners);
    profile.append_relay_groups(&groups);

    info!(
        "Merged {} outbound proxies and {} listener(s) into the profile",
        proxies.len(),
        listeners.len()
    );
    Ok(bindings)
}

/// Resolves an upstream proxy name for a `socks_remote` value: the full
/// value first, then the part before the colon when the value carries a
/// port.
fn resolve_upstream<'a>(name_by_ip: &'a HashMap<&str, String>, remote: &str) -> Option<&'a String> {
    name_by_ip
        .get(remote)
        .or_else(|| remote.split_once(':').and_then(|(ip, _)| name_by_ip.get(ip)))
}

fn string_field<'a>(entry: &'a Value, field: &str) -> Option<&'a str> {
    entry.get(field).and_then(Value::as_str).filter(|value| !value.is_empty())
}

fn field_repr(entry: &Value, field: &str) -> String {
    entry.get(field).map_or_else(|| "null".to_owned(), Value::to_string)
}
