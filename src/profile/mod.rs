mod error;

pub use self::error::Error;

use std::path::Path;

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Sequence, Value};
use tracing::{debug, warn};

pub const PROXIES_KEY: &str = "proxies";
pub const PROXY_GROUPS_KEY: &str = "proxy-groups";
pub const LISTENERS_KEY: &str = "listeners";

/// In-memory Clash profile.
///
/// The document keeps the field order of the source file; fields other than
/// `proxies`, `proxy-groups` and `listeners` pass through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    doc: Mapping,
}

impl Profile {
    /// Loads the base profile from a YAML file whose top level must be a
    /// mapping. The three list fields are guaranteed to exist afterwards.
    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Profile, Error> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            return Err(Error::FileNotFound { file_path: file_path.to_owned() });
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|source| Error::ReadFile { source, file_path: file_path.to_owned() })?;
        let value: Value = serde_yaml::from_str(&content)
            .map_err(|source| Error::ParseYaml { source, file_path: file_path.to_owned() })?;

        let mut profile = match value {
            Value::Mapping(doc) => Profile { doc },
            // An empty file deserializes to null; treat it as an empty profile.
            Value::Null => Profile::default(),
            _ => return Err(Error::NotAMapping { file_path: file_path.to_owned() }),
        };

        profile.ensure_list(PROXIES_KEY);
        profile.ensure_list(PROXY_GROUPS_KEY);
        profile.ensure_list(LISTENERS_KEY);

        debug!("Read base profile from {}", file_path.display());
        Ok(profile)
    }

    fn ensure_list(&mut self, key: &str) {
        if let Some(value) = self.doc.get(&Value::from(key)) {
            if value.is_sequence() {
                return;
            }
            warn!("Base profile field {:?} is not a list, replacing it with an empty one", key);
        }
        self.doc.insert(Value::from(key), Value::Sequence(Sequence::new()));
    }

    fn list_mut(&mut self, key: &str) -> &mut Sequence {
        self.ensure_list(key);
        self.doc
            .get_mut(&Value::from(key))
            .and_then(Value::as_sequence_mut)
            .expect("field was just coerced to a sequence")
    }

    fn list(&self, key: &str) -> &[Value] {
        self.doc.get(&Value::from(key)).and_then(Value::as_sequence).map_or(&[], Vec::as_slice)
    }

    pub fn proxies(&self) -> &[Value] { self.list(PROXIES_KEY) }

    pub fn proxy_groups(&self) -> &[Value] { self.list(PROXY_GROUPS_KEY) }

    pub fn listeners(&self) -> &[Value] { self.list(LISTENERS_KEY) }

    /// Appends generated outbound proxies after any the base profile already
    /// carries.
    pub fn append_proxies(&mut self, proxies: &[SocksProxy]) {
        let list = self.list_mut(PROXIES_KEY);
        list.extend(proxies.iter().map(SocksProxy::to_value));
    }

    /// Replaces the listener list wholesale; listeners from the base profile
    /// are discarded.
    pub fn replace_listeners(&mut self, listeners: &[Listener]) {
        let list: Sequence = listeners.iter().map(Listener::to_value).collect();
        self.doc.insert(Value::from(LISTENERS_KEY), Value::Sequence(list));
    }

    /// Appends generated relay groups after any existing proxy groups.
    pub fn append_relay_groups(&mut self, groups: &[RelayGroup]) {
        let list = self.list_mut(PROXY_GROUPS_KEY);
        list.extend(groups.iter().map(RelayGroup::to_value));
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.doc.serialize(serializer)
    }
}

impl From<Mapping> for Profile {
    fn from(doc: Mapping) -> Profile { Profile { doc } }
}

/// Outbound SOCKS5 proxy entry derived from one upstream credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocksProxy {
    pub name: String,
    #[serde(rename = "type")]
    proxy_type: &'static str,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: bool,
    #[serde(rename = "skip-cert-verify")]
    pub skip_cert_verify: bool,
    pub udp: bool,
}

impl SocksProxy {
    pub fn new(
        name: String,
        server: String,
        port: u16,
        username: String,
        password: String,
    ) -> SocksProxy {
        SocksProxy {
            name,
            proxy_type: "socks5",
            server,
            port,
            username,
            password,
            tls: false,
            skip_cert_verify: true,
            udp: true,
        }
    }

    fn to_value(&self) -> Value {
        serde_yaml::to_value(self).expect("proxy entry is serializable")
    }
}

/// Local mixed-mode listener bound to the port of one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listener {
    pub name: String,
    #[serde(rename = "type")]
    listener_type: &'static str,
    pub port: u16,
    pub proxy: String,
}

impl Listener {
    pub fn new(name: String, port: u16, proxy: String) -> Listener {
        Listener { name, listener_type: "mixed", port, proxy }
    }

    fn to_value(&self) -> Value {
        serde_yaml::to_value(self).expect("listener entry is serializable")
    }
}

/// Relay group chaining a fixed first hop into a resolved upstream proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayGroup {
    pub name: String,
    #[serde(rename = "type")]
    group_type: &'static str,
    pub proxies: Vec<String>,
}

impl RelayGroup {
    pub fn new(name: String, proxies: Vec<String>) -> RelayGroup {
        RelayGroup { name, group_type: "relay", proxies }
    }

    fn to_value(&self) -> Value {
        serde_yaml::to_value(self).expect("relay group entry is serializable")
    }
}
