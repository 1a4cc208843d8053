mod error;

pub use self::error::Error;

use std::path::PathBuf;

use tracing::info;

use crate::{
    mapping::MappingTable,
    merge::{self, Binding},
    output,
    profile::Profile,
    upstream,
};

/// One generation request: the four paths supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub mapping_path: PathBuf,
    pub proxy_list_path: PathBuf,
    pub profile_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output_path: PathBuf,
    pub proxy_count: usize,
    pub bindings: Vec<Binding>,
}

/// Runs the whole pipeline: parse the three inputs, merge, write. The first
/// failing stage aborts the run; nothing is written unless every stage
/// before the serializer succeeded.
pub fn run(request: &Request) -> Result<Generated, Error> {
    info!("Generating a merged profile from {}", request.mapping_path.display());

    let mapping = MappingTable::load(&request.mapping_path)?;
    let upstreams = upstream::load(&request.proxy_list_path)?;
    let mut profile = Profile::load(&request.profile_path)?;

    let bindings = merge::merge(&mapping, &upstreams, &mut profile)?;
    let output_path = output::write(&request.output_dir, &profile)?;

    Ok(Generated { output_path, proxy_count: upstreams.len(), bindings })
}

#[cfg(test)]
mod tests {
    use serde_yaml::{Mapping, Value};

    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        request: Request,
    }

    fn fixture(mapping: &str, proxies: &str, base: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let mapping_path = dir.path().join("mapping.json");
        let proxy_list_path = dir.path().join("proxies.txt");
        let profile_path = dir.path().join("base.yaml");
        let output_dir = dir.path().join("out");

        std::fs::write(&mapping_path, mapping).unwrap();
        std::fs::write(&proxy_list_path, proxies).unwrap();
        std::fs::write(&profile_path, base).unwrap();
        std::fs::create_dir(&output_dir).unwrap();

        let request = Request { mapping_path, proxy_list_path, profile_path, output_dir };
        Fixture { _dir: dir, request }
    }

    #[test]
    fn end_to_end() {
        let fixture = fixture(
            r#"{"1": {"socks_local": "0.0.0.0:1081", "socks_remote": "10.0.0.5"}}"#,
            "10.0.0.5:1080:alice:secret\n",
            "{}",
        );

        let generated = run(&fixture.request).unwrap();
        assert_eq!(generated.proxy_count, 1);
        assert_eq!(generated.bindings.len(), 1);

        let written: Mapping =
            serde_yaml::from_str(&std::fs::read_to_string(&generated.output_path).unwrap())
                .unwrap();

        let proxies = written.get(&Value::from("proxies")).unwrap().as_sequence().unwrap();
        assert_eq!(proxies.len(), 1);
        assert_eq!(proxies[0]["name"], "socks_out_01");
        assert_eq!(proxies[0]["server"], "10.0.0.5");
        assert_eq!(proxies[0]["port"], 1080);
        assert_eq!(proxies[0]["username"], "alice");

        let listeners = written.get(&Value::from("listeners")).unwrap().as_sequence().unwrap();
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0]["name"], "socks_1");
        assert_eq!(listeners[0]["port"], 1081);
        assert_eq!(listeners[0]["proxy"], "socks_relay_1");

        let groups = written.get(&Value::from("proxy-groups")).unwrap().as_sequence().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["name"], "socks_relay_1");
        assert_eq!(
            groups[0]["proxies"],
            Value::Sequence(vec!["Switch-Proxy".into(), "socks_out_01".into()])
        );
    }

    #[test]
    fn passthrough_fields_survive() {
        let fixture = fixture(
            r#"{"1": {"socks_local": "0.0.0.0:1081", "socks_remote": "10.0.0.5"}}"#,
            "10.0.0.5:1080:alice:secret\n",
            "mode: rule\nlog-level: info\n",
        );

        let generated = run(&fixture.request).unwrap();
        let written: Mapping =
            serde_yaml::from_str(&std::fs::read_to_string(&generated.output_path).unwrap())
                .unwrap();

        assert_eq!(written.get(&Value::from("mode")), Some(&Value::from("rule")));
        assert_eq!(written.get(&Value::from("log-level")), Some(&Value::from("info")));
    }

    #[test]
    fn merge_failure_writes_nothing() {
        let fixture = fixture(
            r#"{"5": {"socks_local": "127.0.0.1:1080", "socks_remote": "9.9.9.9"}}"#,
            "10.0.0.5:1080:alice:secret\n",
            "{}",
        );

        let err = run(&fixture.request).unwrap_err();
        assert!(matches!(err, Error::Merge { .. }));

        let leftovers: Vec<_> =
            std::fs::read_dir(&fixture.request.output_dir).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_mapping_file() {
        let fixture = fixture("{}", "", "{}");
        let mut request = fixture.request.clone();
        request.mapping_path = request.mapping_path.with_file_name("missing.json");

        let err = run(&request).unwrap_err();
        assert!(matches!(err, Error::LoadMapping { .. }));
    }

    #[test]
    fn missing_output_directory() {
        let fixture = fixture("{}", "", "{}");
        let mut request = fixture.request.clone();
        request.output_dir = request.output_dir.join("missing");

        let err = run(&request).unwrap_err();
        assert!(matches!(err, Error::WriteProfile { .. }));
    }
}
