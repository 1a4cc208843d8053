mod error;

pub use self::error::Error;

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

/// Port-mapping table keyed by arbitrary string identifiers.
///
/// Entry values stay free-form; the merge stage pulls the fields it needs
/// out of them and validates at that point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: Map<String, Value>,
}

impl MappingTable {
    /// Loads the mapping table from a JSON file whose top level must be an
    /// object.
    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<MappingTable, Error> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            return Err(Error::FileNotFound { file_path: file_path.to_owned() });
        }

        let content = std::fs::read(file_path)
            .map_err(|source| Error::ReadFile { source, file_path: file_path.to_owned() })?;
        let value: Value = serde_json::from_slice(&content)
            .map_err(|source| Error::ParseJson { source, file_path: file_path.to_owned() })?;

        match value {
            Value::Object(entries) => {
                debug!("Read {} mapping entries from {}", entries.len(), file_path.display());
                Ok(MappingTable { entries })
            }
            _ => Err(Error::NotAnObject { file_path: file_path.to_owned() }),
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, key: &str) -> Option<&Value> { self.entries.get(key) }

    /// Entries in output order: numeric ascending when every key parses as
    /// an integer, lexicographic otherwise. Key order in the source file is
    /// irrelevant, so repeated runs emit listeners and groups in the same
    /// order.
    pub fn ordered_entries(&self) -> Vec<(&str, &Value)> {
        let mut numeric = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match key.parse::<i64>() {
                Ok(index) => numeric.push((index, key.as_str(), value)),
                Err(_) => {
                    let mut entries: Vec<_> =
                        self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
                    entries.sort_unstable_by_key(|(k, _)| *k);
                    return entries;
                }
            }
        }

        numeric.sort_by_key(|(index, _, _)| *index);
        numeric.into_iter().map(|(_, key, value)| (key, value)).collect()
    }
}

impl From<Map<String, Value>> for MappingTable {
    fn from(entries: Map<String, Value>) -> MappingTable { MappingTable { entries } }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table(value: Value) -> MappingTable {
        match value {
            Value::Object(entries) => MappingTable::from(entries),
            _ => panic!("fixture must be a JSON object"),
        }
    }

    #[test]
    fn numeric_keys_sort_by_value() {
        let table = table(json!({
            "10": {"socks_local": "0.0.0.0:1090"},
            "2": {"socks_local": "0.0.0.0:1082"},
            "1": {"socks_local": "0.0.0.0:1081"},
        }));

        let keys: Vec<_> = table.ordered_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["1", "2", "10"]);
    }

    #[test]
    fn non_numeric_keys_sort_lexicographically() {
        let table = table(json!({
            "b": {},
            "10": {},
            "a": {},
        }));

        let keys: Vec<_> = table.ordered_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["10", "a", "b"]);
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("mapping.json");
        std::fs::write(&file_path, r#"{"1": {"socks_local": "0.0.0.0:1081"}}"#).unwrap();

        let table = MappingTable::load(&file_path).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("1").is_some());
    }

    #[test]
    fn missing_file() {
        let err = MappingTable::load("/nonexistent/mapping.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("mapping.json");
        std::fs::write(&file_path, "{ not json").unwrap();

        let err = MappingTable::load(&file_path).unwrap_err();
        assert!(matches!(err, Error::ParseJson { .. }));
    }

    #[test]
    fn non_object_top_level() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("mapping.json");
        std::fs::write(&file_path, "[1, 2, 3]").unwrap();

        let err = MappingTable::load(&file_path).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { .. }));
    }
}
