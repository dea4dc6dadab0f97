//! Input sources consumed by argument resolution.
//!
//! An [`InputSource`] is a snapshot: command-line tokens, environment
//! variables and an explicit key/value mapping. Resolution reads nothing
//! else, so the same source always resolves to the same values.
//!
//! Precedence, highest first:
//!
//! 1. command line
//! 2. explicit mapping
//! 3. environment
//! 4. declared default

use super::error::ArgError;
use super::value::RawValue;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSource {
    args: Vec<String>,
    env: HashMap<String, String>,
    mapping: HashMap<String, RawValue>,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process: arguments (without the program name)
    /// and environment. Entries that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_os(std::env::args_os().skip(1), std::env::vars_os())
    }

    pub(crate) fn from_os<A, E>(args: A, vars: E) -> Self
    where
        A: IntoIterator<Item = OsString>,
        E: IntoIterator<Item = (OsString, OsString)>,
    {
        let args = args.into_iter().filter_map(|arg| match arg.into_string() {
            Ok(arg) => Some(arg),
            Err(arg) => {
                tracing::debug!(arg = ?arg, "skipping non UTF-8 argument");
                None
            }
        });
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    tracing::debug!(key = ?key, "skipping non UTF-8 environment variable");
                    None
                }
            });
        Self::new().with_args(args).with_env(vars)
    }

    /// A source holding only an explicit mapping.
    pub fn from_mapping<I, K, V>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        Self::new().with_mapping(mapping)
    }

    /// Command-line tokens, program name excluded. Replaces earlier tokens.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Environment snapshot. Replaces an earlier snapshot.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Add entries to the mapping layer. Later entries replace earlier ones.
    pub fn with_mapping<I, K, V>(mut self, mapping: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<serde_json::Value>,
    {
        for (k, v) in mapping {
            self.mapping
                .insert(normalize_key(&k.into()), RawValue::from(v.into()));
        }
        self
    }

    /// Add the top-level object of a JSON (`.json`) or YAML (`.yaml`/`.yml`)
    /// file to the mapping layer.
    pub fn with_mapping_file(self, path: impl AsRef<Path>) -> Result<Self, ArgError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ArgError::MappingFile {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let value: serde_json::Value = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ArgError::MappingFile {
                path: display.clone(),
                reason: format!("YAML parse error: {}", e),
            })?,
            _ => serde_json::from_str(&content).map_err(|e| ArgError::MappingFile {
                path: display.clone(),
                reason: format!("JSON parse error: {}", e),
            })?,
        };

        match value {
            serde_json::Value::Object(map) => Ok(self.with_mapping(map)),
            other => Err(ArgError::MappingFile {
                path: display,
                reason: format!("expected a top-level object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn env_var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    pub(crate) fn mapping_value(&self, name: &str) -> Option<&RawValue> {
        self.mapping.get(&normalize_key(name))
    }
}

fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_keys_ignore_dash_underscore() {
        let src = InputSource::from_mapping([("api-key", json!("abc"))]);
        assert_eq!(
            src.mapping_value("api_key"),
            Some(&RawValue::Text("abc".to_string()))
        );
    }

    #[test]
    fn mapping_file_yaml_and_json() {
        let dir = std::env::temp_dir();
        let yaml = dir.join("tcex_source_test_params.yaml");
        let json_path = dir.join("tcex_source_test_params.json");
        std::fs::write(&yaml, "tc_log_level: debug\nbatch_chunk: 100\n").unwrap();
        std::fs::write(&json_path, r#"{"tc_log_level": "info"}"#).unwrap();

        let src = InputSource::new().with_mapping_file(&yaml).unwrap();
        assert_eq!(
            src.mapping_value("batch_chunk"),
            Some(&RawValue::Json(json!(100)))
        );
        let src = src.with_mapping_file(&json_path).unwrap();
        assert_eq!(
            src.mapping_value("tc_log_level"),
            Some(&RawValue::Text("info".to_string()))
        );

        let _ = std::fs::remove_file(&yaml);
        let _ = std::fs::remove_file(&json_path);
    }

    #[test]
    fn mapping_file_rejects_non_object() {
        let path = std::env::temp_dir().join("tcex_source_test_list.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let result = InputSource::new().with_mapping_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ArgError::MappingFile { .. })));
    }

    #[test]
    fn missing_mapping_file() {
        let result = InputSource::new().with_mapping_file("/nonexistent/tcex/params.json");
        assert!(matches!(result, Err(ArgError::MappingFile { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn os_snapshot_skips_non_utf8_entries() {
        use std::os::unix::ffi::OsStringExt;

        let bad = || OsString::from_vec(vec![0xff, 0xfe]);
        let src = InputSource::from_os(
            vec![OsString::from("--owner"), bad(), OsString::from("acme")],
            vec![
                (OsString::from("TC_OWNER"), OsString::from("acme")),
                (OsString::from("TC_BINARY"), bad()),
                (bad(), OsString::from("value")),
            ],
        );
        assert_eq!(src.args(), ["--owner", "acme"]);
        assert_eq!(src.env_var("TC_OWNER"), Some("acme"));
        assert_eq!(src.env_var("TC_BINARY"), None);
        assert_eq!(src.env.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn process_snapshot_tolerates_non_utf8_environment() {
        use std::os::unix::ffi::OsStrExt;

        let key = "TCEX_SOURCE_TEST_NON_UTF8";
        std::env::set_var(key, std::ffi::OsStr::from_bytes(b"\xff\xfe"));
        let result = std::panic::catch_unwind(InputSource::from_process);
        std::env::remove_var(key);

        let src = result.expect("snapshot of a non UTF-8 environment");
        assert_eq!(src.env_var(key), None);
    }
}
