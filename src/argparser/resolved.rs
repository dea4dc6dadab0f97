//! Resolved argument values

use super::error::ArgError;
use super::option::REDACTED;
use super::value::ArgValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which layer supplied a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrigin {
    CommandLine,
    Mapping,
    Environment,
    Default,
    /// Optional option with no input and no default
    Unset,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueOrigin::CommandLine => "command line",
            ValueOrigin::Mapping => "mapping",
            ValueOrigin::Environment => "environment",
            ValueOrigin::Default => "default",
            ValueOrigin::Unset => "unset",
        })
    }
}

#[derive(Clone, PartialEq)]
pub(crate) struct ResolvedEntry {
    pub name: String,
    pub value: ArgValue,
    pub origin: ValueOrigin,
    pub secret: bool,
}

/// Read-only result of a resolution, in declaration order.
#[derive(Clone, PartialEq)]
pub struct ResolvedArgs {
    entries: Vec<ResolvedEntry>,
    index: HashMap<String, usize>,
    unrecognized: Vec<String>,
}

impl ResolvedArgs {
    pub(crate) fn new(entries: Vec<ResolvedEntry>, unrecognized: Vec<String>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self {
            entries,
            index,
            unrecognized,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.index.get(name).map(|&i| &self.entries[i].value)
    }

    pub fn origin(&self, name: &str) -> Option<ValueOrigin> {
        self.index.get(name).map(|&i| self.entries[i].origin)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.entries.iter().map(|e| (e.name.as_str(), &e.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command-line tokens that matched no declared option.
    pub fn unrecognized(&self) -> &[String] {
        &self.unrecognized
    }

    /// JSON object of all values. Secrets are included verbatim.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|e| (e.name.clone(), e.value.to_json()))
                .collect(),
        )
    }

    /// JSON object with secret values replaced by `"***"`.
    pub fn to_redacted_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|e| {
                    let v = if e.secret && !e.value.is_null() {
                        serde_json::Value::String(REDACTED.to_string())
                    } else {
                        e.value.to_json()
                    };
                    (e.name.clone(), v)
                })
                .collect(),
        )
    }

    /// Deserialize the resolved values into an application type.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ArgError> {
        serde_json::from_value(self.to_json()).map_err(|e| ArgError::InvalidArgument {
            arg: std::any::type_name::<T>().to_string(),
            reason: format!("resolved values do not fit the target type: {}", e),
        })
    }
}

impl fmt::Debug for ResolvedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for e in &self.entries {
            if e.secret && !e.value.is_null() {
                map.entry(&e.name, &REDACTED);
            } else {
                map.entry(&e.name, &e.value);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolvedArgs {
        ResolvedArgs::new(
            vec![
                ResolvedEntry {
                    name: "api_secret_key".to_string(),
                    value: ArgValue::from("s3cr3t"),
                    origin: ValueOrigin::Environment,
                    secret: true,
                },
                ResolvedEntry {
                    name: "batch_chunk".to_string(),
                    value: ArgValue::Int(25000),
                    origin: ValueOrigin::Default,
                    secret: false,
                },
            ],
            vec!["--extra".to_string()],
        )
    }

    #[test]
    fn debug_redacts_secrets() {
        let dbg = format!("{:?}", sample());
        assert!(!dbg.contains("s3cr3t"));
        assert!(dbg.contains("***"));
        assert!(dbg.contains("25000"));
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let args = sample();
        let names: Vec<&str> = args.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["api_secret_key", "batch_chunk"]);
    }

    #[test]
    fn redacted_json() {
        let json = sample().to_redacted_json();
        assert_eq!(json["api_secret_key"], "***");
        assert_eq!(json["batch_chunk"], 25000);
        assert_eq!(sample().to_json()["api_secret_key"], "s3cr3t");
    }
}
