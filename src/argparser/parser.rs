//! `TcExArgParser`: declare, resolve, query.

use super::error::ArgError;
use super::option::ArgOption;
use super::resolved::{ResolvedArgs, ResolvedEntry, ValueOrigin};
use super::source::InputSource;
use super::value::{coerce, coerce_declared, ArgValue, RawValue, ValueType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static OPTION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("option name pattern is a valid regex")
});

/// Argument schema for one application invocation.
///
/// Options are declared up front, resolved once against an [`InputSource`],
/// then read through [`get`](Self::get) and the typed getters. Declaration
/// order is kept for help output and for [`ResolvedArgs::iter`].
///
/// ```
/// use tcex::argparser::{ArgOption, InputSource, TcExArgParser};
///
/// let mut parser = TcExArgParser::new();
/// parser
///     .declare(ArgOption::string("api-key").required())?
///     .declare(ArgOption::flag("verbose").with_default(false))?;
///
/// parser.resolve(&InputSource::from_mapping([("api-key", "abc123")]))?;
/// assert_eq!(parser.get_str("api-key")?, "abc123");
/// assert!(!parser.get_bool("verbose")?);
/// # Ok::<(), tcex::argparser::ArgError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TcExArgParser {
    options: Vec<ArgOption>,
    /// match key -> position in `options`
    index: HashMap<String, usize>,
    env_prefix: Option<String>,
    description: Option<String>,
    resolved: Option<ResolvedArgs>,
}

impl TcExArgParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix for derived environment keys (`TC` turns `api-key` into `TC_API_KEY`).
    /// Explicit per-option keys are not affected.
    ///
    /// Options already declared are checked again under the new prefix; the
    /// call fails if two of them would then read the same variable.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Result<Self, ArgError> {
        let prefix = prefix.into();
        let mut seen: HashMap<String, &str> = HashMap::new();
        for option in &self.options {
            let env_key = option.env_key(Some(&prefix));
            if let Some(other) = seen.insert(env_key.clone(), &option.name) {
                return Err(ArgError::declaration(
                    &option.name,
                    format!(
                        "environment key {} is already used by option '{}'",
                        env_key, other
                    ),
                ));
            }
        }
        self.env_prefix = Some(prefix);
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&ArgOption> {
        self.position(name).map(|i| &self.options[i])
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn resolved(&self) -> Option<&ResolvedArgs> {
        self.resolved.as_ref()
    }

    /// Register an option. Constraints are checked now; a rejected option
    /// leaves the parser unchanged.
    ///
    /// Declaring after a resolution discards that resolution.
    pub fn declare(&mut self, option: ArgOption) -> Result<&mut Self, ArgError> {
        let option = self.validate(option)?;
        let key = ArgOption::match_key(&option.name);
        self.index.insert(key, self.options.len());
        self.options.push(option);
        self.resolved = None;
        Ok(self)
    }

    /// Declare several options, stopping at the first rejected one.
    pub fn declare_all<I>(&mut self, options: I) -> Result<&mut Self, ArgError>
    where
        I: IntoIterator<Item = ArgOption>,
    {
        for option in options {
            self.declare(option)?;
        }
        Ok(self)
    }

    fn validate(&self, mut option: ArgOption) -> Result<ArgOption, ArgError> {
        let name = option.name.clone();
        if !OPTION_NAME.is_match(&name) {
            return Err(ArgError::declaration(
                &name,
                "names must start with a letter and contain only letters, digits, '-' or '_'",
            ));
        }
        if self.position(&name).is_some() {
            return Err(ArgError::DuplicateOption { name });
        }
        if option.required && option.default.is_some() {
            return Err(ArgError::declaration(
                &name,
                "a required option cannot also declare a default",
            ));
        }

        let ty = option.value_type;
        if let Some(ref default) = option.default {
            let coerced = coerce_declared(default, ty).ok_or_else(|| {
                ArgError::declaration(
                    &name,
                    format!("default {} is not a valid {}", default.kind(), ty),
                )
            })?;
            option.default = Some(coerced);
        }

        if let Some(choices) = option.choices.take() {
            if ty == ValueType::Boolean {
                return Err(ArgError::declaration(&name, "boolean options cannot declare choices"));
            }
            if choices.is_empty() {
                return Err(ArgError::declaration(&name, "choices must not be empty"));
            }
            let mut coerced = Vec::with_capacity(choices.len());
            for choice in &choices {
                let c = coerce_declared(choice, ty).ok_or_else(|| {
                    ArgError::declaration(
                        &name,
                        format!("choice '{}' is not a valid {}", choice, ty),
                    )
                })?;
                coerced.push(c);
            }
            if let Some(ref default) = option.default {
                if !coerced.contains(default) {
                    return Err(ArgError::declaration(
                        &name,
                        format!("default '{}' is not one of the declared choices", default),
                    ));
                }
            }
            option.choices = Some(coerced);
        }

        let prefix = self.env_prefix.as_deref();
        let env_key = option.env_key(prefix);
        if env_key.is_empty() {
            return Err(ArgError::declaration(&name, "environment key must not be empty"));
        }
        if let Some(other) = self.options.iter().find(|o| o.env_key(prefix) == env_key) {
            return Err(ArgError::declaration(
                &name,
                format!(
                    "environment key {} is already used by option '{}'",
                    env_key, other.name
                ),
            ));
        }

        Ok(option)
    }

    /// Resolve every declared option against `source`.
    ///
    /// Precedence, highest first: command line, explicit mapping,
    /// environment, declared default. On error any earlier resolution is
    /// kept; on success it is replaced.
    pub fn resolve(&mut self, source: &InputSource) -> Result<&ResolvedArgs, ArgError> {
        let resolved = self.compute(source)?;
        Ok(&*self.resolved.insert(resolved))
    }

    fn compute(&self, source: &InputSource) -> Result<ResolvedArgs, ArgError> {
        let (cli, unrecognized) = self.parse_command_line(source.args())?;
        if !unrecognized.is_empty() {
            tracing::debug!(
                unrecognized = ?unrecognized,
                "ignoring command-line tokens that match no declared option"
            );
        }

        let prefix = self.env_prefix.as_deref();
        let mut entries = Vec::with_capacity(self.options.len());
        let mut missing = Vec::new();

        for (i, option) in self.options.iter().enumerate() {
            let env_key = option.env_key(prefix);
            let supplied = cli
                .get(&i)
                .map(|raw| (raw.clone(), ValueOrigin::CommandLine))
                .or_else(|| {
                    source
                        .mapping_value(&option.name)
                        .filter(|raw| !matches!(raw, RawValue::Json(serde_json::Value::Null)))
                        .map(|raw| (raw.clone(), ValueOrigin::Mapping))
                })
                .or_else(|| {
                    source
                        .env_var(&env_key)
                        .map(|v| (RawValue::Text(v.to_string()), ValueOrigin::Environment))
                });

            let (value, origin) = match supplied {
                Some((raw, origin)) => (Self::coerce_supplied(option, &raw)?, origin),
                None => match option.default {
                    Some(ref default) => (default.clone(), ValueOrigin::Default),
                    None if option.required => {
                        missing.push(option.name.clone());
                        continue;
                    }
                    None => (ArgValue::Null, ValueOrigin::Unset),
                },
            };

            entries.push(ResolvedEntry {
                name: option.name.clone(),
                value,
                origin,
                secret: option.secret,
            });
        }

        if !missing.is_empty() {
            let hint = missing
                .iter()
                .filter_map(|name| self.option(name))
                .map(|o| format!("--{} or {}", o.name, o.env_key(prefix)))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ArgError::MissingRequired {
                names: missing,
                hint: Some(format!("supply {}", hint)),
            });
        }

        Ok(ResolvedArgs::new(entries, unrecognized))
    }

    fn coerce_supplied(option: &ArgOption, raw: &RawValue) -> Result<ArgValue, ArgError> {
        let value = coerce(raw, option.value_type).ok_or_else(|| ArgError::InvalidValue {
            name: option.name.clone(),
            expected: option.value_type,
            raw: option.shown(raw),
        })?;
        if let Some(ref choices) = option.choices {
            if !choices.contains(&value) {
                return Err(ArgError::InvalidChoice {
                    name: option.name.clone(),
                    raw: option.shown(raw),
                    choices: choices.iter().map(ToString::to_string).collect(),
                });
            }
        }
        Ok(value)
    }

    /// Split command-line tokens into values for declared options (last
    /// occurrence wins) and unrecognized tokens.
    fn parse_command_line(
        &self,
        args: &[String],
    ) -> Result<(HashMap<usize, RawValue>, Vec<String>), ArgError> {
        let mut values = HashMap::new();
        let mut unrecognized = Vec::new();
        let mut tokens = args.iter().peekable();

        while let Some(token) = tokens.next() {
            if token == "--" {
                unrecognized.extend(tokens.by_ref().cloned());
                break;
            }
            let Some(body) = token.strip_prefix("--") else {
                unrecognized.push(token.clone());
                continue;
            };
            let (name, inline) = match body.split_once('=') {
                Some((n, v)) => (n, Some(v)),
                None => (body, None),
            };
            let Some(i) = self.position(name) else {
                unrecognized.push(token.clone());
                continue;
            };

            let raw = match inline {
                Some(v) => v.to_string(),
                None if self.options[i].value_type == ValueType::Boolean => "true".to_string(),
                None => match tokens.next_if(|next| !next.starts_with("--")) {
                    Some(v) => v.clone(),
                    None => {
                        return Err(ArgError::InvalidArgument {
                            arg: token.clone(),
                            reason: format!(
                                "expected a {} value after the option",
                                self.options[i].value_type
                            ),
                        })
                    }
                },
            };
            values.insert(i, RawValue::Text(raw));
        }

        Ok((values, unrecognized))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&ArgOption::match_key(name)).copied()
    }

    /// Resolved value of `name`.
    ///
    /// Fails with [`ArgError::UnknownOption`] if `name` was never declared and
    /// with [`ArgError::NotResolved`] before [`resolve`](Self::resolve).
    pub fn get(&self, name: &str) -> Result<&ArgValue, ArgError> {
        let i = self.position(name).ok_or_else(|| {
            ArgError::UnknownOption {
                name: name.to_string(),
                hint: None,
            }
            .with_hint("declare the option before reading it")
        })?;
        let resolved = self.resolved.as_ref().ok_or_else(|| ArgError::NotResolved {
            name: name.to_string(),
        })?;
        resolved
            .get(&self.options[i].name)
            .ok_or_else(|| ArgError::NotResolved {
                name: name.to_string(),
            })
    }

    pub fn get_str(&self, name: &str) -> Result<&str, ArgError> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "string", value))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ArgError> {
        let value = self.get(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, "boolean", value))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, ArgError> {
        let value = self.get(name)?;
        value.as_i64().ok_or_else(|| mismatch(name, "integer", value))
    }

    pub fn get_f64(&self, name: &str) -> Result<f64, ArgError> {
        let value = self.get(name)?;
        value.as_f64().ok_or_else(|| mismatch(name, "float", value))
    }

    /// Like [`get_str`](Self::get_str) but returns `None` for an unset optional.
    pub fn get_opt_str(&self, name: &str) -> Result<Option<&str>, ArgError> {
        match self.get(name)? {
            ArgValue::Null => Ok(None),
            ArgValue::Str(s) => Ok(Some(s)),
            other => Err(mismatch(name, "string", other)),
        }
    }
}

fn mismatch(name: &str, requested: &'static str, value: &ArgValue) -> ArgError {
    ArgError::TypeMismatch {
        name: name.to_string(),
        requested,
        actual: value.kind(),
    }
}
