//! Usage and help rendering, in declaration order.

use super::option::{ArgOption, REDACTED};
use super::parser::TcExArgParser;
use super::value::ValueType;

impl TcExArgParser {
    /// One-line synopsis: required options first as written, optional ones bracketed.
    pub fn usage(&self, program: &str) -> String {
        let mut parts = vec![format!("usage: {}", program)];
        for opt in self.options() {
            let token = synopsis_token(opt);
            if opt.required {
                parts.push(token);
            } else {
                parts.push(format!("[{}]", token));
            }
        }
        parts.join(" ")
    }

    /// Multi-line help: synopsis, description, then one line per option.
    pub fn help(&self, program: &str) -> String {
        let mut out = self.usage(program);
        out.push('\n');
        if let Some(desc) = self.description() {
            out.push('\n');
            out.push_str(desc);
            out.push('\n');
        }
        if self.options().is_empty() {
            return out;
        }

        out.push_str("\noptions:\n");
        let rows: Vec<(String, String)> = self
            .options()
            .iter()
            .map(|opt| (synopsis_token(opt), self.describe(opt)))
            .collect();
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (left, right) in rows {
            out.push_str(&format!("  {:<width$}  {}\n", left, right, width = width));
        }
        out
    }

    fn describe(&self, opt: &ArgOption) -> String {
        let mut parts = Vec::new();
        if let Some(ref help) = opt.help {
            parts.push(help.clone());
        }
        parts.push(format!("[{}]", opt.value_type));
        if let Some(ref choices) = opt.choices {
            let list: Vec<String> = choices.iter().map(ToString::to_string).collect();
            parts.push(format!("choices: {}", list.join(", ")));
        }
        if let Some(ref default) = opt.default {
            if opt.secret {
                parts.push(format!("default: {}", REDACTED));
            } else {
                parts.push(format!("default: {}", default));
            }
        }
        parts.push(format!("env: {}", opt.env_key(self.env_prefix())));
        if opt.required {
            parts.push("(required)".to_string());
        }
        parts.join(" ")
    }
}

fn synopsis_token(opt: &ArgOption) -> String {
    match opt.value_type {
        ValueType::Boolean => format!("--{}", opt.name),
        ty => format!("--{} <{}>", opt.name, ty),
    }
}

#[cfg(test)]
mod tests {
    use crate::argparser::{ArgOption, TcExArgParser};

    fn parser() -> TcExArgParser {
        let mut p = TcExArgParser::new().with_description("Example app");
        p.declare(ArgOption::string("api-key").required().with_help("API key"))
            .unwrap()
            .declare(ArgOption::flag("verbose").with_default(false))
            .unwrap()
            .declare(
                ArgOption::string("password")
                    .with_default("hunter2")
                    .secret(),
            )
            .unwrap();
        p
    }

    #[test]
    fn usage_line() {
        assert_eq!(
            parser().usage("app"),
            "usage: app --api-key <string> [--verbose] [--password <string>]"
        );
    }

    #[test]
    fn help_keeps_declaration_order_and_hides_secret_defaults() {
        let help = parser().help("app");
        let api = help.find("--api-key <string>  ").unwrap();
        let verbose = help.find("  --verbose").unwrap();
        let password = help.find("  --password").unwrap();
        assert!(api < verbose && verbose < password);
        assert!(help.contains("Example app"));
        assert!(help.contains("API key [string] env: API_KEY (required)"));
        assert!(help.contains("default: ***"));
        assert!(!help.contains("hunter2"));
    }
}
