//! Standard platform arguments.
//!
//! Every app launched by the platform receives these. They are grouped the
//! way the platform documents them: API, batch, logging, paths, playbook and
//! proxy.

use super::option::ArgOption;
use super::parser::TcExArgParser;

/// Default platform API endpoint
pub const DEFAULT_API_PATH: &str = "https://api.threatconnect.com";

/// Default for the input, output and temporary working directories.
pub const DEFAULT_WORK_PATH: &str = "/tmp";

/// Log levels accepted by `tc_log_level`
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warning", "error", "critical"];

pub fn api_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("api_access_id").with_help("API access id"),
        ArgOption::string("api_secret_key")
            .with_help("API secret key")
            .secret(),
        ArgOption::string("api_default_org").with_help("Default organization for API calls"),
        ArgOption::string("tc_token")
            .with_help("Platform session token")
            .secret(),
        ArgOption::integer("tc_token_expires").with_help("Session token expiration (epoch seconds)"),
        ArgOption::string("tc_api_path")
            .with_default(DEFAULT_API_PATH)
            .with_help("Platform API endpoint"),
    ]
}

pub fn batch_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("batch_action")
            .with_choices(["Create", "Delete"])
            .with_default("Create")
            .with_help("Action for the batch job"),
        ArgOption::integer("batch_chunk")
            .with_default(25000)
            .with_help("Max indicators per batch request"),
        ArgOption::flag("batch_halt_on_error")
            .with_default(false)
            .with_help("Stop the batch job on the first error"),
        ArgOption::integer("batch_poll_interval")
            .with_default(15)
            .with_help("Seconds between batch status polls"),
        ArgOption::integer("batch_poll_interval_max")
            .with_default(3600)
            .with_help("Max seconds to poll batch status"),
        ArgOption::string("batch_write_type")
            .with_choices(["Append", "Replace"])
            .with_default("Append")
            .with_help("Write type for the batch job"),
    ]
}

pub fn logging_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("tc_log_path")
            .with_default("log")
            .with_help("Directory for log files"),
        ArgOption::string("tc_log_file")
            .with_default("app.log")
            .with_help("Log file name"),
        ArgOption::string("tc_log_level")
            .with_choices(LOG_LEVELS)
            .with_default("info")
            .with_help("Log level"),
        ArgOption::flag("tc_log_to_api")
            .with_default(false)
            .with_help("Forward log events to the platform API"),
    ]
}

pub fn path_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("tc_temp_path")
            .with_default(DEFAULT_WORK_PATH)
            .with_help("Directory for temporary files"),
        ArgOption::string("tc_out_path")
            .with_default(DEFAULT_WORK_PATH)
            .with_help("Directory for output files"),
        ArgOption::string("tc_in_path")
            .with_default(DEFAULT_WORK_PATH)
            .with_help("Directory for input files"),
    ]
}

pub fn playbook_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("tc_playbook_db_type")
            .with_choices(["Redis", "TCKeyValueAPI"])
            .with_default("Redis")
            .with_help("Playbook key/value store type"),
        ArgOption::string("tc_playbook_db_context").with_help("Playbook key/value store context"),
        ArgOption::string("tc_playbook_db_path")
            .with_default("localhost")
            .with_help("Playbook key/value store host"),
        ArgOption::integer("tc_playbook_db_port")
            .with_default(6379)
            .with_help("Playbook key/value store port"),
        ArgOption::string("tc_playbook_out_variables")
            .with_help("Comma-separated playbook output variables"),
    ]
}

pub fn proxy_options() -> Vec<ArgOption> {
    vec![
        ArgOption::string("tc_proxy_host").with_help("Proxy host"),
        ArgOption::integer("tc_proxy_port").with_help("Proxy port"),
        ArgOption::string("tc_proxy_username").with_help("Proxy username"),
        ArgOption::string("tc_proxy_password")
            .with_help("Proxy password")
            .secret(),
        ArgOption::flag("tc_proxy_tc")
            .with_default(false)
            .with_help("Use the proxy for platform API connections"),
        ArgOption::flag("tc_proxy_external")
            .with_default(false)
            .with_help("Use the proxy for external connections"),
    ]
}

/// All standard options, in group order.
pub fn standard_options() -> Vec<ArgOption> {
    let mut all = api_options();
    all.extend(batch_options());
    all.extend(logging_options());
    all.extend(path_options());
    all.extend(playbook_options());
    all.extend(proxy_options());
    all
}

impl TcExArgParser {
    /// A parser with every standard platform argument declared.
    pub fn with_standard_args() -> Self {
        let mut parser = Self::new();
        parser
            .declare_all(standard_options())
            .expect("standard platform arguments are valid declarations");
        parser
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argparser::{ArgValue, InputSource};

    #[test]
    fn standard_options_declare_cleanly() {
        let mut parser = TcExArgParser::new();
        assert!(parser.declare_all(standard_options()).is_ok());
        assert_eq!(parser.options().len(), standard_options().len());
    }

    #[test]
    fn defaults_resolve_without_input() {
        let mut parser = TcExArgParser::with_standard_args();
        let resolved = parser.resolve(&InputSource::new()).unwrap();
        assert_eq!(resolved.get("tc_api_path"), Some(&ArgValue::from(DEFAULT_API_PATH)));
        assert_eq!(resolved.get("batch_chunk"), Some(&ArgValue::Int(25000)));
        assert_eq!(resolved.get("tc_log_level"), Some(&ArgValue::from("info")));
        assert_eq!(resolved.get("api_access_id"), Some(&ArgValue::Null));
    }

    #[test]
    fn working_paths_default_apart_from_logs() {
        let mut parser = TcExArgParser::with_standard_args();
        parser.resolve(&InputSource::new()).unwrap();
        for name in ["tc_temp_path", "tc_out_path", "tc_in_path"] {
            assert_eq!(parser.get_str(name).unwrap(), DEFAULT_WORK_PATH, "{name}");
        }
        assert_eq!(parser.get_str("tc_log_path").unwrap(), "log");
    }

    #[test]
    fn environment_uses_upper_case_names() {
        let mut parser = TcExArgParser::with_standard_args();
        let src = InputSource::new().with_env([("TC_PLAYBOOK_DB_PORT", "6380")]);
        parser.resolve(&src).unwrap();
        assert_eq!(parser.get_i64("tc_playbook_db_port").unwrap(), 6380);
    }
}
