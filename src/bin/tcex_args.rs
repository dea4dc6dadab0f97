//! tcex-args: inspect the standard app arguments
//!
//! Usage:
//!   tcex-args usage                       Show the standard argument help
//!   tcex-args check <params.json|yaml>    Resolve standard arguments against a params file
//!   tcex-args version                     Show version information

use anyhow::{bail, Context, Result};
use tcex::argparser::{InputSource, TcExArgParser};
use tcex::Identity;

fn main() {
    let args = match std::env::args_os()
        .map(|a| a.into_string())
        .collect::<Result<Vec<String>, _>>()
    {
        Ok(args) => args,
        Err(bad) => {
            eprintln!("Error: argument {bad:?} is not valid UTF-8");
            std::process::exit(1);
        }
    };
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "usage" => cmd_usage(),
        "check" => cmd_check(&args[2..]),
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"tcex-args - TcEx standard argument tool

USAGE:
    tcex-args <COMMAND> [OPTIONS]

COMMANDS:
    usage                       Show the standard argument help
    check <params>              Resolve standard arguments from a JSON/YAML params file
                                plus the process environment
    version                     Show version information
    help                        Show this help message

PRECEDENCE:
    command line > params file > environment > default"#
    );
}

fn cmd_version() -> Result<()> {
    println!("tcex-args {}", Identity::current());
    Ok(())
}

fn cmd_usage() -> Result<()> {
    print!("{}", TcExArgParser::with_standard_args().help("app"));
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        bail!("check requires a params file path");
    };

    let source = InputSource::from_process()
        .with_args(args[1..].iter().cloned())
        .with_mapping_file(path)
        .with_context(|| format!("reading {path}"))?;

    let mut parser = TcExArgParser::with_standard_args();
    let resolved = parser
        .resolve(&source)
        .with_context(|| format!("resolving standard arguments from {path}"))?;

    println!("{}", serde_json::to_string_pretty(&resolved.to_redacted_json())?);
    if !resolved.unrecognized().is_empty() {
        eprintln!("Ignored: {}", resolved.unrecognized().join(" "));
    }
    Ok(())
}
