//! Command-line interface for flowchart
//! This binary converts procedure scripts into Mermaid flowcharts (or their JSON graph).
//!
//! Usage:
//!   flowchart [`<path>`] [--format `<format>`] [--output `<file>`] [--config `<file>`]
//!   flowchart --list-formats
//!
//! The script is read from stdin when no path (or `-`) is given. A `flowchart.toml` in the
//! working directory is layered over the built-in defaults, and `--config` over that.

use clap::{Arg, ArgAction, ArgMatches, Command};
use flowchart_config::{FlowchartConfig, Loader};
use flowchart_parser::flow::formats::{Envelope, FormatRegistry};
use flowchart_parser::FlowLoader;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("flowchart")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert indentation-driven procedure scripts into Mermaid flowcharts")
        .arg(
            Arg::new("path")
                .help("Path to the script (reads stdin when omitted or '-')")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write the result to this file instead of stdout"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from config: mermaid)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the defaults and ./flowchart.toml"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline progress to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    if let Err(message) = handle_convert_command(&matches) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with the chart. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Picked up from the working directory when present
const PROJECT_CONFIG: &str = "flowchart.toml";

fn load_config(matches: &ArgMatches) -> Result<FlowchartConfig, String> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        debug!(config = %path, "layering config file");
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("render.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| format!("invalid configuration: {}", e))
}

fn read_source(path: Option<&str>) -> Result<String, String> {
    match path {
        None | Some("-") => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(source)
        }
        Some(path) => fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e)),
    }
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) -> Result<(), String> {
    let config = load_config(matches)?;
    let path = matches.get_one::<String>("path").map(String::as_str);
    let source = read_source(path)?;
    info!(input = path.unwrap_or("-"), format = %config.render.format, "converting");

    let output = config
        .apply(FlowLoader::from_string(source))
        .render_as(&config.render.format)
        .map_err(|e| e.to_string())?;

    match matches.get_one::<String>("output") {
        Some(file) => {
            fs::write(file, &output)
                .map_err(|e| format!("cannot write {}: {}", file, e))?;
            info!(output = %file, "written");
        }
        None => println!("{}", output),
    }
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::new(Envelope::default());
    println!("Available output formats:\n");
    for (name, description) in registry.formats() {
        println!("  {:<10} {}", name, description);
    }
}
