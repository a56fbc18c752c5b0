//! Command-line definition and dispatch

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use countlineslib::{validate_target, walk, CountReport, ExclusionSet};
use tracing::info;

use crate::render::{render_count, render_preamble, OutputFormat};
use crate::server::{self, ServerConfig};

/// Arguments of a counting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountArgs {
    /// Directory to count
    pub path: PathBuf,
    /// Default exclusions plus every `--exclude` pattern
    pub excludes: ExclusionSet,
    pub format: OutputFormat,
}

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Count(CountArgs),
    Serve(ServerConfig),
}

/// Build the clap Command structure
pub fn build_command() -> Command {
    Command::new("countlines")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count code, comment, and blank lines in a directory tree")
        .disable_version_flag(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .value_name("DIRECTORY")
                .value_parser(value_parser!(PathBuf))
                .required_unless_present("web")
                .conflicts_with("web")
                .help("Directory to analyze"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("PATTERN")
                .action(ArgAction::Append)
                .help("Exclude paths containing PATTERN (can be specified multiple times)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("web")
                .short('w')
                .long("web")
                .value_name("PORT")
                .num_args(0..=1)
                .default_missing_value("8080")
                .value_parser(value_parser!(u16).range(1..))
                .help("Start the web server instead of counting (default port 8080)"),
        )
        .arg(
            Arg::new("web-root")
                .long("web-root")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .default_value("web")
                .help("Directory holding the web UI files"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("ADDR")
                .value_parser(value_parser!(IpAddr))
                .default_value("0.0.0.0")
                .help("Address the web server binds to"),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .after_help(
            "Default exclusions: .git .svn .hg node_modules __pycache__ .vs .vscode\n\n\
             Examples:\n  \
             countlines ./src\n  \
             countlines . -e build --exclude=vendor\n  \
             countlines --web 3000",
        )
}

/// Turn parsed arguments into an [`Invocation`].
pub fn parse_invocation(matches: &ArgMatches) -> anyhow::Result<Invocation> {
    if let Some(port) = matches.get_one::<u16>("web") {
        let defaults = ServerConfig::default();
        return Ok(Invocation::Serve(ServerConfig {
            host: matches
                .get_one::<IpAddr>("host")
                .copied()
                .unwrap_or(defaults.host),
            port: *port,
            web_root: matches
                .get_one::<PathBuf>("web-root")
                .cloned()
                .unwrap_or(defaults.web_root),
        }));
    }

    let path = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .context("no target directory specified")?;

    let patterns: Vec<String> = matches
        .get_many::<String>("exclude")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let format = match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    Ok(Invocation::Count(CountArgs {
        path,
        excludes: ExclusionSet::with_defaults().exclude_many(&patterns),
        format,
    }))
}

/// Execute an invocation to completion.
pub fn run(invocation: Invocation) -> anyhow::Result<()> {
    match invocation {
        Invocation::Count(args) => {
            let output = run_count(&args)?;
            print!("{output}");
            Ok(())
        }
        Invocation::Serve(config) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(server::run(config))
        }
    }
}

/// Validate the target, count it, and return everything to print.
pub fn run_count(args: &CountArgs) -> anyhow::Result<String> {
    validate_target(&args.path)?;

    let target = args.path.display().to_string();
    let mut output = String::new();
    if args.format == OutputFormat::Text {
        output.push_str(&render_preamble(&target, &args.excludes));
    }

    let started = Instant::now();
    let result = walk(&args.path, &args.excludes);
    let report = CountReport::new(&result, target, started.elapsed());

    info!(
        files = report.total_files,
        lines = report.total_lines,
        seconds = report.processing_time,
        "count finished"
    );

    output.push_str(&render_count(&report, args.format)?);
    Ok(output)
}
