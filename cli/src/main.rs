use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dhcp_lease_parser::config::QueryConfig;
use dhcp_lease_parser::output::{OutputFormat, ScopeLeases, format_leases, format_scopes};
use dhcp_lease_parser::{FailurePolicy, ReportLayout, ReportParse, parse_report, query_scope};
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
            CliOutputFormat::Csv => Self::Csv,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lease-report")]
#[command(about = "List DHCP server leases as structured records")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run netsh against a DHCP server and list the leases of one or more scopes.
    Query(QueryArgs),
    /// Parse a captured lease report from a file.
    ParseFile(ParseFileArgs),
    /// Parse a captured lease report from stdin.
    ParseStdin(ParseStdinArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    /// YAML config file with server, scopes, and query settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// DHCP server host name or address.
    #[arg(long)]
    server: Option<String>,
    /// Scope to list (repeatable, or comma-separated).
    #[arg(long = "scope", value_delimiter = ',')]
    scopes: Vec<String>,
    /// Program used to produce the report (default: netsh).
    #[arg(long)]
    netsh: Option<PathBuf>,
    /// Kill the report command after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Number of scopes queried in parallel.
    #[arg(long)]
    jobs: Option<usize>,
    /// Leave out rows that fail extraction instead of failing the scope.
    #[arg(long)]
    skip_malformed: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Path to a file containing captured report text.
    #[arg(long)]
    input: PathBuf,
    /// Leave out rows that fail extraction instead of failing.
    #[arg(long)]
    skip_malformed: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    /// Leave out rows that fail extraction instead of failing.
    #[arg(long)]
    skip_malformed: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Query(args) => run_query(args),
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseStdin(args) => run_parse_stdin(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// query command
// ---------------------------------------------------------------------------

fn run_query(args: QueryArgs) -> Result<(), String> {
    use rayon::prelude::*;

    let config = resolve_query_config(&args)?;
    let format: OutputFormat = args.format.into();
    let netsh = config.netsh_command();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let results: Vec<Result<ScopeLeases, String>> = pool.install(|| {
        config
            .scopes
            .par_iter()
            .map(|scope| {
                let parse = query_scope(&netsh, &config.server, scope, &config.layout)
                    .map_err(|e| format!("scope {scope}: {e}"))?;
                let leases = parse
                    .into_records(config.failure_policy)
                    .map_err(|e| format!("scope {scope}: {e}"))?;
                Ok(ScopeLeases {
                    scope: scope.clone(),
                    leases,
                })
            })
            .collect()
    });

    let scopes = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let output = format_scopes(&scopes, format)?;
    println!("{output}");
    Ok(())
}

fn resolve_query_config(args: &QueryArgs) -> Result<QueryConfig, String> {
    let mut config = match &args.config {
        Some(path) => QueryConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => {
            let server = args
                .server
                .clone()
                .ok_or_else(|| "Specify --server or --config".to_string())?;
            QueryConfig::new(server, Vec::new())
        }
    };

    if let Some(server) = &args.server {
        config.server = server.clone();
    }
    let scopes = parse_scope_list(&args.scopes);
    if !scopes.is_empty() {
        config.scopes = scopes;
    }
    if let Some(netsh) = &args.netsh {
        config.netsh = netsh.clone();
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    if args.skip_malformed {
        config.failure_policy = FailurePolicy::SkipMalformed;
    }

    if config.scopes.is_empty() {
        return Err("Specify at least one --scope".to_string());
    }
    config.validate().map_err(|e| e.to_string())?;

    tracing::debug!(
        server = %config.server,
        scopes = ?config.scopes,
        timeout = ?config.timeout_secs.map(Duration::from_secs),
        jobs = config.jobs,
        "Resolved query configuration"
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// parse-file / parse-stdin commands
// ---------------------------------------------------------------------------

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let report = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    run_parse_report(&report, args.skip_malformed, args.format.into())
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut report = String::new();
    std::io::stdin()
        .read_to_string(&mut report)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_report(&report, args.skip_malformed, args.format.into())
}

fn run_parse_report(report: &str, skip_malformed: bool, format: OutputFormat) -> Result<(), String> {
    let parse: ReportParse = parse_report(report, &ReportLayout::default());
    let policy = if skip_malformed {
        FailurePolicy::SkipMalformed
    } else {
        FailurePolicy::FailFast
    };
    let failures = parse.failures.len();
    let leases = parse.into_records(policy).map_err(|e| e.to_string())?;

    let output = format_leases(&leases, format)?;
    println!("{output}");

    if failures > 0 {
        eprintln!("{failures} malformed row(s) skipped.");
    }
    Ok(())
}

/// Splits scope arguments, trimming whitespace and dropping empty entries.
fn parse_scope_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
