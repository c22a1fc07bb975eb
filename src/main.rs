use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use directories::ProjectDirs;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use apifetch::config::{init_config, resolve_config};
use apifetch::logging::init_logging;
use apifetch::{Envelope, FetchConfig, Fetcher, Query, RequestProps, Service};

#[derive(Parser)]
#[command(name = "apifetch")]
#[command(about = "Issue requests against the proxy or node API", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a route and print the JSON response
    Get(Target),
    /// POST a JSON body to a route
    Post {
        #[command(flatten)]
        target: Target,

        /// JSON payload
        #[arg(short, long)]
        body: Option<String>,
    },
    /// GET a route and print the body as text
    Text(Target),
    /// Write the effective configuration to the config file
    Init,
}

#[derive(Args)]
struct Target {
    /// Route appended after the host, e.g. /users
    route: Option<String>,

    /// Query parameter as key=value; repeat to add more
    #[arg(short, long = "query", value_parser = parse_query_pair)]
    query: Vec<(String, String)>,

    /// Backend to target: proxy or node
    #[arg(short, long)]
    service: Option<Service>,

    #[arg(long)]
    api_version: Option<String>,
}

fn parse_query_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("Expected key=value, got: {}", raw))
}

impl Target {
    fn into_props(self) -> RequestProps {
        let mut props = RequestProps::new();
        props.route = self.route;
        props.service = self.service;
        props.api_version = self.api_version;
        if !self.query.is_empty() {
            props.query = Some(self.query.into_iter().collect::<Query>());
        }
        props
    }
}

fn print_envelope<T: Serialize>(envelope: &Envelope<T>) -> Result<bool> {
    let rendered =
        serde_json::to_string_pretty(envelope).context("Failed to render response envelope")?;
    println!("{}", rendered);
    Ok(envelope.is_success())
}

fn build_fetcher(config: FetchConfig, timeout_ms: Option<u64>) -> Result<Fetcher> {
    let fetcher = Fetcher::new(config).context("Failed to create HTTP client")?;
    Ok(match timeout_ms {
        Some(ms) => fetcher.with_timeout(Duration::from_millis(ms)),
        None => fetcher,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error messages
    color_eyre::install().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => match ProjectDirs::from("com", "apifetch", "apifetch") {
            Some(proj_dirs) => proj_dirs.config_dir().join("config.toml"),
            None => std::env::current_dir()?.join("apifetch.toml"),
        },
    };

    let config = resolve_config(&config_path)?;
    let timeout_ms = cli.timeout_ms;

    let succeeded = match cli.command {
        Commands::Init => {
            init_config(&config_path, &config)?;
            println!("Wrote {}", config_path.display());
            true
        }
        Commands::Get(target) => {
            let fetcher = build_fetcher(config, timeout_ms)?;
            print_envelope(&fetcher.get(target.into_props()).await)?
        }
        Commands::Post { target, body } => {
            let fetcher = build_fetcher(config, timeout_ms)?;
            let mut props = target.into_props();
            if let Some(raw) = body {
                let body: Value =
                    serde_json::from_str(&raw).context("Request body is not valid JSON")?;
                props = props.with_body(body);
            }
            print_envelope(&fetcher.post(props).await)?
        }
        Commands::Text(target) => {
            let fetcher = build_fetcher(config, timeout_ms)?;
            print_envelope(&fetcher.text(target.into_props()).await)?
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
