//! route-matcher CLI
//!
//! Loads a TOML route table and resolves requests against it.
//!
//! ```text
//! route-matcher --routes routes.toml match --uri https://api.example.com/users/7 -X GET
//! route-matcher --routes routes.toml routes
//! route-matcher --routes routes.toml check
//! route-matcher --routes routes.toml watch
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use route_matcher::config::{load_config, ConfigWatcher, ObservabilityConfig, RouterConfig};
use route_matcher::observability::init_logging;
use route_matcher::{MatchRequest, Matcher, Route, ServerParams, SharedMatcher};

#[derive(Parser)]
#[command(name = "route-matcher")]
#[command(about = "Match requests against a route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    routes: PathBuf,

    /// Override the configured base path.
    #[arg(long)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single request
    Match {
        /// Request URI, absolute or origin-form
        #[arg(long)]
        uri: String,

        /// HTTP method (empty means GET)
        #[arg(short = 'X', long, default_value = "")]
        method: String,

        /// Header as "Name: value", repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Treat the request as received over TLS
        #[arg(long)]
        https: bool,

        /// Server port the request arrived on
        #[arg(long)]
        port: Option<u16>,
    },
    /// List routes in matching order
    Routes,
    /// Validate the route table
    Check,
    /// Watch the route table and republish it on change
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.routes) {
        Ok(config) => with_overrides(config, &cli),
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(path = ?cli.routes, error = %e, "Failed to load route table");
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    init_logging(&config.observability);

    tracing::info!(
        path = ?cli.routes,
        routes = config.routes.len(),
        base_path = %config.matcher.base_path,
        "Route table loaded"
    );

    match &cli.command {
        Commands::Match {
            uri,
            method,
            headers,
            https,
            port,
        } => {
            let mut request = MatchRequest::from_uri(uri)?.with_method(method.as_str());
            for header in headers {
                let (name, value) = header
                    .split_once(':')
                    .ok_or_else(|| format!("invalid header '{}', expected 'Name: value'", header))?;
                request = request.with_header(name.trim(), value.trim());
            }
            if *https || port.is_some() {
                let mut params = ServerParams {
                    https: None,
                    server_port: *port,
                };
                if *https {
                    params.https = Some("on".to_string());
                }
                request = request.with_server_params(params);
            }

            match config.build_matcher().match_request(&request) {
                Ok(route) => {
                    println!("{}", serde_json::to_string_pretty(&describe(&route))?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    let body = json!({
                        "error": e.to_string(),
                        "status": e.status().as_u16(),
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Routes => {
            for (name, route) in config.route_collection().iter() {
                let methods = if route.allows().is_empty() {
                    "*".to_string()
                } else {
                    route.allows().join(",")
                };
                let marker = if route.is_routable() { "" } else { " (generate only)" };
                println!("{:<24} {:<12} {}{}", name, methods, route.path(), marker);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            println!("{}: {} routes OK", cli.routes.display(), config.routes.len());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch => {
            let shared = SharedMatcher::new(config.build_matcher());
            let (watcher, mut updates) = ConfigWatcher::new(&cli.routes);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(config) = updates.recv() => {
                        let config = with_overrides(config, &cli);
                        shared.publish(config.build_matcher());
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!(generation = shared.generation(), "Shutting down");
                        break;
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn with_overrides(mut config: RouterConfig, cli: &Cli) -> RouterConfig {
    if let Some(base_path) = &cli.base_path {
        config.matcher.base_path = base_path.clone();
    }
    config
}

fn describe(route: &Route) -> serde_json::Value {
    let handler = route
        .handler()
        .and_then(|h| h.downcast_ref::<String>())
        .cloned();
    json!({
        "route": route.name(),
        "handler": handler,
        "path": route.path(),
        "attributes": route.attributes(),
        "defaults": route.defaults(),
    })
}
