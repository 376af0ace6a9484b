mod cli;

use requestarr::{arr::ProviderRegistry, config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting Requestarr server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "requestarr=trace,requestarr_core=debug,tower_http=debug".to_string()
        } else {
            "requestarr=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Check => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(check_providers(cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("requestarr {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn check_providers(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let registry = ProviderRegistry::from_config(&config);

    let kinds = registry.kinds();
    if kinds.is_empty() {
        println!("No providers configured.");
        println!("Set SONARR_URL/SONARR_API_KEY (or RADARR_*, LIDARR_*) or add a [providers] section.");
        return Ok(());
    }

    println!("Checking providers...\n");
    let mut all_ok = true;

    for kind in kinds {
        let client = registry.get(kind)?;
        let url = config
            .providers
            .get(kind)
            .map(|p| p.url.as_str())
            .unwrap_or_default();

        match client.test_connection().await {
            Ok(true) => println!("✓ {} ({}) - {}", kind.provider_name(), kind, url),
            Ok(false) => {
                all_ok = false;
                println!(
                    "✗ {} ({}) - {}: API returned non-success status",
                    kind.provider_name(),
                    kind,
                    url
                );
            }
            Err(e) => {
                all_ok = false;
                println!("✗ {} ({}) - {}: {}", kind.provider_name(), kind, url, e);
            }
        }
    }

    println!();
    if all_ok {
        println!("All providers are reachable!");
    } else {
        println!("Some providers could not be reached. Check their URL and API key.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Request timeout: {}s", config.server.request_timeout_secs);
            println!("  Results per page: {}", config.server.results_per_page);
            for (kind, provider) in config.providers.iter() {
                println!(
                    "  {}: {} ({})",
                    kind.provider_name(),
                    provider.url,
                    if provider.enabled { "enabled" } else { "disabled" }
                );
            }
            println!(
                "  Providers: {}",
                config.providers.iter().filter(|(_, p)| p.enabled).count()
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
