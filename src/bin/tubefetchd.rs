use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tubefetch::config::Config;
use tubefetch::daemon;
use tubefetch::error::Result;
use tubefetch::providers::youtube::YouTubePlatform;
use tubefetch::services::search::SearchService;

#[derive(Parser, Debug)]
#[command(name = "tubefetchd")]
#[command(about = "Video search fetch daemon")]
struct Cli {
    /// API key for the upstream video platform.
    #[arg(long, env = "YT_API_KEY", default_value = "")]
    api_key: String,

    /// Max videos fetched in a single search (default 10).
    #[arg(long)]
    max_results: Option<u32>,

    /// Bind host (default localhost).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (default 9998).
    #[arg(long)]
    port: Option<u16>,

    /// Optional JSON config file; flags override file values.
    #[arg(long)]
    config: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if !self.api_key.trim().is_empty() {
            config.api_key = self.api_key;
        }
        if let Some(max_results) = self.max_results {
            config.max_results = max_results;
        }
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tubefetch=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = cli.into_config()?;

    // A client that cannot be built is unusable for the whole process
    // lifetime, so this error is fatal.
    let platform = Arc::new(YouTubePlatform::new(config.api_key.clone(), None)?);
    let search = Arc::new(SearchService::new(&config, platform));

    daemon::run(&config, search).await
}
