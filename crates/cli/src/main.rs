use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};

use api_client::{ClientConfig, DEFAULT_BACKEND_URL};
use app::{AppConfig, CardGrid, RecommendationFetcher};
use model::DEFAULT_TOP_K;

mod display;
mod interactive;

/// ReelSense - explainable movie recommendations in the terminal
#[derive(Parser)]
#[command(name = "reelsense")]
#[command(about = "Client for the ReelSense recommendation service", long_about = None)]
struct Cli {
    /// Origin of the recommendation backend
    #[arg(long, env = "REELSENSE_BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    backend_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Number of recommendations to request
    #[arg(
        long,
        default_value_t = DEFAULT_TOP_K,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=100),
        global = true
    )]
    top_k: usize,

    /// API key for poster lookups; posters are skipped without one
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true, global = true)]
    tmdb_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: String,

        /// Show the explanation of every recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Enter user ids interactively
    Interactive,

    /// Check that the recommendation backend is reachable
    Status,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            backend: ClientConfig {
                base_url: self.backend_url.clone(),
                timeout_secs: self.timeout_secs,
            },
            top_k: self.top_k,
            poster: None,
        }
        .with_poster_api_key(self.tmdb_api_key.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the drawn view
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.app_config();

    match cli.command {
        Commands::Recommend { user_id, explain } => {
            handle_recommend(config, &user_id, explain).await?
        }
        Commands::Interactive => interactive::run(config).await?,
        Commands::Status => handle_status(config).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
///
/// A failed fetch is drawn like any other state; only setup errors end
/// the process with an error.
async fn handle_recommend(config: AppConfig, user_id: &str, explain: bool) -> Result<()> {
    let source = config
        .recommendation_source()
        .context("Failed to create recommendation client")?;
    let fetcher = RecommendationFetcher::new(source, config.top_k);

    display::print_lines(&display::header_lines());

    let Ok(pending) = fetcher.submit(user_id) else {
        display::print_lines(&display::snapshot_lines(&fetcher.snapshot(), None));
        return Ok(());
    };

    display::print_lines(&display::snapshot_lines(&fetcher.snapshot(), None));
    pending.resolve().await;

    let snapshot = fetcher.snapshot();
    let mut grid = snapshot
        .state
        .results()
        .map(|results| CardGrid::mount(snapshot.generation, results, config.poster_source()));

    if let Some(grid) = grid.as_mut() {
        if explain {
            grid.focus_all();
        }
        grid.wait_posters().await;
    }

    display::print_lines(&display::snapshot_lines(&snapshot, grid.as_ref()));
    Ok(())
}

/// Handle the 'status' command
async fn handle_status(config: AppConfig) -> Result<()> {
    let client = config
        .recommendation_client()
        .context("Failed to create recommendation client")?;
    let status = client
        .status()
        .await
        .with_context(|| {
            format!("Recommendation backend at {} is not reachable", client.base_url())
        })?;

    display::print_lines(&display::status_lines(client.base_url(), &status));
    Ok(())
}
