use clap::Parser;
use ra_core::{Error, Result, SummaryOptions};
use ra_inference::{
    InferenceConfig, ModelCache, DEFAULT_BACKEND, DEFAULT_MODEL_URL, DEFAULT_SENTIMENT_MODEL,
    DEFAULT_SUMMARIZATION_MODEL,
};
use ra_scraper::{
    handle_command, init_logging, render_about, AnalysisManager, AnalyzeArgs, FetchConfig,
    HttpFetcher, EMPTY_URL_MESSAGE,
};
use ra_web::{create_app, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(
        long,
        env = "RA_BACKEND",
        default_value = DEFAULT_BACKEND,
        help = "Inference backend. Available backends: huggingface (default), dummy"
    )]
    backend: String,
    /// Token for the hosted inference API
    #[arg(long, env = "HF_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
    /// Base URL of the hosted inference API
    #[arg(long, env = "RA_MODEL_URL", default_value = DEFAULT_MODEL_URL)]
    model_url: String,
    #[arg(long, default_value = DEFAULT_SUMMARIZATION_MODEL)]
    summarization_model: String,
    #[arg(long, default_value = DEFAULT_SENTIMENT_MODEL)]
    sentiment_model: String,
    /// Article fetch timeout in seconds
    #[arg(long, env = "RA_FETCH_TIMEOUT", default_value_t = 10)]
    timeout: u64,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize an article, score its sentiment and print advice
    Analyze(AnalyzeArgs),
    /// Serve the analysis pipeline over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
    /// Explain how the advisor works
    About,
}

impl Cli {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            backend: self.backend.clone(),
            api_token: self.api_token.clone(),
            model_url: self.model_url.clone(),
            summarization_model: self.summarization_model.clone(),
            sentiment_model: self.sentiment_model.clone(),
            summary: SummaryOptions::default(),
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout),
            ..FetchConfig::default()
        }
    }
}

fn create_manager(cli: &Cli) -> Result<AnalysisManager> {
    let fetcher = HttpFetcher::new(&cli.fetch_config())?;
    let models = ModelCache::new(cli.inference_config());
    Ok(AnalysisManager::new(Arc::new(fetcher), Arc::new(models)))
}

/// Runs `ra analyze` and returns the process exit code.
///
/// A blank URL exits 2 before any model is loaded. An incomplete analysis
/// exits 1.
async fn run_analyze(cli: &Cli, args: &AnalyzeArgs) -> Result<i32> {
    if args.url.trim().is_empty() {
        eprintln!("{}", EMPTY_URL_MESSAGE);
        return Ok(2);
    }

    let manager = create_manager(cli)?;
    manager.models().preload().await?;
    info!("🧠 Inference models initialized successfully (using {})", cli.backend);

    match handle_command(args.clone(), &manager).await {
        Ok(analysis) if analysis.is_complete() => Ok(0),
        Ok(_) => Ok(1),
        Err(Error::InvalidUrl(message)) => {
            eprintln!("{}", message);
            Ok(2)
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match &cli.command {
        Commands::About => {
            print!("{}", render_about());
        }
        Commands::Analyze(args) => {
            let code = run_analyze(&cli, args).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Serve { addr } => {
            let manager = create_manager(&cli)?;
            let app = create_app(AppState {
                manager: Arc::new(manager),
            })
            .await;
            let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
            info!("🌐 Serving analysis API on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["ra", "analyze", "https://news.example.com/a"]).unwrap();
        assert_eq!(cli.log_level(), Level::INFO);
        assert_eq!(cli.fetch_config().timeout, Duration::from_secs(10));
        let config = cli.inference_config();
        assert_eq!(config.summarization_model, DEFAULT_SUMMARIZATION_MODEL);
        assert_eq!(config.summary, SummaryOptions::default());
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.url, "https://news.example.com/a");
                assert!(!args.show_original);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "ra", "--backend", "dummy", "--timeout", "3", "-vv", "analyze", "--show-original",
            "https://news.example.com/a",
        ])
        .unwrap();
        assert_eq!(cli.backend, "dummy");
        assert_eq!(cli.fetch_config().timeout, Duration::from_secs(3));
        assert_eq!(cli.log_level(), Level::TRACE);
    }

    #[test]
    fn test_serve_default_addr() {
        let cli = Cli::try_parse_from(["ra", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { addr } => assert_eq!(addr, "127.0.0.1:8080"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_url_exits_before_models_load() {
        // No token is configured, so preloading the default backend would fail.
        let cli = Cli::try_parse_from(["ra", "--backend", "huggingface", "analyze", "  "]).unwrap();
        let Commands::Analyze(args) = &cli.command else {
            panic!("unexpected command: {:?}", cli.command);
        };
        assert_eq!(run_analyze(&cli, args).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_fetch() {
        let cli = Cli::try_parse_from([
            "ra",
            "--backend",
            "huggingface",
            "--api-token",
            " ",
            "analyze",
            "https://news.example.com/a",
        ])
        .unwrap();
        let Commands::Analyze(args) = &cli.command else {
            panic!("unexpected command: {:?}", cli.command);
        };
        let err = run_analyze(&cli, args).await.unwrap_err();
        assert!(err.to_string().contains("API token is required"));
    }

    #[test]
    fn test_analyze_requires_url() {
        assert!(Cli::try_parse_from(["ra", "analyze"]).is_err());
    }
}
