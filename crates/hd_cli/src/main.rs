use clap::{Args, Parser};
use hd_client::{render_page, DigestController, HttpDigestSource, Phase};
use hd_core::{DigestConfig, Error, Result};
use hd_scrapers::DigestManager;
use hd_web::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit_millis = match c {
                    'm' if chars.peek() == Some(&'s') => {
                        chars.next();
                        1
                    }
                    's' => 1_000,
                    'm' => 60_000,
                    'h' => 3_600_000,
                    'd' => 86_400_000,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_millis = add_millis(total_millis, num, unit_millis)?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // If we have a number but no unit, assume seconds
        if !current_number.is_empty() {
            if let Ok(num) = current_number.parse::<u64>() {
                total_millis = add_millis(total_millis, num, 1_000)?;
                has_unit = true;
            } else {
                return Err("Invalid number in duration".to_string());
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

fn add_millis(total: u64, amount: u64, unit_millis: u64) -> std::result::Result<u64, String> {
    amount
        .checked_mul(unit_millis)
        .and_then(|millis| total.checked_add(millis))
        .ok_or_else(|| "Duration is too large".to_string())
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Only keep stories posted in the last N days
    #[arg(long, env = "HD_DAYS", default_value_t = 15, global = true)]
    days: i64,
    /// Maximum number of listing pages to walk
    #[arg(long, env = "HD_MAX_PAGES", default_value_t = 30, global = true)]
    max_pages: u32,
    /// Number of top stories to summarize
    #[arg(long, env = "HD_TOP", default_value_t = 10, global = true)]
    top: usize,
    /// Concurrent article fetches
    #[arg(long, env = "HD_CONCURRENCY", default_value_t = 10, global = true)]
    concurrency: usize,
    /// Per-request timeout for listing and article pages (e.g. 10s, 1m30s)
    #[arg(long, env = "HD_TIMEOUT", default_value = "10s", global = true)]
    timeout: HumanDuration,
    /// Timeout for the summary generation
    #[arg(long, env = "HD_MODEL_TIMEOUT", default_value = "10m", global = true)]
    model_timeout: HumanDuration,
    #[arg(
        long,
        env = "HD_MODEL",
        default_value = "ollama",
        global = true,
        help = "Model to use for inference. Available models: ollama (default), dummy"
    )]
    model: String,
    /// Model name passed to the backend
    #[arg(long, env = "HD_MODEL_NAME", default_value = hd_core::config::DEFAULT_MODEL_NAME, global = true)]
    model_name: String,
    /// Base URL of the Ollama server
    #[arg(long, env = "HD_MODEL_URL", default_value = hd_core::config::DEFAULT_MODEL_URL, global = true)]
    model_url: String,
}

impl PipelineArgs {
    fn config(&self) -> DigestConfig {
        DigestConfig {
            days: self.days,
            max_pages: self.max_pages,
            top_n: self.top,
            concurrency: self.concurrency,
            request_timeout: self.timeout.0,
            model_timeout: self.model_timeout.0,
            model: self.model.clone(),
            model_name: self.model_name.clone(),
            model_url: self.model_url.clone(),
            ..DigestConfig::default()
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Hacker News tech digest", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pipeline: PipelineArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the digest API and pages
    Serve {
        #[arg(long, env = "HD_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "HD_PORT", default_value_t = 8000)]
        port: u16,
        /// Directory served under /static
        #[arg(long, env = "HD_STATIC_DIR", default_value = "crates/hd_web/static")]
        static_dir: PathBuf,
    },
    /// Request a digest from a running server and write it as an HTML page
    Digest {
        #[arg(long, env = "HD_SERVER", default_value = "http://localhost:8000")]
        server: String,
        /// Write the page here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the ranked tech stories without summarizing them
    Scrape {
        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Run the whole pipeline locally and print the digest
    Summarize {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn create_manager(config: DigestConfig) -> Result<DigestManager> {
    let inference = hd_inference::create_model(&config)?;
    info!("🧠 Inference model initialized (using {})", inference.name());
    DigestManager::new(config, inference)
}

async fn serve(host: &str, port: u16, static_dir: PathBuf, config: DigestConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| Error::Config(format!("Invalid listen address {}:{}: {}", host, port, e)))?;
    let manager = create_manager(config)?;
    let state = AppState::new(Arc::new(manager), static_dir);
    hd_web::serve(addr, state).await
}

async fn digest(server: &str, output: Option<PathBuf>) -> Result<()> {
    let source = HttpDigestSource::new(server).map_err(|e| Error::Config(e.to_string()))?;
    info!("📡 Requesting {}", source.endpoint());

    let mut controller = DigestController::new(source);
    let phase = controller.trigger().await;
    let page = render_page(controller.view());

    match output {
        Some(path) => {
            tokio::fs::write(&path, page).await?;
            info!("💾 Wrote {}", path.display());
        }
        None => println!("{}", page),
    }

    if phase == Phase::Error {
        return Err(Error::External(anyhow::anyhow!(
            controller.view().error_message.clone()
        )));
    }
    Ok(())
}

async fn scrape(config: DigestConfig, json: bool) -> Result<()> {
    let manager = create_manager(config)?;
    let stories = manager.top_stories().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stories)?);
        return Ok(());
    }
    for story in &stories {
        println!("{:>5} pts  {:<14} {}", story.score, story.age_text, story.title);
        println!("                      {}", story.url);
    }
    Ok(())
}

async fn summarize(config: DigestConfig, json: bool) -> Result<()> {
    let manager = create_manager(config)?;
    let digest = manager.build_digest().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&digest)?);
        return Ok(());
    }
    println!("{}\n", digest.summary);
    for article in &digest.articles {
        println!("- [{}] {} ({})", article.score, article.title, article.url);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    hd_scrapers::init_logging();
    let cli = Cli::parse();
    let config = cli.pipeline.config();
    config.validate()?;

    match cli.command {
        Commands::Serve { host, port, static_dir } => serve(&host, port, static_dir, config).await,
        Commands::Digest { server, output } => digest(&server, output).await,
        Commands::Scrape { json } => scrape(config, json).await,
        Commands::Summarize { json } => summarize(config, json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_human_duration() {
        assert_eq!("10s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(10));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("250ms".parse::<HumanDuration>().unwrap().0, Duration::from_millis(250));
        assert_eq!("1h".parse::<HumanDuration>().unwrap().0, Duration::from_secs(3600));
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert!("10x".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        assert_eq!(
            "300000000000000d".parse::<HumanDuration>(),
            Err("Duration is too large".to_string())
        );
        assert_eq!(
            "18446744073709551615ms1s".parse::<HumanDuration>(),
            Err("Duration is too large".to_string())
        );
        assert!(Cli::try_parse_from(["hd", "--timeout", "300000000000000d", "scrape"]).is_err());
    }

    #[test]
    fn test_pipeline_args_to_config() {
        let cli = Cli::try_parse_from([
            "hd", "--days", "7", "--top", "5", "--model", "dummy", "--timeout", "2s", "scrape",
        ])
        .unwrap();
        let config = cli.pipeline.config();
        assert_eq!(config.days, 7);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.model, "dummy");
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.max_pages, 30);
        assert!(matches!(cli.command, Commands::Scrape { json: false }));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::try_parse_from(["hd", "summarize", "--json", "--max-pages", "3"]).unwrap();
        assert_eq!(cli.pipeline.config().max_pages, 3);
        assert!(matches!(cli.command, Commands::Summarize { json: true }));
    }
}
