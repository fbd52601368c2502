use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use biascheck_client::{HttpTransport, HttpTransportConfig, ReqwestFetcher, SelectorExtractor};
use biascheck_core::traits::{ArticleExtractor, Fetcher};
use biascheck_core::{Classifier, PageAnalyzer, PageOutcome, Provider, ProviderConfig};

#[derive(Parser)]
#[command(name = "biascheck", version, about = "Political-bias scoring for news articles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the article from a page and score its political lean
    Check {
        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Score raw article text (from a file, or stdin when omitted)
    Classify {
        /// Text file to classify
        #[arg(short, long)]
        text: Option<PathBuf>,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Print the article text the extractor finds on a page
    Extract {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show which provider is selected and which keys are present
    Config {
        #[command(flatten)]
        provider: ProviderArgs,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Page URL (fetched unless --html is given)
    #[arg(short, long)]
    url: String,

    /// Read the page from a saved HTML file instead of fetching it
    #[arg(long)]
    html: Option<PathBuf>,

    /// Extra CSS selectors tried before the built-in list (repeatable)
    #[arg(short, long = "selector")]
    selectors: Vec<String>,
}

#[derive(Args)]
struct ProviderArgs {
    /// Provider to use: openai, gemini or claude (overrides settings)
    #[arg(short, long, env = "BIASCHECK_PROVIDER")]
    provider: Option<String>,

    /// Settings JSON in the extension layout (apiProvider, openaiApiKey, ...)
    #[arg(long, env = "BIASCHECK_SETTINGS")]
    settings: Option<PathBuf>,

    /// Give up on the provider after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

impl ProviderArgs {
    fn load_config(&self) -> Result<ProviderConfig> {
        let mut config = match &self.settings {
            Some(path) => ProviderConfig::from_json_file(path)?,
            None => ProviderConfig::from_env(),
        };
        if let Some(provider) = &self.provider {
            config.provider = provider.clone();
        }
        tracing::debug!(?config, "Loaded provider config");
        Ok(config)
    }

    fn transport(&self) -> Result<HttpTransport> {
        let config = HttpTransportConfig::default().with_timeout(Duration::from_secs(self.timeout));
        HttpTransport::with_config(config).context("Failed to create HTTP client")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("biascheck=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { page, provider } => cmd_check(&page, &provider).await?,
        Commands::Classify { text, provider } => cmd_classify(text.as_deref(), &provider).await?,
        Commands::Extract { page } => cmd_extract(&page).await?,
        Commands::Config { provider } => cmd_config(&provider)?,
    }

    Ok(())
}

fn read_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))
}

async fn cmd_check(page: &PageArgs, provider: &ProviderArgs) -> Result<()> {
    let config = provider.load_config()?;

    let extractor = SelectorExtractor::with_selectors(page.selectors.as_slice())?;
    let analyzer = PageAnalyzer::new(extractor, provider.transport()?);

    let analysis = async {
        let outcome = match &page.html {
            Some(path) => analyzer.analyze(&read_html(path)?, &page.url, &config).await?,
            None => {
                let fetcher = ReqwestFetcher::new().context("Failed to create HTTP client")?;
                analyzer.analyze_url(&fetcher, &page.url, &config).await?
            }
        };
        Ok::<_, anyhow::Error>(outcome)
    };

    let outcome = tokio::time::timeout(Duration::from_secs(provider.timeout), analysis)
        .await
        .with_context(|| format!("Analysis timed out after {} seconds", provider.timeout))??;

    match outcome {
        PageOutcome::Scored(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        PageOutcome::NoArticle { url, chars } => {
            anyhow::bail!("No article found on {url} ({chars} characters of text)")
        }
    }
}

async fn cmd_classify(text_path: Option<&Path>, provider: &ProviderArgs) -> Result<()> {
    let config = provider.load_config()?;

    let text = match text_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read article text from stdin")?;
            buf
        }
    };

    let classifier = Classifier::new(provider.transport()?);

    let dist = tokio::time::timeout(
        Duration::from_secs(provider.timeout),
        classifier.classify(&text, &config),
    )
    .await
    .with_context(|| format!("Classification timed out after {} seconds", provider.timeout))??;

    println!("{}", serde_json::to_string_pretty(&dist)?);
    Ok(())
}

async fn cmd_extract(page: &PageArgs) -> Result<()> {
    let html = match &page.html {
        Some(path) => read_html(path)?,
        None => {
            let fetcher = ReqwestFetcher::new().context("Failed to create HTTP client")?;
            fetcher.fetch(&page.url).await?
        }
    };
    let extractor = SelectorExtractor::with_selectors(page.selectors.as_slice())?;

    let text = extractor.extract(&html);
    if text.is_empty() {
        anyhow::bail!("No article text found on {}", page.url);
    }

    tracing::info!("Extracted {} characters", text.chars().count());
    println!("{text}");
    Ok(())
}

fn cmd_config(provider: &ProviderArgs) -> Result<()> {
    let config = provider.load_config()?;

    let keys: serde_json::Map<String, serde_json::Value> = Provider::ALL
        .iter()
        .map(|p| {
            let present = !config.credentials.key_for(*p).is_empty();
            (p.as_str().to_string(), serde_json::Value::Bool(present))
        })
        .collect();

    let summary = serde_json::json!({
        "provider": config.provider,
        "supported": config.resolve_provider().is_ok(),
        "hasApiKey": config.has_api_key(),
        "keys": keys,
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
