//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use wikicorpus_core::{BuildResult, ProgressReporter, build_corpus, load_taxonomy, save_corpus};
use wikicorpus_shared::{AppConfig, CorpusOptions, init_config, load_config};
use wikicorpus_wiki::WikiClient;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// WikiCorpus — build a text corpus from Wikipedia categories.
#[derive(Parser)]
#[command(
    name = "wikicorpus",
    version,
    about = "Create a corpus of Wikipedia articles based on Wikipedia categories.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write plain-text logs to this file (truncated on start).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Collect articles for every category in a taxonomy file and save them.
    Build(BuildArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `wikicorpus build`. Unset flags fall back to the config file.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    /// Path to the JSON file mapping category labels to Wikipedia categories.
    pub path: PathBuf,

    /// ISO-639-1 language code of the Wikipedia to read (default: "de").
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Maximum number of articles per category (default: 1000).
    #[arg(short = 'a', long)]
    pub max_articles: Option<usize>,

    /// Characters cut from the start of every article (default: 0).
    ///
    /// Together with --max-article-length this selects the character window
    /// [min, max) of each article; it is an offset, not a minimum length.
    #[arg(long)]
    pub min_article_length: Option<usize>,

    /// Character offset at which every article is cut off (default: 10000).
    #[arg(long)]
    pub max_article_length: Option<usize>,

    /// Output format: json or csv (default: json).
    #[arg(short = 'f', long)]
    pub output_format: Option<String>,

    /// Directory for articles.json / articles.csv (default: current directory).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl BuildArgs {
    /// Apply command-line overrides on top of the loaded config.
    fn apply_to(&self, config: &mut AppConfig) {
        let defaults = &mut config.defaults;
        if let Some(lang) = &self.lang {
            defaults.lang = lang.clone();
        }
        if let Some(max_articles) = self.max_articles {
            defaults.max_articles = max_articles;
        }
        if let Some(min) = self.min_article_length {
            defaults.min_article_length = min;
        }
        if let Some(max) = self.max_article_length {
            defaults.max_article_length = max;
        }
        if let Some(format) = &self.output_format {
            defaults.output_format = format.clone();
        }
        if let Some(out) = &self.out {
            defaults.output_dir = out.to_string_lossy().into_owned();
        }
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = match cli.verbose {
        0 => "wikicorpus=info",
        1 => "wikicorpus=debug",
        _ => "wikicorpus=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| eyre!("cannot create log file '{}': {e}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    match cli.log_format {
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build(args) => cmd_build(&args).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

async fn cmd_build(args: &BuildArgs) -> Result<()> {
    let start = Instant::now();

    let mut config = load_config()?;
    args.apply_to(&mut config);
    let defaults = &config.defaults;

    // Fatal before any request goes out.
    let taxonomy = load_taxonomy(&args.path)?;

    let options = CorpusOptions::from(&config);
    let client = WikiClient::new(&defaults.lang, &config.api)?;

    info!(
        path = %args.path.display(),
        lang = %defaults.lang,
        endpoint = %client.endpoint(),
        max_articles = options.max_articles,
        "building corpus"
    );

    let reporter = CliProgress::new();
    let result = build_corpus(&client, &taxonomy, &options, &reporter).await?;

    info!(
        minutes = start.elapsed().as_secs() / 60,
        "successfully generated lists of the articles"
    );

    let out_dir = PathBuf::from(&defaults.output_dir);
    let saved = save_corpus(&result.corpus, &defaults.output_format, &out_dir)?;

    info!(
        minutes = %format!("{:.2}", start.elapsed().as_secs_f64() / 60.0),
        "total runtime"
    );

    println!();
    println!("  Corpus built!");
    println!("  Categories: {}", result.categories_processed);
    println!("  Articles:   {}", result.corpus.len());
    println!("  Skipped:    {}", result.members_skipped);
    println!("  Rejected:   {}", result.pages_rejected);
    match saved {
        Some(path) => println!("  Output:     {}", path.display()),
        None => println!("  Output:     (not saved)"),
    }
    println!("  Time:       {:.1}s", start.elapsed().as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn category_started(&self, name: &str, index: usize, total: usize) {
        self.spinner
            .set_message(format!("Category [{}/{total}] {name}", index + 1));
    }

    fn article_accepted(&self, title: &str, accepted: usize, quota: usize) {
        self.spinner
            .set_message(format!("Iterating over articles [{accepted}/{quota}] {title}"));
    }

    fn category_done(&self, name: &str, processed: usize, total: usize) {
        self.spinner
            .println(format!("  {processed} of {total} categories loaded ({name})"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
