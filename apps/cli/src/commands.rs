//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use kbforge_core::pipeline::{BuildConfig, BuildResult, ProgressReporter, run_build};
use kbforge_lang::{HttpTranslator, TranslationGate, WhatlangDetector};
use kbforge_shared::{
    AppConfig, BuildOptions, init_config, load_config, load_config_from, translator_api_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// kbforge: turn documents and web pages into a knowledge snapshot.
#[derive(Parser)]
#[command(
    name = "kbforge",
    version,
    about = "Extract question/answer pairs and content blocks into a JSON knowledge snapshot.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

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
    /// Build the knowledge snapshot from documents and web pages.
    Build(BuildArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for the `build` command. Flags override config file values.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Directory scanned for input documents.
    #[arg(short, long)]
    pub input: Option<String>,

    /// Path of the JSON snapshot to write.
    #[arg(short, long)]
    pub out: Option<String>,

    /// Web page to fetch after the document directory (repeatable).
    #[arg(long = "url")]
    pub urls: Vec<String>,

    /// Extraction mode: qa or content.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Skip the translation gate.
    #[arg(long)]
    pub no_translate: bool,

    /// Keep duplicate records.
    #[arg(long)]
    pub no_dedup: bool,

    /// Skip glued-word repair in flowing text.
    #[arg(long)]
    pub no_fix_spacing: bool,

    /// Read h2/h3 elements from web pages in addition to p/li.
    #[arg(long)]
    pub include_headings: bool,

    /// Load config from this file instead of ~/.kbforge/kbforge.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,
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
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "kbforge=info",
        1 => "kbforge=debug",
        _ => "kbforge=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build(args) => cmd_build(args).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

async fn cmd_build(args: BuildArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let mut options = BuildOptions::from(&config);
    if let Some(input) = args.input {
        options.input_dir = PathBuf::from(input);
    }
    if let Some(out) = args.out {
        options.output_path = PathBuf::from(out);
    }
    options.urls.extend(args.urls);
    if let Some(mode) = args.mode {
        options.mode = mode;
    }
    if args.no_translate {
        options.translate = false;
    }
    if args.no_dedup {
        options.deduplicate = false;
    }
    if args.no_fix_spacing {
        options.fix_spacing = false;
    }
    if args.include_headings {
        options.include_headings = true;
    }

    let build_config = BuildConfig::from_options(&options, env!("CARGO_PKG_VERSION"))?;

    let api_key = translator_api_key(&config);
    let translator = HttpTranslator::new(&config.translator, api_key)?;
    let gate = TranslationGate::new(
        WhatlangDetector,
        translator,
        config.translator.source_lang.clone(),
    );

    info!(
        input = %build_config.input_dir.display(),
        urls = build_config.urls.len(),
        mode = ?build_config.mode,
        "building knowledge snapshot"
    );

    let reporter = CliProgress::new();
    let result = run_build(&build_config, &gate, &reporter).await?;

    // Print summary
    println!();
    println!("  Knowledge snapshot written!");
    println!(
        "  Records: {} ({} QA, {} content)",
        result.manifest.record_count, result.manifest.qa_count, result.manifest.content_count
    );
    println!("  Files:   {}", result.files_processed);
    println!("  Pages:   {}", result.pages_fetched);
    println!("  Output:  {}", result.output_path.display());
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    if !result.errors.is_empty() {
        println!("  Skipped: {}", result.errors.len());
        for (input, error) in &result.errors {
            println!("    {input}: {error}");
        }
    }
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
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_processed(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Reading [{current}/{total}] {name}"));
    }

    fn url_fetched(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {url}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

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
