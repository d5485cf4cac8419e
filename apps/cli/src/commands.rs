//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use researchprofile_core::{
    ExpertiseTagger, HostedSummaryModel, ProfileFields, ProfilePipeline, ProfileRun,
    ProgressReporter, Summarizer, SummaryParams,
};
use researchprofile_roster::Roster;
use researchprofile_shared::{AppConfig, init_config, load_config, summarizer_api_key};
use researchprofile_sources::AbstractExtractor;

use crate::session;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ResearchProfile: summarize papers and tag faculty expertise.
#[derive(Parser)]
#[command(
    name = "researchprofile",
    version,
    about = "Build research profiles from a faculty roster: abstract, summary, expertise.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `search` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
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
    /// Pick an author, department, and paper from the roster, then profile it.
    Search {
        /// Roster workbook or CSV (overrides `[roster] path` in the config).
        #[arg(short, long)]
        roster: Option<PathBuf>,

        /// Author name to search for; prompted when omitted.
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Profile a single paper link without a roster.
    Profile {
        /// Landing page or direct `.pdf` link.
        url: String,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Print the run as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
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

/// Initialize tracing based on CLI flags. Logs go to stderr so they never
/// interleave with the profile printed on stdout.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "researchprofile=info",
        1 => "researchprofile=debug",
        _ => "researchprofile=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Search {
        roster: None,
        author: None,
    }) {
        Command::Search { roster, author } => cmd_search(roster, author).await,
        Command::Profile {
            url,
            author,
            department,
            title,
            json,
        } => {
            let fields = ProfileFields {
                author_name: author.as_deref(),
                doi: Some(&url),
                department: department.as_deref(),
                title_of_paper: title.as_deref(),
            };
            cmd_profile(&url, fields, json).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Build the summarization model once for the whole process.
fn build_model(config: &AppConfig) -> Result<HostedSummaryModel> {
    let api_key = summarizer_api_key(config);
    if api_key.is_none() {
        info!(
            env = %config.summarizer.api_key_env,
            "no API key set, calling model endpoint anonymously"
        );
    }
    Ok(HostedSummaryModel::new(&config.summarizer, api_key)?)
}

fn build_pipeline<'m>(
    config: &AppConfig,
    model: &'m HostedSummaryModel,
) -> Result<ProfilePipeline<'m, HostedSummaryModel>> {
    Ok(ProfilePipeline::new(
        AbstractExtractor::new(&config.fetch)?,
        Summarizer::new(model, SummaryParams::from_config(&config.summarizer)),
        ExpertiseTagger::from_config(&config.tagging),
    ))
}

async fn cmd_search(roster: Option<PathBuf>, author: Option<String>) -> Result<()> {
    let config = load_config()?;

    let roster_path = roster
        .or_else(|| config.roster.path.clone())
        .ok_or_else(|| eyre!("no roster file: pass --roster or set [roster] path in the config"))?;
    let roster = Roster::load(&roster_path)?;

    let author = match author {
        Some(name) => name,
        None => session::prompt_author()?,
    };

    let Some(record) = session::select_paper(&roster, author.trim())? else {
        return Ok(());
    };

    println!("\nFetching abstract for: {}", record.title);

    let model = build_model(&config)?;
    let pipeline = build_pipeline(&config, &model)?;

    let reporter = CliProgress::new();
    let run = pipeline.run(record, &reporter).await;

    print!("{}", session::render_run(&run));
    Ok(())
}

async fn cmd_profile(url: &str, fields: ProfileFields<'_>, json: bool) -> Result<()> {
    let config = load_config()?;
    let model = build_model(&config)?;
    let pipeline = build_pipeline(&config, &model)?;

    info!(url, "profiling paper");

    let reporter = CliProgress::new();
    let run = pipeline.run_link(url, fields, &reporter).await;

    if json {
        let output = serde_json::json!({
            "abstract": run.abstract_result,
            "summary": run.summary,
            "profile": run.profile,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", session::render_run(&run));
    }

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

    fn done(&self, _run: &ProfileRun) {
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
