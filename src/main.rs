use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use reposcout::app::App;
use reposcout::config::{self, Settings};
use reposcout::fetcher::RepoFetcher;
use reposcout::github::GitHubClient;
use reposcout::interactive::InteractiveSession;
use reposcout::ui;
use reposcout::view::{self, OutputFormat};

#[derive(Parser)]
#[command(name = "reposcout")]
#[command(about = "Look up a GitHub account's public repositories as you type")]
#[command(version)]
#[command(
    long_about = "Look up a GitHub account's public repositories as you type.\n\nInput is debounced: a lookup only goes out once the username has stopped changing for the configured delay."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (defaults to <config dir>/reposcout/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Quiet period before a lookup is sent, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Disable colored output and terminal hyperlinks
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive lookup: each line you enter replaces the username
    Watch,
    /// Look up one username and print the result
    Lookup {
        /// GitHub username
        username: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(&cli)?;
    let color = ui::colors_enabled(cli.no_color);
    let app = build_app(&settings)?;

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => InteractiveSession::new(app, color).run().await,
        Commands::Lookup { username, format } => lookup(app, &username, format, color).await,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("reposcout={level}").into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => config::load_settings_from_path(path),
        None => config::load_settings(),
    };

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            ui::show_error_with_help(
                &format!("{e:#}"),
                &[
                    "Check the JSON syntax of the settings file",
                    "Or pass --config with a different file",
                ],
            );
            return Err(e);
        }
    };

    let settings = settings.with_overrides(cli.api_url.clone(), cli.delay_ms);
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}

fn build_app(settings: &Settings) -> Result<App<GitHubClient>> {
    let client = GitHubClient::new(settings).context("Failed to set up the GitHub client")?;
    let fetcher = RepoFetcher::new(client, settings.debounce_delay());
    Ok(App::new(fetcher))
}

async fn lookup(
    mut app: App<GitHubClient>,
    username: &str,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    app.handle_input(username);
    let lines = app.settled_view().await;

    let rendered = match format {
        OutputFormat::Text => view::render_text(&lines, color),
        OutputFormat::Html => view::render_html(&lines),
        OutputFormat::Json => {
            let mut json = view::render_json(app.username(), &app.fetcher().state())?;
            json.push('\n');
            json
        }
    };

    print!("{rendered}");
    Ok(())
}
