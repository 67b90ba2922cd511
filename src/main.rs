use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use chartcli::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Build a playlist from a month's Hot 100 chart
    Build(BuildOptions),

    /// Print a month's Hot 100 chart
    Chart(ChartOptions),

    /// Handle cached chart pages
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildOptions {
    /// Chart month (YYYY-MM); asked for interactively when omitted
    #[clap(long)]
    pub month: Option<String>,

    /// Abort when a chart entry has no match on Spotify instead of skipping it
    #[clap(long)]
    pub strict: bool,

    /// Download the chart page again even if it is cached
    #[clap(long)]
    pub refresh: bool,

    /// Pair artists by the legacy fixed node stride instead of per chart row
    #[clap(long)]
    pub legacy_stride: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ChartOptions {
    /// Chart month (YYYY-MM); asked for interactively when omitted
    #[clap(long)]
    pub month: Option<String>,

    /// Download the chart page again even if it is cached
    #[clap(long)]
    pub refresh: bool,

    /// Pair artists by the legacy fixed node stride instead of per chart row
    #[clap(long)]
    pub legacy_stride: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// List cached chart pages
    List,

    /// Remove cached chart pages
    Clear(CacheClearOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CacheClearOpts {
    /// Only remove the page for this month (YYYY-MM)
    #[clap(long)]
    pub month: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Build(opt) => {
            cli::build(opt.month, opt.strict, opt.refresh, opt.legacy_stride).await
        }
        Command::Chart(opt) => cli::chart(opt.month, opt.refresh, opt.legacy_stride).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::List => cli::list_cache().await,
            CacheSubcommand::Clear(c) => cli::clear_cache(c.month).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
