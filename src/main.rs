mod commands;
mod config;
mod filter;
mod jira;
mod logging;
mod print;
mod spinner;
mod store;

use clap::{CommandFactory, Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;

use crate::commands::ListOptions;
use crate::store::{DefaultSetting, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "jira-activity")]
#[command(about = "Lists the JIRA issues you have worked on, grouped by day")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/jira-activity/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Loads your activity and lists the parent issues you have worked on grouped by day
  List {
    /// Jira hostname, e.g. jira.example.com
    #[arg(short = 'H', long)]
    hostname: Option<String>,

    /// Jira username
    #[arg(short, long)]
    username: Option<String>,

    /// Number of activity entries to request (default: 500)
    #[arg(short, long = "max")]
    max_results: Option<u32>,

    /// Only show activity of the current "week" or "month"
    #[arg(short, long)]
    filter: Option<String>,

    /// Log requests and cache decisions to stderr
    #[arg(short, long)]
    verbose: bool,
  },
  /// Saves the default hostname (e.g. jira.example.com)
  Hostname { value: Option<String> },
  /// Saves the default username (e.g. jane.doe@example.com)
  Username { value: Option<String> },
  /// Shows your current default settings
  Defaults,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let Some(command) = args.command else {
    Args::command().print_help()?;
    return Ok(());
  };

  let verbose = matches!(command, Command::List { verbose: true, .. });
  let _log_guard = logging::init(verbose);

  // Load configuration and open the store once for the whole run
  let config = config::Config::load(args.config.as_deref())?;
  let store = SqliteStore::open(&config.store_path()?)?;

  match command {
    Command::List {
      hostname,
      username,
      max_results,
      filter,
      verbose,
    } => {
      let options = ListOptions {
        hostname,
        username,
        max_results,
        filter,
        verbose,
      };
      commands::list(options, &config, &store).await
    }
    Command::Hostname { value } => commands::set_default(&store, DefaultSetting::Hostname, value),
    Command::Username { value } => commands::set_default(&store, DefaultSetting::Username, value),
    Command::Defaults => commands::show_defaults(&store),
  }
}
