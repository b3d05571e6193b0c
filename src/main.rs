use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use actual_tools::cli::{
    dispatch, handle_config_command, ExportArgs, NotesCommands, Request, SplitArgs,
    TransactionArgs,
};
use actual_tools::config::paths::CONFIG_DIR_ENV;
use actual_tools::config::{ActualPaths, Credentials, SessionConfig};
use actual_tools::session::{BudgetSession, LocalSession};
use actual_tools::ActualError;

#[derive(Parser)]
#[command(
    name = "actual-tools",
    version,
    about = "Bulk maintenance for Actual budget transactions",
    long_about = "actual-tools resolves an account in an Actual budget, selects its \
                  transactions in a date window, and rewrites their notes, splits a \
                  single transaction, or exports the budget."
)]
struct Cli {
    /// Directory holding credentials.json and the budget cache
    #[arg(long, global = true, env = CONFIG_DIR_ENV, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accounts with their balances
    Accounts,

    /// Show an account's transactions in a date window
    Transactions(TransactionArgs),

    /// Rewrite transaction notes
    #[command(subcommand)]
    Notes(NotesCommands),

    /// Split one transaction into two children
    Split(SplitArgs),

    /// Export the budget as JSON or CSV
    Export(ExportArgs),

    /// Show resolved paths and the session target
    Config,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ActualError>() {
                Some(actual) => {
                    for line in actual.report_lines() {
                        eprintln!("{}", line);
                    }
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match cli.config_dir {
        Some(dir) => ActualPaths::with_base_dir(dir),
        None => ActualPaths::new()?,
    };

    let today = chrono::Local::now().date_naive();
    let request = match cli.command {
        Commands::Config => {
            handle_config_command(&paths);
            return Ok(());
        }
        Commands::Accounts => Request::Accounts,
        Commands::Transactions(args) => Request::Transactions(args.validate(today)?),
        Commands::Notes(cmd) => Request::Notes(cmd.validate(today)?),
        Commands::Split(args) => Request::Split(args.validate(today)?),
        Commands::Export(args) => Request::Export(args),
    };

    let credentials = Credentials::load(&paths.credentials_file())?;
    paths.ensure_cache_dir()?;
    let config = SessionConfig::new(&paths, &credentials);
    log::debug!("{:?}", config);

    let mut session = LocalSession::new();
    session.init_session(&config)?;

    let result = session
        .download_budget(&config.sync_id, config.encryption_password())
        .and_then(|()| dispatch(&mut session, &request));
    let closed = session.close_session();

    result?;
    closed?;
    Ok(())
}
