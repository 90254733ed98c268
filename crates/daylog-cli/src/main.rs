//! Daylog CLI - A local, encrypted bullet journal
//!
//! Command-line front end for `daylog-core`: days, entries, carry-over and
//! task migration.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use daylog_core::VERSION;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use app::AppContext;
use cli::{Cli, Commands};
use constants::LOG_ENV;
use errors::exit_code_for;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Some(Commands::Init(args)) => commands::handle_init(cli, args),
        Some(Commands::View(args)) => commands::handle_view(&ctx, args).await,
        Some(Commands::Add(args)) => commands::handle_add(&ctx, args).await,
        Some(Commands::Done(args)) => commands::handle_done(&ctx, args).await,
        Some(Commands::Undo(args)) => commands::handle_undo(&ctx, args).await,
        Some(Commands::Edit(args)) => commands::handle_edit(&ctx, args).await,
        Some(Commands::Delete(args)) => commands::handle_delete(&ctx, args).await,
        Some(Commands::Migrate(args)) => commands::handle_migrate(&ctx, args).await,
        Some(Commands::Reflect(args)) => commands::handle_reflect(&ctx, args).await,
        Some(Commands::Settings { command }) => {
            commands::handle_settings(&ctx, command.as_ref())
        }
        Some(Commands::Inspire(args)) => commands::handle_inspire(&ctx, args),
        Some(Commands::Check) => commands::handle_check(&ctx),
        Some(Commands::Completions { shell }) => {
            commands::handle_completions(*shell);
            Ok(())
        }
        None => {
            println!("Daylog v{}", VERSION);
            println!();
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
