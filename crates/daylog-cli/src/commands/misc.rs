use clap::CommandFactory;
use clap_complete::{generate, Shell};

use daylog_core::inspiration;

use crate::app::AppContext;
use crate::cli::{Cli, InspireArgs};
use crate::errors::CliError;
use crate::output::{print_json, render_inspiration};
use crate::ui::{badge, print, Badge, UiContext};

/// Print the inspiration for a day. Needs no journal.
pub fn handle_inspire(ctx: &AppContext<'_>, args: &InspireArgs) -> anyhow::Result<()> {
    let clock = ctx.clock()?;
    let date = ctx.day(&args.day, &clock)?;
    let passage = inspiration::for_date(date);

    let ui = UiContext::from_env(args.json, None);
    if ui.mode.is_json() {
        print_json(passage)
    } else {
        print(&ui, &render_inspiration(&ui, passage));
        Ok(())
    }
}

pub fn handle_check(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let metadata = store.metadata()?;
    let ui = UiContext::from_env(false, None);

    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
                println!("- format version: {}", metadata.format_version);
                println!("- created: {}", metadata.created_at.to_rfc3339());
                println!("- last modified: {}", metadata.last_modified.to_rfc3339());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", badge(&ui, Badge::Err, "Integrity check failed"));
            eprintln!("Hint: Restore the journal from a backup before writing to it again.");
            Err(CliError::IntegrityFailed(err.to_string()).into())
        }
    }
}

pub fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "daylog", &mut std::io::stdout());
}
