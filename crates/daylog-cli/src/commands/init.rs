use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::info;

use daylog_core::AgeSqliteStore;

use crate::cli::{Cli, InitArgs};
use crate::config::{
    default_journal_path, parse_timezone, resolve_config_path, write_config, DaylogConfig,
};
use crate::errors::CliError;
use crate::helpers::prompt_init_passphrase;
use crate::ui::{hint, print, receipt, UiContext};

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let interactive = !args.no_input && std::io::stdin().is_terminal();
    let ui = UiContext::from_env(false, None);

    let journal_path = match args.path.as_deref().or(cli.journal.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_journal_path()?,
    };
    let config_path = resolve_config_path()?;

    // Validate before touching the disk.
    let timezone = match args.timezone.as_deref() {
        Some(name) => Some(parse_timezone(name)?.to_string()),
        None => None,
    };

    if journal_path.exists() {
        return Err(CliError::invalid_input(format!(
            "A journal already exists at {}",
            journal_path.display()
        ))
        .into());
    }

    let write_config_file = if !config_path.exists() || args.force {
        true
    } else if interactive {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ))
            .default(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read answer: {}", e))?
    } else {
        false
    };

    let passphrase = prompt_init_passphrase(interactive)?;

    if let Some(parent) = journal_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
            })?;
        }
    }
    AgeSqliteStore::create(&journal_path, &passphrase)?;
    info!(path = %journal_path.display(), "journal initialized");

    if write_config_file {
        write_config(
            &config_path,
            &DaylogConfig::new(journal_path.clone(), timezone.clone()),
        )?;
    }

    if !cli.quiet {
        let journal_display = journal_path.display().to_string();
        let config_display = if write_config_file {
            config_path.display().to_string()
        } else {
            format!("{} (unchanged)", config_path.display())
        };
        let timezone_display = timezone.unwrap_or_else(|| "system".to_string());
        print(
            &ui,
            &receipt(
                &ui,
                "Journal created",
                &[
                    ("Journal", journal_display.as_str()),
                    ("Config", config_display.as_str()),
                    ("Timezone", timezone_display.as_str()),
                ],
            ),
        );
        print(&ui, &hint(&ui, "Add your first task with `daylog add task <CONTENT>`."));
    }
    Ok(())
}
