use tracing::info;

use crate::app::AppContext;
use crate::cli::SettingsCommand;
use crate::errors::CliError;
use crate::output::{print_json, render_settings};
use crate::ui::{print, receipt, UiContext};

pub fn handle_settings(ctx: &AppContext<'_>, command: Option<&SettingsCommand>) -> anyhow::Result<()> {
    if ctx.cli().ephemeral {
        return Err(CliError::invalid_input(
            "Settings are stored in the journal file and are not available with --ephemeral",
        )
        .into());
    }

    match command {
        None => show(ctx, false),
        Some(SettingsCommand::Show { json }) => show(ctx, *json),
        Some(SettingsCommand::Set { key, value }) => {
            let store = ctx.open_store()?;
            let mut settings = store.load_settings()?;
            settings.set(key, value)?;
            store.save_settings(&settings)?;
            store.close()?;
            info!(key = %key, "setting changed");

            if !ctx.quiet() {
                let ui = UiContext::from_env(false, None);
                print(
                    &ui,
                    &receipt(&ui, "Setting saved", &[(key.as_str(), value.as_str())]),
                );
            }
            Ok(())
        }
    }
}

fn show(ctx: &AppContext<'_>, json: bool) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let settings = store.load_settings()?;
    let ui = UiContext::from_env(json, None);
    if ui.mode.is_json() {
        print_json(&settings)
    } else {
        print(&ui, &render_settings(&ui, &settings));
        Ok(())
    }
}
