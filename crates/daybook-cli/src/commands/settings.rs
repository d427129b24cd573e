use anyhow::Result;
use daybook_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::cli::SettingsCommand;

pub fn settings_command(repo: &impl Repository, command: SettingsCommand) -> Result<()> {
    let mut settings = repo.dev_settings()?;
    let changed = command.launch_to_last_section.is_some() || command.dev_mode.is_some();

    if let Some(launch) = command.launch_to_last_section {
        settings.launch_to_last_section = launch;
    }
    if let Some(dev_mode) = command.dev_mode {
        settings.dev_mode_enabled = dev_mode;
    }
    if changed {
        repo.save_dev_settings(&settings)?;
        println!("{} Settings saved.", "✓".green());
    }

    println!("dev_mode: {}", settings.dev_mode_enabled);
    println!("launch_to_last_section: {}", settings.launch_to_last_section);
    Ok(())
}
