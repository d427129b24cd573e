use anyhow::{Context, Result};
use daybook_core::backup;
use daybook_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::ImportCommand;

pub fn import_data(repo: &impl Repository, command: ImportCommand) -> Result<()> {
    let json = std::fs::read_to_string(&command.file)
        .with_context(|| format!("Failed to read backup '{}'", command.file.display()))?;

    let existing = repo.load_tasks()?.len();
    if existing > 0 && !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Replace your {} existing task(s) with the backup?",
                existing
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Import cancelled.");
            return Ok(());
        }
    }

    let imported = backup::import(repo, &json)?;
    println!("Imported {} task(s).", imported);
    Ok(())
}
