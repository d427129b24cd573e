use anyhow::{Context, Result};
use daybook_core::backup;
use daybook_core::repository::Repository;

use crate::cli::ExportCommand;

pub fn export_data(repo: &impl Repository, command: ExportCommand) -> Result<()> {
    let json = backup::export(repo)?;
    match command.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write backup to '{}'", path.display()))?;
            eprintln!("Exported backup to '{}'", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
