use clap::Parser;
use daybook_core::error::CoreError;
use daybook_core::repository::StoreRepository;
use daybook_core::store::FileStore;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

fn main() {
    // Logs go to stderr; stdout carries tables and exports.
    // RUST_LOG=daybook_core=debug traces expansion and reorders.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("daybook=warn,daybook_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            config::Config::default()
        }
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "opening data directory");
    let repository = StoreRepository::new(FileStore::open(&config.data_dir));

    let Some(command) = cli.command else {
        let result = commands::launch::open_start_page(&repository, &config);
        exit_on_error(result);
        return;
    };

    let result = match command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, &config),
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command),
        cli::Commands::Delete(command) => commands::delete::delete_task(&repository, command),
        cli::Commands::Done(command) => {
            commands::done::set_completion(&repository, command, true, &config)
        }
        cli::Commands::Undo(command) => {
            commands::done::set_completion(&repository, command, false, &config)
        }
        cli::Commands::Subtask(command) => {
            commands::subtask::subtask_command(&repository, command)
        }
        cli::Commands::List(command) => {
            commands::list::list_tasks(&repository, command, &config)
        }
        cli::Commands::Move(command) => {
            commands::r#move::move_task(&repository, command, &config)
        }
        cli::Commands::Calendar(command) => {
            commands::calendar::show_calendar(&repository, command)
        }
        cli::Commands::Export(command) => commands::export::export_data(&repository, command),
        cli::Commands::Import(command) => commands::import::import_data(&repository, command),
        cli::Commands::Settings(command) => {
            commands::settings::settings_command(&repository, command)
        }
    };

    exit_on_error(result);
}

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Not found: {}", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Io(e) => {
                eprintln!("{} Could not access the data directory: {}", "Error:".style(error_style), e);
            }
            CoreError::Serialization(e) => {
                eprintln!("{} Malformed data: {}", "Error:".style(error_style), e);
            }
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
