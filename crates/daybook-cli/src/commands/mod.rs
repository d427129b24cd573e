// Each command is its own submodule.

pub mod add;
pub mod calendar;
pub mod delete;
pub mod done;
pub mod edit;
pub mod export;
pub mod import;
pub mod launch;
pub mod list;
pub mod r#move;
pub mod settings;
pub mod subtask;
