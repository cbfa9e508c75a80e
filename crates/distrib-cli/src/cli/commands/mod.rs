//! CLI command handlers.

mod console;
mod list;
mod run;

pub use list::run_list;
pub use run::run_distributions;
