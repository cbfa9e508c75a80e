pub mod config;
pub mod logging;

pub mod catalog;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod recipe;
pub mod retry;
pub mod run;
pub mod signature;
pub mod url_model;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, RecipeFailure, Step};
