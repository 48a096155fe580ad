//! GitHub search - repository search exposed as observable view-model state
//!
//! The crate follows a layered layout: the domain layer holds search results
//! and errors, the infrastructure layer talks to the GitHub API, and the
//! presentation layer turns searches into published screen state.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use config::Config;
pub use logging::init_tracing;
