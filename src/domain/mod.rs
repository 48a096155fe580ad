//! Domain Layer - Search results and error types
//!
//! This module contains the data returned by a repository search and the
//! errors a search can fail with. It has no knowledge of HTTP or of the UI.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
