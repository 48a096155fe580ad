//! API clients for external code-hosting services

pub mod github;

pub use github::*;
