//! Presentation Layer - Observable search state
//!
//! This module contains the search view-model, the state it publishes and the
//! schedulers it runs on.

pub mod live_state;
pub mod schedulers;
pub mod screen_state;
pub mod view_model;


pub use live_state::*;
pub use schedulers::*;
pub use screen_state::*;
pub use view_model::*;
