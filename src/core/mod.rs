//! Core game module - states, events, host interfaces and session flow.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod damping;
mod error;
mod events;
mod host;
mod plugin;
mod session;
mod states;

pub use config::*;
pub use damping::*;
pub use error::*;
pub use events::*;
pub use host::*;
pub use plugin::{gameplay_running, CorePlugin};
pub use session::GameSession;
pub use states::*;
