//! Tracepad Application
//!
//! Headless host for the canvas engine: loads configuration, replays
//! scripted host input and reports the resulting state.

mod app;
mod script;
mod shortcuts;

pub use app::{App, AppConfig, AppError, ElementSummary, Summary};
pub use script::{ElementRef, HostCommand, parse_script};
pub use shortcuts::{Shortcut, ShortcutRegistry};
