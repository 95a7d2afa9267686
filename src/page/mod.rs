//! The route-planner page: every component the shell talks to.
//!
//! [`Controller`] owns the whole page state and is the only entry point;
//! the other modules are the pieces it is built from.

pub mod controller;
pub mod options;
pub mod planner;
pub mod registry;
pub mod scheduler;
pub mod surface;
pub mod traffic;
pub mod widgets;

pub use controller::{AppState, Controller, Effect, Modal};
pub use planner::ValidationError;
pub use registry::PageId;
