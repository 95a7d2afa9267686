pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{MapEvent, UiEvent};
pub use handler::EventManager;
