//! # maproute
//!
//! A headless model of a route-planner page built on a small Leaflet-style
//! map engine.
//!
//! The `core` and `layers` modules are the map engine: viewports, layers and
//! a render command queue. The `page` module is the planner page itself:
//! page navigation, the simulated route planner, route options, travel-mode
//! and rating widgets, all driven through a single [`page::Controller`].

pub mod core;
pub mod input;
pub mod layers;
pub mod page;
pub mod prelude;
pub mod rendering;
pub mod traits;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    config::AppConfig,
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use layers::{
    base::LayerTrait,
    marker::Marker,
    tile::TileLayer,
    vector::{Circle, Color, Polyline},
};

pub use input::events::{MapEvent, UiEvent};

pub use page::{Controller, Effect, ValidationError};

pub use rendering::context::{DrawCommand, RenderContext};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Unknown travel mode: {0}")]
    UnknownTravelMode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error type alias for convenience
pub type Error = MapError;
