//! Prelude module for common maproute types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maproute::prelude::*;`

pub use crate::core::{
    config::{
        AppConfig, MapViewConfig, RouteConfig, SimulationConfig, TileSourceConfig, TimingConfig,
    },
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapId},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    manager::LayerManager,
    marker::Marker,
    tile::TileLayer,
    vector::{Circle, CircleStyle, Color, LineStyle, Polyline},
};

pub use crate::input::events::{MapEvent, UiEvent};

pub use crate::page::{
    controller::{AppState, Controller, Effect, Modal},
    options::RouteOption,
    planner::{LocationResolver, Route, RoutePlan, SimulatedResolver, ValidationError},
    registry::{PageId, ViewRegistry},
    scheduler::{Scheduler, TaskKey},
    traffic::{Intensity, TrafficPoint},
    widgets::{RatingWidget, StarIcon, TravelMode},
};

pub use crate::rendering::context::{DrawCommand, RenderContext};

pub use crate::traits::Lerp;

pub use crate::{Error, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
