//! Page-wide constants taken from the planner page defaults.
//! Keeping them in a single place makes it easier to tweak the magic numbers;
//! `AppConfig::default()` is built from these.

use std::time::Duration;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Shared center of both maps and base of the simulated coordinates (New York).
pub const DEFAULT_CENTER: (f64, f64) = (40.7128, -74.0060);

/// Zoom of the primary (planner) map.
pub const PRIMARY_ZOOM: f64 = 13.0;

/// Zoom of the secondary (traffic) map.
pub const TRAFFIC_ZOOM: f64 = 12.0;

/// OpenStreetMap tile template understood by `TileLayer`.
pub const OSM_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution shown under every OSM-backed map.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Route polyline color and stroke weight.
pub const ROUTE_COLOR: &str = "#0d6efd";
pub const ROUTE_WEIGHT: f32 = 5.0;

/// Padding in pixels kept around a route when fitting the viewport.
pub const FIT_PADDING: f64 = 50.0;

/// Interpolation parameters of the five route points.
pub const ROUTE_STEPS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Colors of the three preset route options, by ordinal.
pub const OPTION_PALETTE: [&str; 3] = ["#0d6efd", "#20c997", "#6c757d"];

/// Fixed endpoints of the preset route options.
pub const OPTION_START: (f64, f64) = (40.7128, -74.0060);
pub const OPTION_END: (f64, f64) = (40.7228, -73.9860);

/// Lateral shift per ordinal step applied to intermediate option points.
pub const OPTION_LATERAL_STEP: f64 = 0.005;

/// Upper bound (exclusive) of the simulated jitter, in degrees per axis.
pub const START_JITTER: f64 = 0.01;
pub const DESTINATION_JITTER: f64 = 0.02;

/// Traffic circle look.
pub const TRAFFIC_RADIUS_METERS: f64 = 300.0;
pub const TRAFFIC_FILL_OPACITY: f32 = 0.5;

/// Delay before the feedback prompt follows a route search.
pub const FEEDBACK_DELAY: Duration = Duration::from_secs(10);

/// Delay before the traffic map recomputes its size after becoming visible.
pub const LAYOUT_FIX_DELAY: Duration = Duration::from_millis(100);

/// Message shown when a route request is missing an endpoint.
pub const MISSING_ENDPOINTS_NOTICE: &str = "Please enter both starting point and destination";
