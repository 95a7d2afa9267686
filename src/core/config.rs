//! Configuration for the planner page
//!
//! `AppConfig::default()` reproduces the stock page. A JSON document can
//! override any subset of fields; missing fields keep their defaults.

use crate::core::constants::*;
use crate::core::geo::{LatLng, Point};
use crate::layers::vector::Color;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Initial view of one map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapViewConfig {
    fn primary() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: PRIMARY_ZOOM,
        }
    }

    fn traffic() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: TRAFFIC_ZOOM,
        }
    }
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self::primary()
    }
}

/// Tile source shared by both maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSourceConfig {
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub attribution: String,
}

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            url_template: OSM_URL_TEMPLATE.to_string(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Route styling and the preset options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub color: Color,
    pub weight: f32,
    pub fit_padding: f64,
    pub option_palette: Vec<Color>,
    pub option_start: LatLng,
    pub option_end: LatLng,
    pub option_lateral_step: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            color: Color::from_hex(ROUTE_COLOR).unwrap_or_default(),
            weight: ROUTE_WEIGHT,
            fit_padding: FIT_PADDING,
            option_palette: OPTION_PALETTE
                .iter()
                .filter_map(|hex| Color::from_hex(hex).ok())
                .collect(),
            option_start: LatLng::new(OPTION_START.0, OPTION_START.1),
            option_end: LatLng::new(OPTION_END.0, OPTION_END.1),
            option_lateral_step: OPTION_LATERAL_STEP,
        }
    }
}

/// Parameters of the simulated location resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub base: LatLng,
    pub start_jitter: f64,
    pub destination_jitter: f64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            start_jitter: START_JITTER,
            destination_jitter: DESTINATION_JITTER,
            seed: None,
        }
    }
}

/// Delays of the deferred continuations, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub feedback_delay_ms: u64,
    pub layout_fix_delay_ms: u64,
}

impl TimingConfig {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn layout_fix_delay(&self) -> Duration {
        Duration::from_millis(self.layout_fix_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            feedback_delay_ms: FEEDBACK_DELAY.as_millis() as u64,
            layout_fix_delay_ms: LAYOUT_FIX_DELAY.as_millis() as u64,
        }
    }
}

/// Top-level page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub primary: MapViewConfig,
    pub traffic: MapViewConfig,
    /// Whether the page carries the traffic panel (and thus the secondary map)
    pub traffic_panel: bool,
    pub viewport_size: Point,
    pub tiles: TileSourceConfig,
    pub route: RouteConfig,
    pub simulation: SimulationConfig,
    pub timing: TimingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            primary: MapViewConfig::primary(),
            traffic: MapViewConfig::traffic(),
            traffic_panel: true,
            viewport_size: Point::new(800.0, 600.0),
            tiles: TileSourceConfig::default(),
            route: RouteConfig::default(),
            simulation: SimulationConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses a (possibly partial) JSON document and validates the result
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, view) in [("primary", &self.primary), ("traffic", &self.traffic)] {
            if !view.center.is_valid() {
                return Err(Error::InvalidCoordinates(format!(
                    "{name} center {:?}",
                    view.center
                )));
            }
        }
        if !self.simulation.base.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "simulation base {:?}",
                self.simulation.base
            )));
        }
        if self.viewport_size.x <= 0.0 || self.viewport_size.y <= 0.0 {
            return Err(Error::Config(format!(
                "viewport size must be positive, got {}x{}",
                self.viewport_size.x, self.viewport_size.y
            )));
        }
        if self.route.option_palette.is_empty() {
            return Err(Error::Config("route option palette is empty".to_string()));
        }
        if self.simulation.start_jitter < 0.0 || self.simulation.destination_jitter < 0.0 {
            return Err(Error::Config("jitter spans must be non-negative".to_string()));
        }
        if self.route.fit_padding < 0.0 {
            return Err(Error::Config(format!(
                "route fit padding must be non-negative, got {}",
                self.route.fit_padding
            )));
        }
        if self.route.weight <= 0.0 {
            return Err(Error::Config(format!(
                "route weight must be positive, got {}",
                self.route.weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_page() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.primary.zoom, 13.0);
        assert_eq!(config.traffic.zoom, 12.0);
        assert_eq!(config.route.option_palette.len(), 3);
        assert_eq!(config.route.color, Color::rgb(0x0d, 0x6e, 0xfd));
        assert_eq!(config.timing.feedback_delay(), Duration::from_secs(10));
        assert_eq!(config.timing.layout_fix_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_json_override() {
        let config = AppConfig::from_json_str(
            r##"{ "traffic_panel": false, "route": { "color": "#ff0000" }, "simulation": { "seed": 7 } }"##,
        )
        .unwrap();
        assert!(!config.traffic_panel);
        assert_eq!(config.route.color, Color::rgb(255, 0, 0));
        assert_eq!(config.route.weight, 5.0);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.primary.zoom, 13.0);
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = AppConfig::from_json_str(r#"{ "route": { "option_palette": [] } }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_bad_route_style() {
        for json in [
            r#"{ "route": { "fit_padding": -1.0 } }"#,
            r#"{ "route": { "weight": 0.0 } }"#,
            r#"{ "route": { "weight": -2.5 } }"#,
        ] {
            let err = AppConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{json} accepted");
        }
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = AppConfig::from_json_str(r#"{ "route": { "color": "blue" } }"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
