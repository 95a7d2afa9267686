//! Simulated route finding on the primary map.
//!
//! No geocoding happens here: [`SimulatedResolver`] places both endpoints at
//! a random offset from a fixed base, and the typed texts only label the
//! markers.

use crate::{
    core::{
        config::{AppConfig, RouteConfig, SimulationConfig},
        constants::{MISSING_ENDPOINTS_NOTICE, ROUTE_STEPS},
        geo::{LatLng, LatLngBounds},
        map::Map,
    },
    layers::{
        base::LayerType,
        marker::Marker,
        vector::{Color, LineStyle, Polyline},
    },
    traits::Lerp,
    Result,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Why a route request was rejected before touching the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", MISSING_ENDPOINTS_NOTICE)]
    MissingStart,
    #[error("{}", MISSING_ENDPOINTS_NOTICE)]
    MissingDestination,
}

/// A validated pair of endpoint texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub destination: String,
}

impl RouteRequest {
    /// Trims both texts; the start is checked first
    pub fn parse(start: &str, destination: &str) -> std::result::Result<Self, ValidationError> {
        let start = start.trim();
        let destination = destination.trim();
        if start.is_empty() {
            return Err(ValidationError::MissingStart);
        }
        if destination.is_empty() {
            return Err(ValidationError::MissingDestination);
        }
        Ok(Self {
            start: start.to_string(),
            destination: destination.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Destination,
}

impl Endpoint {
    pub fn label(&self, text: &str) -> String {
        match self {
            Endpoint::Start => format!("Start: {text}"),
            Endpoint::Destination => format!("Destination: {text}"),
        }
    }
}

/// Turns an endpoint text into a coordinate
pub trait LocationResolver {
    fn resolve(&mut self, text: &str, endpoint: Endpoint) -> LatLng;
}

/// Stand-in resolver: `base` plus a uniform offset in `[0, span)` per axis.
/// The text is ignored.
pub struct SimulatedResolver<R: Rng = StdRng> {
    base: LatLng,
    start_jitter: f64,
    destination_jitter: f64,
    rng: R,
}

impl SimulatedResolver<StdRng> {
    /// Seeds from `config.seed`, or from entropy when unset
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SimulatedResolver<R> {
    pub fn with_rng(config: &SimulationConfig, rng: R) -> Self {
        Self {
            base: config.base,
            start_jitter: config.start_jitter,
            destination_jitter: config.destination_jitter,
            rng,
        }
    }

    fn jitter(&mut self, span: f64) -> f64 {
        self.rng.gen::<f64>() * span
    }
}

impl<R: Rng> LocationResolver for SimulatedResolver<R> {
    fn resolve(&mut self, _text: &str, endpoint: Endpoint) -> LatLng {
        let span = match endpoint {
            Endpoint::Start => self.start_jitter,
            Endpoint::Destination => self.destination_jitter,
        };
        let (d_lat, d_lng) = (self.jitter(span), self.jitter(span));
        self.base.offset(d_lat, d_lng)
    }
}

/// A straight five-point path, shifted sideways in the middle when asked
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub points: Vec<LatLng>,
    pub color: Color,
    pub weight: f32,
}

impl Route {
    pub fn between(start: LatLng, end: LatLng, color: Color, weight: f32) -> Self {
        Self {
            points: ROUTE_STEPS.iter().map(|&t| start.lerp(&end, t)).collect(),
            color,
            weight,
        }
    }

    /// Shifts every intermediate point by `offset` degrees on both axes
    pub fn with_lateral_offset(mut self, offset: f64) -> Self {
        let last = self.points.len().saturating_sub(1);
        for point in self.points.iter_mut().take(last).skip(1) {
            *point = point.offset(offset, offset);
        }
        self
    }

    pub fn start(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.points)
    }
}

/// The one route polyline allowed on the primary map
#[derive(Debug, Default)]
pub struct ActiveRoute {
    layer_id: Option<String>,
}

impl ActiveRoute {
    pub fn layer_id(&self) -> Option<&str> {
        self.layer_id.as_deref()
    }

    /// Detaches the current route, if any
    pub fn clear(&mut self, map: &mut Map) -> bool {
        match self.layer_id.take() {
            Some(id) => map.remove_layer(&id),
            None => false,
        }
    }

    /// Replaces the current route with `route` and fits the view to it
    pub fn show(&mut self, map: &mut Map, route: &Route, fit_padding: f64) -> Result<()> {
        self.clear(map);

        let id = map.next_layer_id("route");
        let style = LineStyle {
            color: route.color,
            width: route.weight,
            opacity: 1.0,
        };
        map.add_layer(Box::new(Polyline::new(id.clone(), route.points.clone(), style)))?;
        self.layer_id = Some(id);

        if let Some(bounds) = route.bounds() {
            map.fit_bounds(&bounds, fit_padding);
        }
        Ok(())
    }
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub start: LatLng,
    pub destination: LatLng,
    pub start_label: String,
    pub destination_label: String,
    pub route: Route,
}

/// Finds (simulates) routes and draws them on the primary map
pub struct RoutePlanner {
    resolver: Box<dyn LocationResolver>,
    style: RouteConfig,
}

impl RoutePlanner {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_resolver(
            config,
            Box::new(SimulatedResolver::from_config(&config.simulation)),
        )
    }

    pub fn with_resolver(config: &AppConfig, resolver: Box<dyn LocationResolver>) -> Self {
        Self {
            resolver,
            style: config.route.clone(),
        }
    }

    /// Validates the texts, then clears the old route and every marker,
    /// places the two labelled endpoints and draws the new route.
    ///
    /// A validation failure leaves the map untouched.
    pub fn find_route(
        &mut self,
        map: &mut Map,
        active: &mut ActiveRoute,
        start_text: &str,
        destination_text: &str,
    ) -> Result<RoutePlan> {
        let request = RouteRequest::parse(start_text, destination_text)?;

        active.clear(map);
        let swept = map.remove_layers_of_type(LayerType::Marker);
        log::debug!("cleared {swept} markers before new search");

        let start = self.resolver.resolve(&request.start, Endpoint::Start);
        let destination = self
            .resolver
            .resolve(&request.destination, Endpoint::Destination);
        let start_label = Endpoint::Start.label(&request.start);
        let destination_label = Endpoint::Destination.label(&request.destination);

        for (position, label) in [(start, &start_label), (destination, &destination_label)] {
            let id = map.next_layer_id("marker");
            map.add_layer(Box::new(Marker::new(id, position).with_popup(label.clone())))?;
        }

        let route = Route::between(start, destination, self.style.color, self.style.weight);
        active.show(map, &route, self.style.fit_padding)?;

        log::info!("route '{}' -> '{}' drawn", request.start, request.destination);
        Ok(RoutePlan {
            start,
            destination,
            start_label,
            destination_label,
            route,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::map::MapId, Error};

    fn primary(config: &AppConfig) -> Map {
        Map::new(
            MapId::Primary,
            config.primary.center,
            config.primary.zoom,
            config.viewport_size,
        )
    }

    /// Resolves to fixed coordinates so geometry is predictable
    struct FixedResolver(LatLng, LatLng);

    impl LocationResolver for FixedResolver {
        fn resolve(&mut self, _text: &str, endpoint: Endpoint) -> LatLng {
            match endpoint {
                Endpoint::Start => self.0,
                Endpoint::Destination => self.1,
            }
        }
    }

    #[test]
    fn test_request_trims_and_checks_start_first() {
        assert_eq!(
            RouteRequest::parse("  ", ""),
            Err(ValidationError::MissingStart)
        );
        assert_eq!(
            RouteRequest::parse("Home", " \t"),
            Err(ValidationError::MissingDestination)
        );
        let request = RouteRequest::parse(" Home ", "Work").unwrap();
        assert_eq!(request.start, "Home");
        assert_eq!(
            ValidationError::MissingDestination.to_string(),
            "Please enter both starting point and destination"
        );
    }

    #[test]
    fn test_simulated_resolver_stays_in_jitter_box() {
        let config = SimulationConfig::default();
        let mut resolver = SimulatedResolver::with_rng(&config, StdRng::seed_from_u64(7));
        for _ in 0..100 {
            let start = resolver.resolve("a", Endpoint::Start);
            assert!(start.lat >= config.base.lat && start.lat < config.base.lat + 0.01);
            assert!(start.lng >= config.base.lng && start.lng < config.base.lng + 0.01);
            let dest = resolver.resolve("b", Endpoint::Destination);
            assert!(dest.lat >= config.base.lat && dest.lat < config.base.lat + 0.02);
            assert!(dest.lng >= config.base.lng && dest.lng < config.base.lng + 0.02);
        }
    }

    #[test]
    fn test_seeded_resolvers_agree() {
        let config = SimulationConfig {
            seed: Some(42),
            ..Default::default()
        };
        let mut a = SimulatedResolver::from_config(&config);
        let mut b = SimulatedResolver::from_config(&config);
        assert_eq!(
            a.resolve("x", Endpoint::Start),
            b.resolve("y", Endpoint::Start)
        );
    }

    #[test]
    fn test_route_interpolation() {
        let route = Route::between(
            LatLng::new(0.0, 0.0),
            LatLng::new(4.0, 8.0),
            Color::default(),
            5.0,
        );
        assert_eq!(route.points.len(), 5);
        assert_eq!(route.points[1], LatLng::new(1.0, 2.0));
        assert_eq!(route.points[2], LatLng::new(2.0, 4.0));

        let shifted = route.clone().with_lateral_offset(0.5);
        assert_eq!(shifted.start(), route.start());
        assert_eq!(shifted.end(), route.end());
        assert_eq!(shifted.points[2], LatLng::new(2.5, 4.5));
    }

    #[test]
    fn test_find_route_draws_markers_and_one_route() {
        let config = AppConfig::default();
        let mut map = primary(&config);
        let mut active = ActiveRoute::default();
        let start = LatLng::new(40.713, -74.005);
        let dest = LatLng::new(40.725, -73.99);
        let mut planner =
            RoutePlanner::with_resolver(&config, Box::new(FixedResolver(start, dest)));

        let plan = planner
            .find_route(&mut map, &mut active, "Home", "Work")
            .unwrap();
        assert_eq!(plan.route.start(), Some(start));
        assert_eq!(plan.route.end(), Some(dest));
        assert_eq!(plan.start_label, "Start: Home");
        assert_eq!(map.count_layers_of_type(LayerType::Marker), 2);
        assert_eq!(map.count_layers_of_type(LayerType::Polyline), 1);

        planner
            .find_route(&mut map, &mut active, "Home", "Gym")
            .unwrap();
        assert_eq!(map.count_layers_of_type(LayerType::Marker), 2);
        assert_eq!(map.count_layers_of_type(LayerType::Polyline), 1);
        assert!(active.layer_id().is_some_and(|id| map.has_layer(id)));
    }

    #[test]
    fn test_rejected_request_leaves_map_alone() {
        let config = AppConfig::default();
        let mut map = primary(&config);
        let mut active = ActiveRoute::default();
        let mut planner = RoutePlanner::new(&config);

        let err = planner
            .find_route(&mut map, &mut active, "Home", "   ")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingDestination)
        ));
        assert_eq!(map.layer_count(), 0);
        assert!(map.process_events().is_empty());
    }
}
