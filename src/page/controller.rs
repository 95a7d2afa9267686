use crate::{
    core::{
        config::AppConfig,
        map::{Map, MapId},
    },
    input::events::UiEvent,
    page::{
        options::{option_route, RouteOptions},
        planner::{ActiveRoute, LocationResolver, Route, RoutePlan, RoutePlanner},
        registry::{PageId, ViewRegistry},
        scheduler::{Scheduler, TaskKey},
        surface::MapSurface,
        widgets::{RatingWidget, TravelMode, TravelModeButtons},
    },
    rendering::context::RenderContext,
    Error, Result,
};
use instant::Instant;
use serde::{Deserialize, Serialize};

/// Modal dialogs the shell knows how to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modal {
    Feedback,
}

/// Something the shell has to do after an event or tick
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Blocking message for the user
    Notice(String),
    ShowModal(Modal),
    /// A map recomputed its size and should be redrawn
    LayoutInvalidated(MapId),
}

/// Everything the page shows
pub struct AppState {
    pub registry: ViewRegistry,
    pub surface: MapSurface,
    pub active_route: ActiveRoute,
    pub options: RouteOptions,
    pub travel_modes: TravelModeButtons,
    pub rating: RatingWidget,
    pub modal: Option<Modal>,
    pub last_plan: Option<RoutePlan>,
}

impl AppState {
    fn new(config: &AppConfig) -> Result<Self> {
        let mut surface = MapSurface::new();
        surface.init_primary(config)?;
        surface.init_secondary(config)?;

        Ok(Self {
            registry: ViewRegistry::new(&PageId::ALL),
            surface,
            active_route: ActiveRoute::default(),
            options: RouteOptions::default(),
            travel_modes: TravelModeButtons::default(),
            rating: RatingWidget::new(),
            modal: None,
            last_plan: None,
        })
    }

    pub fn visible_page(&self) -> Option<PageId> {
        self.registry.visible_page()
    }
}

/// Owns the page state and applies user events to it.
///
/// Time never advances on its own: callers pass `now` into
/// [`dispatch`](Controller::dispatch) and [`tick`](Controller::tick), and
/// deferred work fires only from `tick`.
pub struct Controller {
    config: AppConfig,
    state: AppState,
    planner: RoutePlanner,
    scheduler: Scheduler,
}

impl Controller {
    /// Builds the page with the simulated resolver
    pub fn new(config: AppConfig) -> Result<Self> {
        let planner = RoutePlanner::new(&config);
        Self::with_planner(config, planner)
    }

    pub fn with_resolver(config: AppConfig, resolver: Box<dyn LocationResolver>) -> Result<Self> {
        let planner = RoutePlanner::with_resolver(&config, resolver);
        Self::with_planner(config, planner)
    }

    fn with_planner(config: AppConfig, planner: RoutePlanner) -> Result<Self> {
        config.validate()?;
        let state = AppState::new(&config)?;
        log::info!(
            "page ready (traffic panel: {})",
            state.surface.traffic().is_some()
        );
        Ok(Self {
            config,
            state,
            planner,
            scheduler: Scheduler::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// When the next deferred task is due, for repaint scheduling
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    pub fn map(&self, id: MapId) -> Option<&Map> {
        self.state.surface.map(id)
    }

    /// Mutable map access for direct pan and zoom from the shell
    pub fn map_mut(&mut self, id: MapId) -> Option<&mut Map> {
        self.state.surface.map_mut(id)
    }

    /// Applies one user event.
    ///
    /// Rejected searches become a single [`Effect::Notice`]; unknown travel
    /// modes are logged and ignored.
    pub fn dispatch(&mut self, event: UiEvent, now: Instant) -> Vec<Effect> {
        log::debug!("dispatch {event:?}");
        let outcome = match event {
            UiEvent::Navigate(page) => {
                self.show_page(page, now);
                Ok(())
            }
            UiEvent::FindRoute { start, destination } => {
                self.find_route(&start, &destination, now).map(|_| ())
            }
            UiEvent::SelectRouteOption(ordinal) => self.select_route_option(ordinal).map(|_| ()),
            UiEvent::SetTravelMode(name) => self.set_travel_mode(&name).map(|_| ()),
            UiEvent::Rate(rating) => {
                self.set_rating(rating);
                Ok(())
            }
            UiEvent::DismissModal => {
                self.state.modal = None;
                Ok(())
            }
        };

        match outcome {
            Ok(()) => Vec::new(),
            Err(Error::Validation(err)) => vec![Effect::Notice(err.to_string())],
            Err(Error::UnknownTravelMode(name)) => {
                log::warn!("ignoring unknown travel mode '{name}'");
                Vec::new()
            }
            Err(err) => {
                log::error!("event failed: {err}");
                Vec::new()
            }
        }
    }

    /// Switches pages; showing the traffic page arms the traffic map's
    /// layout fix-up when that map exists
    pub fn show_page(&mut self, page: PageId, now: Instant) -> bool {
        let switched = self.state.registry.show_page(page);
        if page == PageId::Traffic && self.state.surface.traffic().is_some() {
            self.scheduler.schedule(
                TaskKey::TrafficLayoutFix,
                now,
                self.config.timing.layout_fix_delay(),
            );
        }
        switched
    }

    /// Runs a search on the primary map and arms the feedback prompt
    pub fn find_route(
        &mut self,
        start: &str,
        destination: &str,
        now: Instant,
    ) -> Result<RoutePlan> {
        let map = self
            .state
            .surface
            .map_mut(MapId::Primary)
            .ok_or_else(|| Error::Layer("primary map missing".to_string()))?;
        let plan = self
            .planner
            .find_route(map, &mut self.state.active_route, start, destination)?;

        self.scheduler.schedule(
            TaskKey::FeedbackPrompt,
            now,
            self.config.timing.feedback_delay(),
        );
        self.state.last_plan = Some(plan.clone());
        Ok(plan)
    }

    /// Draws the preset route at `ordinal` and selects its card
    pub fn select_route_option(&mut self, ordinal: usize) -> Result<Route> {
        let map = self
            .state
            .surface
            .map_mut(MapId::Primary)
            .ok_or_else(|| Error::Layer("primary map missing".to_string()))?;
        let route = option_route(ordinal, &self.config.route);
        self.state
            .active_route
            .show(map, &route, self.config.route.fit_padding)?;

        if !self.state.options.select(ordinal) {
            log::warn!("route option {ordinal} has no card");
        }
        Ok(route)
    }

    /// Parses `name` and updates the mode buttons and option cards; an
    /// unknown name changes nothing
    pub fn set_travel_mode(&mut self, name: &str) -> Result<TravelMode> {
        let mode: TravelMode = name.parse()?;
        self.state.travel_modes.activate(mode);
        self.state.options.apply_travel_mode(mode);
        Ok(mode)
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.state.rating.set_rating(rating);
    }

    /// Fires every deferred task due at `now`
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        for key in self.scheduler.poll(now) {
            match key {
                TaskKey::FeedbackPrompt => {
                    self.state.modal = Some(Modal::Feedback);
                    effects.push(Effect::ShowModal(Modal::Feedback));
                }
                TaskKey::TrafficLayoutFix => {
                    if let Some(map) = self.state.surface.map_mut(MapId::Traffic) {
                        map.invalidate_size(None);
                        effects.push(Effect::LayoutInvalidated(MapId::Traffic));
                    }
                }
            }
        }

        for id in [MapId::Primary, MapId::Traffic] {
            if let Some(map) = self.state.surface.map_mut(id) {
                for event in map.process_events() {
                    log::trace!("{id}: {}", event.kind());
                }
            }
        }
        effects
    }

    /// Queues one frame of `id` into `context`; `false` if that map does not
    /// exist
    pub fn render(&mut self, id: MapId, context: &mut RenderContext) -> Result<bool> {
        match self.state.surface.map_mut(id) {
            Some(map) => {
                map.render(context)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::LayerType;
    use std::time::Duration;

    fn controller() -> Controller {
        let mut config = AppConfig::default();
        config.simulation.seed = Some(1);
        Controller::new(config).unwrap()
    }

    #[test]
    fn test_new_controller_shows_home() {
        let controller = controller();
        assert_eq!(controller.state().visible_page(), Some(PageId::RoutePlanner));
        assert!(controller.map(MapId::Primary).is_some());
        assert!(controller.map(MapId::Traffic).is_some());
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.primary.center.lat = 123.0;
        assert!(matches!(
            Controller::new(config),
            Err(Error::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_missing_input_gives_one_notice() {
        let mut controller = controller();
        let effects = controller.dispatch(
            UiEvent::FindRoute {
                start: "Home".to_string(),
                destination: String::new(),
            },
            Instant::now(),
        );
        assert_eq!(
            effects,
            vec![Effect::Notice(
                "Please enter both starting point and destination".to_string()
            )]
        );
        assert!(!controller.scheduler().is_pending(TaskKey::FeedbackPrompt));
    }

    #[test]
    fn test_feedback_prompt_after_search() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(
            UiEvent::FindRoute {
                start: "Home".to_string(),
                destination: "Work".to_string(),
            },
            t0,
        );
        assert!(controller.tick(t0 + Duration::from_secs(5)).is_empty());
        assert_eq!(
            controller.tick(t0 + Duration::from_secs(10)),
            vec![Effect::ShowModal(Modal::Feedback)]
        );
        assert_eq!(controller.state().modal, Some(Modal::Feedback));

        controller.dispatch(UiEvent::DismissModal, t0 + Duration::from_secs(11));
        assert_eq!(controller.state().modal, None);
    }

    #[test]
    fn test_traffic_page_fixes_layout() {
        let mut controller = controller();
        let t0 = Instant::now();
        controller.dispatch(UiEvent::Navigate(PageId::Traffic), t0);
        assert_eq!(controller.state().visible_page(), Some(PageId::Traffic));

        assert!(controller.tick(t0 + Duration::from_millis(50)).is_empty());
        assert_eq!(
            controller.tick(t0 + Duration::from_millis(100)),
            vec![Effect::LayoutInvalidated(MapId::Traffic)]
        );
        assert_eq!(
            controller.map(MapId::Traffic).map(|m| m.size_invalidations()),
            Some(1)
        );
    }

    #[test]
    fn test_no_traffic_panel_means_no_fix_up() {
        let config = AppConfig {
            traffic_panel: false,
            ..Default::default()
        };
        let mut controller = Controller::new(config).unwrap();
        let t0 = Instant::now();
        controller.dispatch(UiEvent::Navigate(PageId::Traffic), t0);
        assert!(controller.tick(t0 + Duration::from_secs(1)).is_empty());
        assert!(controller.map(MapId::Traffic).is_none());
    }

    #[test]
    fn test_unknown_travel_mode_is_ignored() {
        let mut controller = controller();
        controller.dispatch(UiEvent::SetTravelMode("transit".to_string()), Instant::now());
        let effects =
            controller.dispatch(UiEvent::SetTravelMode("hovercraft".to_string()), Instant::now());
        assert!(effects.is_empty());
        assert_eq!(controller.state().travel_modes.active(), TravelMode::Transit);
        assert_eq!(controller.state().options.cards()[0].time_text, "35 min");
    }

    #[test]
    fn test_select_option_replaces_search_route() {
        let mut controller = controller();
        let now = Instant::now();
        controller.find_route("Home", "Work", now).unwrap();
        controller.select_route_option(2).unwrap();

        let map = controller.map(MapId::Primary).unwrap();
        assert_eq!(map.count_layers_of_type(LayerType::Polyline), 1);
        assert_eq!(map.count_layers_of_type(LayerType::Marker), 2);
        assert_eq!(controller.state().options.selected().map(|o| o.ordinal), Some(2));
    }

    #[test]
    fn test_render_missing_map() {
        let config = AppConfig {
            traffic_panel: false,
            ..Default::default()
        };
        let mut controller = Controller::new(config).unwrap();
        let mut ctx = RenderContext::new(800, 600);
        assert!(!controller.render(MapId::Traffic, &mut ctx).unwrap());
        assert!(controller.render(MapId::Primary, &mut ctx).unwrap());
        assert_eq!(ctx.count_circles(), 5);
    }
}
