use maproute::{
    core::map::MapId,
    page::{
        planner::{Endpoint, LocationResolver, SimulatedResolver},
        registry::{PageId, ViewRegistry},
        scheduler::TaskKey,
        traffic::{render_overlay, SAMPLE_TRAFFIC},
        widgets::{StarIcon, TravelMode},
        Effect, Modal,
    },
    prelude::{LayerType, Marker, Polyline},
    AppConfig, Color, Controller, LatLng, UiEvent,
};
use instant::Instant;
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};
use std::{cell::RefCell, rc::Rc, time::Duration};

/// Simulated resolver that remembers what it handed out
struct Recording {
    inner: SimulatedResolver<StdRng>,
    seen: Rc<RefCell<Vec<LatLng>>>,
}

impl LocationResolver for Recording {
    fn resolve(&mut self, text: &str, endpoint: Endpoint) -> LatLng {
        let position = self.inner.resolve(text, endpoint);
        self.seen.borrow_mut().push(position);
        position
    }
}

fn seeded(seed: u64) -> (Controller, Rc<RefCell<Vec<LatLng>>>) {
    let config = AppConfig::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let resolver = Recording {
        inner: SimulatedResolver::with_rng(&config.simulation, StdRng::seed_from_u64(seed)),
        seen: Rc::clone(&seen),
    };
    let controller = Controller::with_resolver(config, Box::new(resolver)).unwrap();
    (controller, seen)
}

fn find(start: &str, destination: &str) -> UiEvent {
    UiEvent::FindRoute {
        start: start.to_string(),
        destination: destination.to_string(),
    }
}

fn route_polyline(controller: &Controller) -> &Polyline {
    let id = controller.state().active_route.layer_id().unwrap();
    controller
        .map(MapId::Primary)
        .unwrap()
        .get_layer_as::<Polyline>(id)
        .unwrap()
}

/// Asserts the primary view was refit around the active route
fn assert_view_fits_route(controller: &Controller) {
    let padding = controller.config().route.fit_padding;
    let points = route_polyline(controller).points().to_vec();
    let viewport = &controller.map(MapId::Primary).unwrap().viewport;

    assert!(
        viewport.center != LatLng::new(40.7128, -74.0060) || viewport.zoom != 13.0,
        "view was not refit"
    );
    let visible = viewport.bounds();
    for point in &points {
        assert!(visible.contains(point), "{point:?} outside {visible:?}");
        let pixel = viewport.lat_lng_to_pixel(point);
        // one pixel of slack for the floored pixel origin
        assert!(pixel.x >= padding - 1.5 && pixel.x <= viewport.size.x - padding + 1.5);
        assert!(pixel.y >= padding - 1.5 && pixel.y <= viewport.size.y - padding + 1.5);
    }
}

#[test]
fn unknown_page_keeps_previous_page_visible() {
    let mut registry = ViewRegistry::new(&[PageId::RoutePlanner, PageId::About]);
    registry.show_page(PageId::About);

    assert!(!registry.show_page(PageId::Traffic));
    assert_eq!(registry.visible_page(), Some(PageId::About));
    assert_eq!(registry.active_links().count(), 0);
    assert_eq!(registry.pages().iter().filter(|p| p.visible).count(), 1);
}

#[test]
fn navigation_marks_the_matching_link() {
    let (mut controller, _) = seeded(1);
    controller.dispatch(UiEvent::Navigate(PageId::About), Instant::now());

    let state = controller.state();
    assert_eq!(state.visible_page(), Some(PageId::About));
    let active: Vec<_> = state.registry.active_links().map(|l| l.target).collect();
    assert_eq!(active, vec![PageId::About]);
}

#[test]
fn search_draws_five_point_route_between_resolved_endpoints() {
    let (mut controller, seen) = seeded(11);
    let effects = controller.dispatch(find("Home", "Office"), Instant::now());
    assert!(effects.is_empty());

    let resolved = seen.borrow().clone();
    assert_eq!(resolved.len(), 2);

    let route = route_polyline(&controller);
    assert_eq!(route.points().len(), 5);
    assert_eq!(route.points().first(), Some(&resolved[0]));
    assert_eq!(route.points().last(), Some(&resolved[1]));
    assert_eq!(route.style().color, Color::from_hex("#0d6efd").unwrap());
    assert_eq!(route.style().width, 5.0);

    let plan = controller.state().last_plan.as_ref().unwrap();
    assert_eq!(plan.start_label, "Start: Home");
    assert_eq!(plan.destination_label, "Destination: Office");
}

#[test]
fn repeated_searches_keep_a_single_route() {
    let (mut controller, _) = seeded(3);
    let now = Instant::now();
    for destination in ["Office", "Gym", "Park"] {
        controller.dispatch(find("Home", destination), now);
        let map = controller.map(MapId::Primary).unwrap();
        assert_eq!(map.count_layers_of_type(LayerType::Polyline), 1);
        assert_eq!(map.count_layers_of_type(LayerType::Marker), 2);
        // traffic circles are not swept with the markers
        assert_eq!(map.count_layers_of_type(LayerType::Circle), 5);
    }
}

#[test]
fn resolved_endpoints_stay_near_the_base() {
    let (mut controller, seen) = seeded(99);
    let base = controller.config().simulation.base;
    for _ in 0..20 {
        controller.dispatch(find("a", "b"), Instant::now());
    }
    for pair in seen.borrow().chunks(2) {
        assert!(pair[0].lat - base.lat < 0.01 && pair[0].lat >= base.lat);
        assert!(pair[0].lng - base.lng < 0.01 && pair[0].lng >= base.lng);
        assert!(pair[1].lat - base.lat < 0.02 && pair[1].lat >= base.lat);
        assert!(pair[1].lng - base.lng < 0.02 && pair[1].lng >= base.lng);
    }
}

#[test]
fn blank_input_changes_nothing_and_notifies_once() {
    let (mut controller, seen) = seeded(5);
    let map = controller.map(MapId::Primary).unwrap();
    let layers_before = map.layer_count();
    let view_before = (map.viewport.center, map.viewport.zoom);

    for (start, destination) in [("", "Office"), ("Home", "   "), (" \t ", "")] {
        let effects = controller.dispatch(find(start, destination), Instant::now());
        assert_eq!(
            effects,
            vec![Effect::Notice(
                "Please enter both starting point and destination".to_string()
            )]
        );
    }

    let map = controller.map(MapId::Primary).unwrap();
    assert_eq!(map.layer_count(), layers_before);
    assert_eq!((map.viewport.center, map.viewport.zoom), view_before);
    assert!(seen.borrow().is_empty());
    assert!(!controller.scheduler().is_pending(TaskKey::FeedbackPrompt));
}

#[test]
fn option_color_follows_palette_with_fallback() {
    let (mut controller, _) = seeded(2);
    let palette = ["#0d6efd", "#20c997", "#6c757d"];
    for (ordinal, hex) in palette.iter().enumerate() {
        controller.dispatch(UiEvent::SelectRouteOption(ordinal), Instant::now());
        assert_eq!(route_polyline(&controller).style().color, Color::from_hex(hex).unwrap());
        assert_eq!(
            controller.state().options.selected().map(|o| o.ordinal),
            Some(ordinal)
        );
    }

    controller.dispatch(UiEvent::SelectRouteOption(3), Instant::now());
    assert_eq!(
        route_polyline(&controller).style().color,
        Color::from_hex("#0d6efd").unwrap()
    );
    assert!(controller.state().options.selected().is_none());
    assert_eq!(
        controller
            .map(MapId::Primary)
            .unwrap()
            .count_layers_of_type(LayerType::Polyline),
        1
    );
}

#[test]
fn search_labels_the_endpoint_markers() {
    let (mut controller, seen) = seeded(11);
    controller.dispatch(find("Home", "Office"), Instant::now());
    let resolved = seen.borrow().clone();

    let map = controller.map(MapId::Primary).unwrap();
    let mut markers: Vec<_> = map
        .layer_ids_of_type(LayerType::Marker)
        .iter()
        .map(|id| map.get_layer_as::<Marker>(id).unwrap())
        .map(|marker| (marker.position(), marker.popup_text().map(str::to_string)))
        .collect();
    markers.sort_by(|a, b| a.1.cmp(&b.1));

    assert_eq!(
        markers,
        vec![
            (resolved[1], Some("Destination: Office".to_string())),
            (resolved[0], Some("Start: Home".to_string())),
        ]
    );
}

#[test]
fn search_and_option_selection_refit_the_view() {
    let (mut controller, _) = seeded(5);
    let now = Instant::now();

    controller.dispatch(find("Home", "Office"), now);
    assert_view_fits_route(&controller);

    // reset so the option selection has to move the view again
    controller
        .map_mut(MapId::Primary)
        .unwrap()
        .set_view(LatLng::new(40.7128, -74.0060), 13.0);
    controller.dispatch(UiEvent::SelectRouteOption(1), now);
    assert_view_fits_route(&controller);
}

#[test]
fn option_route_has_fixed_endpoints() {
    let (mut controller, _) = seeded(2);
    controller.dispatch(UiEvent::SelectRouteOption(0), Instant::now());
    let points = route_polyline(&controller).points().to_vec();
    assert_eq!(points.first(), Some(&LatLng::new(40.7128, -74.0060)));
    assert_eq!(points.last(), Some(&LatLng::new(40.7228, -73.9860)));
    // ordinal 0 shifts the middle by -0.005 on both axes
    assert!((points[2].lat - (40.7178 - 0.005)).abs() < 1e-9);
    assert!((points[2].lng - (-73.9960 - 0.005)).abs() < 1e-9);
}

#[test]
fn rating_three_overrides_prior_state() {
    let (mut controller, _) = seeded(4);
    let now = Instant::now();
    controller.dispatch(UiEvent::Rate(5), now);
    controller.dispatch(UiEvent::Rate(3), now);

    use StarIcon::{Filled, Outline};
    assert_eq!(
        controller.state().rating.stars(),
        [Filled, Filled, Filled, Outline, Outline]
    );
}

#[test]
fn walking_mode_rewrites_times_but_not_distances() {
    let (mut controller, _) = seeded(6);
    let distances: Vec<String> = controller
        .state()
        .options
        .cards()
        .iter()
        .map(|c| c.distance_text.clone())
        .collect();

    controller.dispatch(UiEvent::SetTravelMode("walking".to_string()), Instant::now());

    let cards = controller.state().options.cards();
    let times: Vec<&str> = cards.iter().map(|c| c.time_text.as_str()).collect();
    assert_eq!(times, vec!["2 hr 30 min", "3 hr", "2 hr 15 min"]);
    let after: Vec<String> = cards.iter().map(|c| c.distance_text.clone()).collect();
    assert_eq!(after, distances);
    assert_eq!(controller.state().travel_modes.active(), TravelMode::Walking);
    assert_eq!(
        controller
            .state()
            .travel_modes
            .buttons()
            .filter(|(_, active)| *active)
            .count(),
        1
    );
}

#[test]
fn drawing_the_overlay_twice_doubles_the_circles() {
    let (mut controller, _) = seeded(7);
    let map = controller.map_mut(MapId::Traffic).unwrap();
    let before = map.count_layers_of_type(LayerType::Circle);
    assert_eq!(before, SAMPLE_TRAFFIC.len());

    render_overlay(map, &SAMPLE_TRAFFIC).unwrap();
    assert_eq!(map.count_layers_of_type(LayerType::Circle), 2 * before);
}

#[test]
fn searching_again_reschedules_the_single_feedback_prompt() {
    let (mut controller, _) = seeded(8);
    let t0 = Instant::now();
    controller.dispatch(find("Home", "Office"), t0);
    controller.dispatch(find("Home", "Gym"), t0 + Duration::from_secs(5));

    assert!(controller.tick(t0 + Duration::from_secs(10)).is_empty());
    assert_eq!(
        controller.tick(t0 + Duration::from_secs(15)),
        vec![Effect::ShowModal(Modal::Feedback)]
    );
    assert!(controller.tick(t0 + Duration::from_secs(60)).is_empty());
    assert_eq!(controller.state().modal, Some(Modal::Feedback));
}

#[test]
fn traffic_page_layout_fix_fires_once() {
    let (mut controller, _) = seeded(9);
    let t0 = Instant::now();
    controller.dispatch(UiEvent::Navigate(PageId::Traffic), t0);
    controller.dispatch(UiEvent::Navigate(PageId::Traffic), t0 + Duration::from_millis(50));

    assert!(controller.tick(t0 + Duration::from_millis(100)).is_empty());
    assert_eq!(
        controller.tick(t0 + Duration::from_millis(150)),
        vec![Effect::LayoutInvalidated(MapId::Traffic)]
    );
    assert_eq!(
        controller.map(MapId::Traffic).unwrap().size_invalidations(),
        1
    );
}
