#![cfg(feature = "egui")]

use egui::{Context, RawInput, Vec2};
use maproute::{
    core::map::MapId,
    prelude::Point,
    ui::{MapStyle, MapView},
    AppConfig, Controller,
};

/// Runs one egui frame drawing `id` at a fixed size; returns whether the
/// view reported a change
fn run_frame(ctx: &Context, controller: &mut Controller, id: MapId, size: Vec2) -> bool {
    let style = MapStyle::default();
    let mut changed = false;
    let _ = ctx.run(RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            let map = controller.map_mut(id).unwrap();
            changed = MapView::new(map, &style)
                .size(size)
                .show(ui)
                .unwrap()
                .view_changed;
        });
    });
    changed
}

#[test]
fn view_adopts_its_allocated_size_once() {
    let ctx = Context::default();
    let mut controller = Controller::new(AppConfig::default()).unwrap();

    assert!(run_frame(&ctx, &mut controller, MapId::Primary, Vec2::new(400.0, 300.0)));
    let map = controller.map(MapId::Primary).unwrap();
    assert_eq!(map.viewport.size, Point::new(400.0, 300.0));
    assert_eq!(map.size_invalidations(), 1);

    assert!(!run_frame(&ctx, &mut controller, MapId::Primary, Vec2::new(400.0, 300.0)));
    assert_eq!(
        controller.map(MapId::Primary).unwrap().size_invalidations(),
        1
    );
}

#[test]
fn traffic_view_draws_without_panics() {
    let ctx = Context::default();
    let mut controller = Controller::new(AppConfig::default()).unwrap();
    run_frame(&ctx, &mut controller, MapId::Traffic, Vec2::new(640.0, 480.0));
    assert_eq!(
        controller.map(MapId::Traffic).unwrap().viewport.zoom,
        12.0
    );
}
