use anyhow::Context as _;
use maproute::{
    core::map::MapId,
    page::{Effect, Modal, PageId},
    prelude::{StarIcon, UiEvent},
    ui::{MapStyle, MapView},
    AppConfig, Controller,
};
use std::time::Instant;

/// Desktop shell for the route planner page
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => AppConfig::default(),
    };
    let size = [
        config.viewport_size.x as f32 + 320.0,
        config.viewport_size.y as f32 + 80.0,
    ];
    let controller = Controller::new(config).context("failed to build the page")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_title("Route Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "maproute-app",
        options,
        Box::new(|_cc| Box::new(MapRouteApp::new(controller))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))?;

    Ok(())
}

struct MapRouteApp {
    controller: Controller,
    style: MapStyle,
    start_text: String,
    destination_text: String,
    notice: Option<String>,
    /// Events collected while drawing, applied once the frame's UI is built
    pending: Vec<UiEvent>,
}

impl MapRouteApp {
    fn new(controller: Controller) -> Self {
        Self {
            controller,
            style: MapStyle::default(),
            start_text: String::new(),
            destination_text: String::new(),
            notice: None,
            pending: Vec::new(),
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notice(text) => self.notice = Some(text),
                Effect::ShowModal(modal) => log::debug!("opening {modal:?} modal"),
                Effect::LayoutInvalidated(map) => log::debug!("{map} resized"),
            }
        }
    }

    fn nav_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Route Planner");
            ui.separator();
            for link in self.controller.state().registry.links() {
                if ui.selectable_label(link.active, &link.label).clicked() {
                    self.pending.push(UiEvent::Navigate(link.target));
                }
            }
        });
    }

    fn planner_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Plan your trip");
        ui.label("Starting point");
        ui.text_edit_singleline(&mut self.start_text);
        ui.label("Destination");
        ui.text_edit_singleline(&mut self.destination_text);
        if ui.button("Find Route").clicked() {
            self.pending.push(UiEvent::FindRoute {
                start: self.start_text.clone(),
                destination: self.destination_text.clone(),
            });
        }

        ui.separator();
        ui.label("Travel mode");
        ui.horizontal_wrapped(|ui| {
            for (mode, active) in self.controller.state().travel_modes.buttons() {
                if ui.selectable_label(active, mode.as_str()).clicked() {
                    self.pending
                        .push(UiEvent::SetTravelMode(mode.as_str().to_string()));
                }
            }
        });

        ui.separator();
        ui.label("Route options");
        for card in self.controller.state().options.cards() {
            let text = format!(
                "{}\n{}  {}",
                card.title, card.time_text, card.distance_text
            );
            if ui.selectable_label(card.selected, text).clicked() {
                self.pending.push(UiEvent::SelectRouteOption(card.ordinal));
            }
        }

        if let Some(plan) = &self.controller.state().last_plan {
            ui.separator();
            ui.small(&plan.start_label);
            ui.small(&plan.destination_label);
        }
    }

    fn map_area(&mut self, ui: &mut egui::Ui, id: MapId) {
        match self.controller.map_mut(id) {
            Some(map) => {
                if let Err(err) = MapView::new(map, &self.style).show(ui) {
                    log::error!("failed to draw {id}: {err}");
                }
            }
            None => {
                ui.label("Traffic panel is not available on this page.");
            }
        }
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.notice.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(text);
                    if ui.button("OK").clicked() {
                        self.notice = None;
                    }
                });
        }

        if self.controller.state().modal == Some(Modal::Feedback) {
            egui::Window::new("How was your route?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Rate your experience");
                    ui.horizontal(|ui| {
                        let stars = self.controller.state().rating.stars();
                        for (rank, star) in (1u8..).zip(stars) {
                            let glyph = match star {
                                StarIcon::Filled => "★",
                                StarIcon::Outline => "☆",
                            };
                            if ui.button(glyph).clicked() {
                                self.pending.push(UiEvent::Rate(rank));
                            }
                        }
                    });
                    if ui.button("Close").clicked() {
                        self.pending.push(UiEvent::DismissModal);
                    }
                });
        }
    }
}

impl eframe::App for MapRouteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let effects = self.controller.tick(Instant::now());
        self.apply(effects);

        egui::TopBottomPanel::top("nav").show(ctx, |ui| self.nav_bar(ui));

        match self.controller.state().visible_page() {
            Some(PageId::RoutePlanner) | None => {
                egui::SidePanel::left("planner_form")
                    .resizable(false)
                    .default_width(280.0)
                    .show(ctx, |ui| self.planner_form(ui));
                egui::CentralPanel::default().show(ctx, |ui| self.map_area(ui, MapId::Primary));
            }
            Some(PageId::Traffic) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Live traffic");
                    ui.label("High, medium and low congestion around downtown.");
                    self.map_area(ui, MapId::Traffic);
                });
            }
            Some(PageId::About) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("About");
                    ui.label(
                        "Routes here are simulated: endpoints are placed near the city \
                         center and joined by a straight line.",
                    );
                });
            }
        }

        self.dialogs(ctx);

        let now = Instant::now();
        for event in std::mem::take(&mut self.pending) {
            let effects = self.controller.dispatch(event, now);
            self.apply(effects);
        }

        if let Some(deadline) = self.controller.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
