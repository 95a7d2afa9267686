use crate::{
    core::{geo::Point, map::Map},
    rendering::context::RenderContext,
    ui::{painter::paint_commands, style::MapStyle},
    Result,
};
use egui::{Align2, Pos2, Rect, Response, Sense, Ui, Vec2};

/// Scroll points per zoom level
const SCROLL_PER_ZOOM: f64 = 120.0;

pub struct MapViewResponse {
    pub response: Response,
    /// Pan, zoom or resize happened this frame
    pub view_changed: bool,
}

/// Interactive egui view over one [`Map`]: drag pans, wheel zooms around
/// the pointer, and the +/- buttons step the zoom
pub struct MapView<'a> {
    map: &'a mut Map,
    style: &'a MapStyle,
    size: Option<Vec2>,
    interactive: bool,
    show_controls: bool,
}

impl<'a> MapView<'a> {
    pub fn new(map: &'a mut Map, style: &'a MapStyle) -> Self {
        Self {
            map,
            style,
            size: None,
            interactive: true,
            show_controls: true,
        }
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> Result<MapViewResponse> {
        let desired_size = self.size.unwrap_or_else(|| ui.available_size());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());
        let mut view_changed = false;

        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if self.map.viewport.size != size {
            self.map.invalidate_size(Some(size));
            view_changed = true;
        }

        let (zoom_in_rect, zoom_out_rect) = zoom_control_rects(self.style, rect);

        if self.interactive {
            if response.hovered() {
                let scroll = ui.input(|i| i.raw_scroll_delta.y);
                if scroll.abs() > 0.1 {
                    let focus = ui.input(|i| i.pointer.hover_pos()).map(|pos| {
                        let local = pos - rect.min;
                        Point::new(local.x as f64, local.y as f64)
                    });
                    let zoom = self.map.viewport.zoom + scroll as f64 / SCROLL_PER_ZOOM;
                    self.map.zoom_to(zoom, focus);
                    view_changed = true;
                }
            }

            if response.dragged() {
                let delta = response.drag_delta();
                if delta.length_sq() > 0.5 {
                    self.map.pan(Point::new(delta.x as f64, delta.y as f64));
                    view_changed = true;
                }
            }

            if self.show_controls && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let step = if zoom_in_rect.contains(pos) {
                        Some(1.0)
                    } else if zoom_out_rect.contains(pos) {
                        Some(-1.0)
                    } else {
                        None
                    };
                    if let Some(step) = step {
                        let zoom = self.map.viewport.zoom.round() + step;
                        self.map.zoom_to(zoom, None);
                        view_changed = true;
                    }
                }
            }
        }

        let mut context = RenderContext::new(rect.width() as u32, rect.height() as u32);
        self.map.render(&mut context)?;
        paint_commands(ui.painter(), rect, context.commands(), self.style);

        if self.show_controls {
            self.paint_controls(ui, zoom_in_rect, zoom_out_rect);
        }

        if view_changed {
            ui.ctx().request_repaint();
        }

        Ok(MapViewResponse {
            response,
            view_changed,
        })
    }

    fn paint_controls(&self, ui: &Ui, zoom_in_rect: Rect, zoom_out_rect: Rect) {
        let controls = &self.style.zoom_controls;
        for (button, label) in [(zoom_in_rect, "+"), (zoom_out_rect, "−")] {
            ui.painter()
                .rect_filled(button, controls.rounding, controls.background_color);
            ui.painter()
                .rect_stroke(button, controls.rounding, controls.border_stroke);
            ui.painter().text(
                button.center(),
                Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(16.0),
                controls.text_color,
            );
        }
    }
}

/// Screen rects of the zoom-in and zoom-out buttons of a view drawn in `rect`
pub fn zoom_control_rects(style: &MapStyle, rect: Rect) -> (Rect, Rect) {
    let controls = &style.zoom_controls;
    let zoom_in = Rect::from_min_size(
        rect.right_top() + Vec2::new(-controls.margin - controls.button_size, controls.margin),
        Vec2::splat(controls.button_size),
    );
    let zoom_out = zoom_in.translate(Vec2::new(0.0, controls.button_size + 5.0));
    (zoom_in, zoom_out)
}

pub fn hits_zoom_control(style: &MapStyle, rect: Rect, pos: Pos2) -> bool {
    let (zoom_in, zoom_out) = zoom_control_rects(style, rect);
    zoom_in.contains(pos) || zoom_out.contains(pos)
}
