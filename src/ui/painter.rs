use crate::{core::geo::Point, rendering::context::DrawCommand, ui::style::MapStyle};
use egui::{Align2, Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Container pixel to screen position inside `rect`
pub fn to_screen(rect: Rect, point: Point) -> Pos2 {
    rect.min + Vec2::new(point.x as f32, point.y as f32)
}

/// Paints one frame of queued commands, clipped to `rect`
pub fn paint_commands(painter: &Painter, rect: Rect, commands: &[DrawCommand], style: &MapStyle) {
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, 0.0, style.background_color);

    for command in commands {
        match command {
            DrawCommand::Tile { bounds, opacity, .. } => {
                // Tile images are not fetched; draw the grid cell only
                let cell = Rect::from_min_max(to_screen(rect, bounds.0), to_screen(rect, bounds.1));
                let stroke = Stroke::new(
                    style.tile_stroke.width,
                    style.tile_stroke.color.gamma_multiply(*opacity),
                );
                painter.rect_stroke(cell, 0.0, stroke);
            }
            DrawCommand::Circle {
                center,
                radius,
                stroke,
                stroke_width,
                fill,
            } => {
                painter.add(Shape::circle_filled(to_screen(rect, *center), *radius, *fill));
                painter.circle_stroke(
                    to_screen(rect, *center),
                    *radius,
                    Stroke::new(*stroke_width, Color32::from(*stroke)),
                );
            }
            DrawCommand::Line {
                points,
                color,
                width,
            } => {
                let screen: Vec<Pos2> = points.iter().map(|p| to_screen(rect, *p)).collect();
                painter.add(Shape::line(screen, Stroke::new(*width, Color32::from(*color))));
            }
            DrawCommand::Marker { anchor, label } => {
                paint_marker(&painter, to_screen(rect, *anchor), label.as_deref(), style);
            }
            DrawCommand::Attribution(text) => {
                painter.text(
                    rect.left_bottom()
                        + Vec2::new(style.attribution.margin, -style.attribution.margin),
                    Align2::LEFT_BOTTOM,
                    text,
                    style.attribution.font_id.clone(),
                    style.attribution.text_color,
                );
            }
        }
    }
}

fn paint_marker(painter: &Painter, tip: Pos2, label: Option<&str>, style: &MapStyle) {
    let marker = &style.markers;
    let head = tip - Vec2::new(0.0, marker.size * 2.0);
    painter.add(Shape::convex_polygon(
        vec![
            tip,
            head + Vec2::new(-marker.size * 0.7, marker.size * 0.7),
            head + Vec2::new(marker.size * 0.7, marker.size * 0.7),
        ],
        marker.color,
        Stroke::NONE,
    ));
    painter.circle(
        head,
        marker.size,
        marker.color,
        Stroke::new(marker.border_width, marker.border_color),
    );

    if let Some(text) = label {
        let anchor = head - Vec2::new(0.0, marker.size + 4.0);
        let galley = painter.layout_no_wrap(
            text.to_string(),
            marker.label_font.clone(),
            marker.label_color,
        );
        let text_rect =
            Align2::CENTER_BOTTOM.anchor_rect(Rect::from_min_size(anchor, galley.size()));
        painter.rect_filled(text_rect.expand(3.0), 3.0, marker.label_background);
        painter.galley(text_rect.min, galley, marker.label_color);
    }
}
