use crate::{core::geo::Point, layers::vector::Color};

/// Commands that can be issued to the render context, in container pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Placeholder for a base-map tile image
    Tile {
        url: String,
        bounds: (Point, Point), // min, max screen coordinates
        opacity: f32,
    },
    Circle {
        center: Point,
        radius: f32,
        stroke: Color,
        stroke_width: f32,
        fill: Color,
    },
    Line {
        points: Vec<Point>,
        color: Color,
        width: f32,
    },
    /// Pin whose tip sits at `anchor`
    Marker {
        anchor: Point,
        label: Option<String>,
    },
    Attribution(String),
}

/// Collects the draw commands of one frame
///
/// The context does no drawing itself; a host (the egui painter, or a test)
/// consumes the queue after the layers have rendered.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            drawing_queue: Vec::new(),
        }
    }

    /// Clears the queue for a new frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.drawing_queue.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    pub fn count_circles(&self) -> usize {
        self.drawing_queue
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn count_markers(&self) -> usize {
        self.drawing_queue
            .iter()
            .filter(|c| matches!(c, DrawCommand::Marker { .. }))
            .count()
    }
}
