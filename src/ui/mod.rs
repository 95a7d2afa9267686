//! egui front end for the map engine: a style, a painter for
//! [`DrawCommand`](crate::rendering::DrawCommand)s and an interactive view.

pub mod painter;
pub mod style;
pub mod view;

pub use painter::paint_commands;
pub use style::{AttributionStyle, MapStyle, MarkerStyle, ZoomControlStyle};
pub use view::{hits_zoom_control, MapView, MapViewResponse};
