use egui::{Color32, FontId, Stroke};

/// Style configuration for map elements
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Background color when no tiles are loaded
    pub background_color: Color32,
    /// Outline of tile placeholders
    pub tile_stroke: Stroke,
    pub zoom_controls: ZoomControlStyle,
    pub attribution: AttributionStyle,
    pub markers: MarkerStyle,
}

/// Style for zoom control buttons
#[derive(Debug, Clone)]
pub struct ZoomControlStyle {
    pub background_color: Color32,
    pub text_color: Color32,
    pub border_stroke: Stroke,
    pub button_size: f32,
    /// Margin from the top-right corner
    pub margin: f32,
    pub rounding: f32,
}

/// Style for attribution text
#[derive(Debug, Clone)]
pub struct AttributionStyle {
    pub text_color: Color32,
    pub font_id: FontId,
    pub margin: f32,
}

/// Style for map markers
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    pub color: Color32,
    /// Head radius in points
    pub size: f32,
    pub border_color: Color32,
    pub border_width: f32,
    pub label_font: FontId,
    pub label_background: Color32,
    pub label_color: Color32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(0xe8, 0xe6, 0xe1),
            tile_stroke: Stroke::new(0.5, Color32::from_gray(210)),
            zoom_controls: ZoomControlStyle::default(),
            attribution: AttributionStyle::default(),
            markers: MarkerStyle::default(),
        }
    }
}

impl Default for ZoomControlStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgba_unmultiplied(255, 255, 255, 220),
            text_color: Color32::BLACK,
            border_stroke: Stroke::new(1.0, Color32::from_gray(100)),
            button_size: 30.0,
            margin: 10.0,
            rounding: 3.0,
        }
    }
}

impl Default for AttributionStyle {
    fn default() -> Self {
        Self {
            text_color: Color32::from_gray(120),
            font_id: FontId::proportional(10.0),
            margin: 5.0,
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x2a, 0x81, 0xcb),
            size: 8.0,
            border_color: Color32::WHITE,
            border_width: 2.0,
            label_font: FontId::proportional(12.0),
            label_background: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
            label_color: Color32::BLACK,
        }
    }
}
