use crate::{
    core::{
        geo::{LatLng, LatLngBounds},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{DrawCommand, RenderContext},
    Result,
};
use serde::{Deserialize, Serialize};

/// RGBA color, serialized as a `#rrggbb` / `#rrggbbaa` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> std::result::Result<Self, String> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| format!("color `{hex}` must start with '#'"))?;
        if !digits.is_ascii() {
            return Err(format!("color `{hex}` is not ASCII hex"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| format!("color `{hex}`: {e}"))
        };

        match digits.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("color `{hex}` has an unsupported length")),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Same color with its alpha scaled by `opacity`
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let alpha = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self::new(self.r, self.g, self.b, alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "egui")]
impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// Style for circles (Leaflet `L.circle` path options)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    pub stroke_color: Color,
    pub fill_color: Color,
    pub fill_opacity: f32,
    pub stroke_width: f32,
}

impl CircleStyle {
    /// Stroke and fill in the same color
    pub fn filled(color: Color, fill_opacity: f32) -> Self {
        Self {
            stroke_color: color,
            fill_color: color,
            fill_opacity,
            ..Default::default()
        }
    }
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::rgb(0x33, 0x88, 0xff),
            fill_color: Color::rgb(0x33, 0x88, 0xff),
            fill_opacity: 0.2,
            stroke_width: 3.0,
        }
    }
}

/// Style for line features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Stroke weight in pixels
    pub width: f32,
    /// Opacity (0.0 to 1.0)
    pub opacity: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x33, 0x88, 0xff),
            width: 3.0,
            opacity: 1.0,
        }
    }
}

/// A circle with a radius in meters, so its on-screen size follows the zoom
pub struct Circle {
    properties: LayerProperties,
    center: LatLng,
    radius_meters: f64,
    style: CircleStyle,
}

impl Circle {
    pub fn new(id: String, center: LatLng, radius_meters: f64, style: CircleStyle) -> Self {
        Self {
            properties: LayerProperties::new(id, "Circle".to_string(), LayerType::Circle),
            center,
            radius_meters,
            style,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    pub fn style(&self) -> &CircleStyle {
        &self.style
    }
}

impl LayerTrait for Circle {
    crate::impl_layer_trait!(Circle, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        let radius = (self.radius_meters / viewport.meters_per_pixel()) as f32;
        context.push(DrawCommand::Circle {
            center: viewport.lat_lng_to_pixel(&self.center),
            radius,
            stroke: self.style.stroke_color.with_opacity(self.properties.opacity),
            stroke_width: self.style.stroke_width,
            fill: self
                .style
                .fill_color
                .with_opacity(self.style.fill_opacity * self.properties.opacity),
        });
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        // One degree of latitude is ~111.32 km
        let d_lat = self.radius_meters / 111_320.0;
        let d_lng = d_lat / self.center.lat.to_radians().cos().max(1e-6);
        Some(LatLngBounds::new(
            self.center.offset(-d_lat, -d_lng),
            self.center.offset(d_lat, d_lng),
        ))
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "center": self.center,
            "radius": self.radius_meters,
            "color": self.style.stroke_color,
            "fillColor": self.style.fill_color,
            "fillOpacity": self.style.fill_opacity,
        })
    }
}

/// An open path through a sequence of points
pub struct Polyline {
    properties: LayerProperties,
    points: Vec<LatLng>,
    style: LineStyle,
}

impl Polyline {
    pub fn new(id: String, points: Vec<LatLng>, style: LineStyle) -> Self {
        Self {
            properties: LayerProperties::new(id, "Polyline".to_string(), LayerType::Polyline),
            points,
            style,
        }
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }
}

impl LayerTrait for Polyline {
    crate::impl_layer_trait!(Polyline, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        if self.points.len() < 2 {
            return Ok(());
        }
        context.push(DrawCommand::Line {
            points: self
                .points
                .iter()
                .map(|p| viewport.lat_lng_to_pixel(p))
                .collect(),
            color: self
                .style
                .color
                .with_opacity(self.style.opacity * self.properties.opacity),
            width: self.style.width,
        });
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.points)
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "points": self.points,
            "color": self.style.color,
            "weight": self.style.width,
        })
    }
}
