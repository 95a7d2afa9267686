// LayerTrait is the shared LayerOperations contract
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Marker,
    Circle,
    Polyline,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::Circle => write!(f, "circle"),
            LayerType::Polyline => write!(f, "polyline"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: layer_type.default_z_index(),
            opacity: 1.0,
            visible: true,
        }
    }
}

impl LayerType {
    /// Leaflet pane order: tiles, then vector overlays, then markers
    pub fn default_z_index(self) -> i32 {
        match self {
            LayerType::Tile => 200,
            LayerType::Circle | LayerType::Polyline => 400,
            LayerType::Marker => 600,
        }
    }
}
