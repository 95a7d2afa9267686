use crate::{
    core::{
        geo::{LatLng, Point},
        map::MapId,
    },
    page::registry::PageId,
};
use serde::{Deserialize, Serialize};

/// Map event types that can be emitted by a map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map view has changed (center or zoom)
    ViewChanged { map: MapId, center: LatLng, zoom: f64 },
    /// Container size was recomputed
    SizeInvalidated { map: MapId, size: Point },
    /// Layer was added to the map
    LayerAdd { map: MapId, layer_id: String },
    /// Layer was removed from the map
    LayerRemove { map: MapId, layer_id: String },
}

impl MapEvent {
    /// Leaflet-style event name, used when logging drained events
    pub fn kind(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::SizeInvalidated { .. } => "resize",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
        }
    }

    pub fn map(&self) -> MapId {
        match self {
            MapEvent::ViewChanged { map, .. }
            | MapEvent::SizeInvalidated { map, .. }
            | MapEvent::LayerAdd { map, .. }
            | MapEvent::LayerRemove { map, .. } => *map,
        }
    }
}

/// User intents coming from the page shell
///
/// Each variant carries its payload as a typed field; nothing is parsed out
/// of markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    /// A navigation link was clicked
    Navigate(PageId),
    /// The "find route" button was pressed with the current input texts
    FindRoute { start: String, destination: String },
    /// A route option card was clicked, by its position in the list
    SelectRouteOption(usize),
    /// A travel-mode button was clicked; carries the button's mode name
    SetTravelMode(String),
    /// A rating star was clicked, by its rank
    Rate(u8),
    /// The open modal was closed
    DismissModal,
}
