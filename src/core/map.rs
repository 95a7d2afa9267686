use crate::{
    core::{
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    input::{events::MapEvent, handler::EventManager},
    layers::{
        base::{LayerTrait, LayerType},
        manager::LayerManager,
    },
    rendering::context::RenderContext,
    Result,
};
use serde::{Deserialize, Serialize};

/// Which of the page's two maps a handle or event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapId {
    /// Interactive planner map
    Primary,
    /// Read-only traffic analysis map
    Traffic,
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapId::Primary => write!(f, "map"),
            MapId::Traffic => write!(f, "traffic-map"),
        }
    }
}

/// One independent map: a viewport plus the layers drawn on it
pub struct Map {
    id: MapId,
    pub viewport: Viewport,
    layer_manager: LayerManager,
    event_manager: EventManager,
    next_layer_seq: u64,
    size_invalidations: u64,
}

impl Map {
    pub fn new(id: MapId, center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            id,
            viewport: Viewport::new(center, zoom, size),
            layer_manager: LayerManager::new(),
            event_manager: EventManager::new(),
            next_layer_seq: 0,
            size_invalidations: 0,
        }
    }

    pub fn id(&self) -> MapId {
        self.id
    }

    /// Hands out a fresh layer id such as `circle-3`, unique within this map
    pub fn next_layer_id(&mut self, prefix: &str) -> String {
        self.next_layer_seq += 1;
        format!("{prefix}-{}", self.next_layer_seq)
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        let old = (self.viewport.center, self.viewport.zoom);
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.emit_view_change(old);
    }

    pub fn pan(&mut self, delta: Point) {
        let old = (self.viewport.center, self.viewport.zoom);
        self.viewport.pan(delta);
        self.emit_view_change(old);
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let old = (self.viewport.center, self.viewport.zoom);
        self.viewport.zoom_to(zoom, focus_point);
        self.emit_view_change(old);
    }

    /// Fits the view to `bounds` with `padding` pixels on every side
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: f64) {
        let old = (self.viewport.center, self.viewport.zoom);
        self.viewport.fit_bounds(bounds, padding);
        self.emit_view_change(old);
    }

    /// Recomputes the container size, e.g. after the map's panel became visible
    pub fn invalidate_size(&mut self, size: Option<Point>) {
        if let Some(size) = size {
            self.viewport.set_size(size);
        }
        self.size_invalidations += 1;
        self.event_manager.emit(MapEvent::SizeInvalidated {
            map: self.id,
            size: self.viewport.size,
        });
    }

    /// Number of times `invalidate_size` ran
    pub fn size_invalidations(&self) -> u64 {
        self.size_invalidations
    }

    fn emit_view_change(&mut self, old: (LatLng, f64)) {
        if self.viewport.center != old.0 || self.viewport.zoom != old.1 {
            self.event_manager.emit(MapEvent::ViewChanged {
                map: self.id,
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
    }

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.layer_manager.add_layer(layer)?;
        self.event_manager.emit(MapEvent::LayerAdd {
            map: self.id,
            layer_id,
        });
        Ok(())
    }

    /// Removes a layer; returns whether it was attached
    pub fn remove_layer(&mut self, layer_id: &str) -> bool {
        let removed = self.layer_manager.remove_layer(layer_id).is_some();
        if removed {
            self.event_manager.emit(MapEvent::LayerRemove {
                map: self.id,
                layer_id: layer_id.to_string(),
            });
        }
        removed
    }

    /// Removes every layer of one type and returns how many went away
    pub fn remove_layers_of_type(&mut self, layer_type: LayerType) -> usize {
        self.layer_manager
            .ids_of_type(layer_type)
            .iter()
            .filter(|id| self.remove_layer(id))
            .count()
    }

    pub fn layer_ids_of_type(&self, layer_type: LayerType) -> Vec<String> {
        self.layer_manager.ids_of_type(layer_type)
    }

    pub fn count_layers_of_type(&self, layer_type: LayerType) -> usize {
        self.layer_manager
            .layers()
            .iter()
            .filter(|l| l.layer_type() == layer_type)
            .count()
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn get_layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.layer_manager.get_as::<T>(layer_id)
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_manager.contains(layer_id)
    }

    pub fn layer_count(&self) -> usize {
        self.layer_manager.len()
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    /// Queues one frame of draw commands
    pub fn render(&mut self, context: &mut RenderContext) -> Result<()> {
        context.begin_frame();
        self.layer_manager.render(context, &self.viewport)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}
