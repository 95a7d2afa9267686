use crate::{
    core::{
        config::{AppConfig, MapViewConfig},
        map::{Map, MapId},
    },
    layers::tile::{TemplateSource, TileLayer},
    page::traffic::{render_overlay, SAMPLE_TRAFFIC},
    Result,
};

/// The page's map containers: the planner map and, when the page has a
/// traffic panel, the traffic map
pub struct MapSurface {
    primary: Option<Map>,
    traffic: Option<Map>,
}

impl MapSurface {
    pub fn new() -> Self {
        Self {
            primary: None,
            traffic: None,
        }
    }

    fn build(id: MapId, view: &MapViewConfig, config: &AppConfig) -> Result<Map> {
        let mut map = Map::new(id, view.center, view.zoom, config.viewport_size);
        let source = TemplateSource::from(&config.tiles);
        map.add_layer(Box::new(TileLayer::new(
            format!("{id}-tiles"),
            "OpenStreetMap".to_string(),
            Box::new(source),
        )))?;
        render_overlay(&mut map, &SAMPLE_TRAFFIC)?;
        Ok(map)
    }

    /// Creates the planner map with its tiles and traffic circles; later
    /// calls return the existing map
    pub fn init_primary(&mut self, config: &AppConfig) -> Result<&mut Map> {
        if self.primary.is_some() {
            log::debug!("primary map already initialized");
        } else {
            self.primary = Some(Self::build(MapId::Primary, &config.primary, config)?);
            log::info!("primary map ready at {:?}", config.primary.center);
        }
        self.primary
            .as_mut()
            .ok_or_else(|| crate::Error::Layer("primary map missing".to_string()))
    }

    /// Creates the traffic map if the page has a traffic panel; otherwise
    /// does nothing and returns `None`
    pub fn init_secondary(&mut self, config: &AppConfig) -> Result<Option<&mut Map>> {
        if !config.traffic_panel {
            log::debug!("no traffic panel; traffic map skipped");
            return Ok(None);
        }
        if self.traffic.is_some() {
            log::debug!("traffic map already initialized");
        } else {
            self.traffic = Some(Self::build(MapId::Traffic, &config.traffic, config)?);
            log::info!("traffic map ready at {:?}", config.traffic.center);
        }
        Ok(self.traffic.as_mut())
    }

    pub fn map(&self, id: MapId) -> Option<&Map> {
        match id {
            MapId::Primary => self.primary.as_ref(),
            MapId::Traffic => self.traffic.as_ref(),
        }
    }

    pub fn map_mut(&mut self, id: MapId) -> Option<&mut Map> {
        match id {
            MapId::Primary => self.primary.as_mut(),
            MapId::Traffic => self.traffic.as_mut(),
        }
    }

    pub fn primary(&self) -> Option<&Map> {
        self.primary.as_ref()
    }

    pub fn traffic(&self) -> Option<&Map> {
        self.traffic.as_ref()
    }
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new()
    }
}
