//! Base tile layer
//!
//! Tile imagery is a passive source: the layer works out which slippy-map
//! tiles cover the viewport and queues one placeholder command per tile with
//! its URL. Fetching and decoding the images is left to the host.

use crate::{
    core::{
        config::TileSourceConfig,
        constants::{OSM_ATTRIBUTION, OSM_URL_TEMPLATE, TILE_SIZE},
        geo::{Point, TileCoord},
        viewport::Viewport,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{DrawCommand, RenderContext},
    Result,
};

/// Anything that can produce a tile URL for a given coordinate
pub trait TileSource: Send + Sync {
    fn url(&self, coord: TileCoord) -> String;

    fn attribution(&self) -> Option<&str> {
        None
    }
}

/// `{s}/{z}/{x}/{y}` URL template with rotating subdomains
#[derive(Debug, Clone)]
pub struct TemplateSource {
    template: String,
    subdomains: Vec<String>,
    attribution: Option<String>,
}

impl TemplateSource {
    pub fn new(template: impl Into<String>, subdomains: Vec<String>) -> Self {
        Self {
            template: template.into(),
            subdomains,
            attribution: None,
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn openstreetmap() -> Self {
        Self::new(
            OSM_URL_TEMPLATE,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .with_attribution(OSM_ATTRIBUTION)
    }
}

impl From<&TileSourceConfig> for TemplateSource {
    fn from(config: &TileSourceConfig) -> Self {
        Self::new(config.url_template.clone(), config.subdomains.clone())
            .with_attribution(config.attribution.clone())
    }
}

impl TileSource for TemplateSource {
    fn url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let idx = ((coord.x as usize) + (coord.y as usize)) % self.subdomains.len();
            self.subdomains[idx].as_str()
        };

        let url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string());

        if subdomain.is_empty() {
            url.replace("{s}.", "").replace("{s}", "")
        } else {
            url.replace("{s}", subdomain)
        }
    }

    fn attribution(&self) -> Option<&str> {
        self.attribution.as_deref()
    }
}

pub struct TileLayer {
    properties: LayerProperties,
    source: Box<dyn TileSource>,
    tile_size: u32,
}

impl TileLayer {
    pub fn new(id: String, name: String, source: Box<dyn TileSource>) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Tile),
            source,
            tile_size: TILE_SIZE,
        }
    }

    pub fn openstreetmap(id: String, name: String) -> Self {
        Self::new(id, name, Box::new(TemplateSource::openstreetmap()))
    }

    pub fn attribution(&self) -> Option<&str> {
        self.source.attribution()
    }

    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }

    /// Tiles covering the viewport at its integer zoom
    pub fn visible_tiles(&self, viewport: &Viewport) -> Vec<TileCoord> {
        let zoom = viewport.zoom.floor().clamp(0.0, 18.0) as u8;
        let bounds = viewport.bounds();
        let nw = TileCoord::from_lat_lng(&bounds.north_west(), zoom);
        let se = TileCoord::from_lat_lng(&bounds.south_east(), zoom);

        let mut tiles = Vec::new();
        for y in nw.y..=se.y {
            for x in nw.x..=se.x {
                let coord = TileCoord::new(x, y, zoom);
                if coord.is_valid() {
                    tiles.push(coord);
                }
            }
        }
        tiles
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn render(&mut self, context: &mut RenderContext, viewport: &Viewport) -> Result<()> {
        // Tiles are laid out at the integer zoom and scaled for fractional zooms
        let zoom = viewport.zoom.floor();
        let scale = 2_f64.powf(viewport.zoom - zoom);
        let size = self.tile_size as f64 * scale;

        for coord in self.visible_tiles(viewport) {
            let min = viewport.lat_lng_to_pixel(&coord.to_lat_lng());
            let max = min.add(&Point::new(size, size));
            context.push(DrawCommand::Tile {
                url: self.tile_url(coord),
                bounds: (min, max),
                opacity: self.properties.opacity,
            });
        }

        if let Some(text) = self.attribution() {
            context.push(DrawCommand::Attribution(text.to_string()));
        }
        Ok(())
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "tileSize": self.tile_size,
            "attribution": self.attribution(),
        })
    }
}
