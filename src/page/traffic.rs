use crate::{
    core::{constants::*, geo::LatLng, map::Map},
    layers::vector::{Circle, CircleStyle, Color},
    Result,
};
use serde::{Deserialize, Serialize};

/// Congestion tier of a traffic sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    High,
    Medium,
    Low,
}

impl Intensity {
    pub fn color(&self) -> Color {
        match self {
            Intensity::High => Color::rgb(0xdc, 0x35, 0x45),
            Intensity::Medium => Color::rgb(0xff, 0xc1, 0x07),
            Intensity::Low => Color::rgb(0x28, 0xa7, 0x45),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub position: LatLng,
    pub intensity: Intensity,
}

impl TrafficPoint {
    pub const fn new(lat: f64, lng: f64, intensity: Intensity) -> Self {
        Self {
            position: LatLng::new(lat, lng),
            intensity,
        }
    }
}

/// Sample data drawn on both maps
pub const SAMPLE_TRAFFIC: [TrafficPoint; 5] = [
    TrafficPoint::new(40.7128, -74.0060, Intensity::High),
    TrafficPoint::new(40.7200, -74.0100, Intensity::Medium),
    TrafficPoint::new(40.7150, -73.9950, Intensity::Low),
    TrafficPoint::new(40.7050, -74.0150, Intensity::Medium),
    TrafficPoint::new(40.7300, -74.0200, Intensity::High),
];

/// Adds one circle per point and returns the new layer ids.
///
/// Every call adds fresh circles; drawing the same points twice doubles
/// them.
pub fn render_overlay(map: &mut Map, points: &[TrafficPoint]) -> Result<Vec<String>> {
    let mut added = Vec::with_capacity(points.len());
    for point in points {
        let id = map.next_layer_id("traffic");
        let style = CircleStyle::filled(point.intensity.color(), TRAFFIC_FILL_OPACITY);
        map.add_layer(Box::new(Circle::new(
            id.clone(),
            point.position,
            TRAFFIC_RADIUS_METERS,
            style,
        )))?;
        added.push(id);
    }
    log::debug!("{}: drew {} traffic circles", map.id(), added.len());
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{geo::Point, map::MapId},
        layers::base::LayerType,
    };

    fn traffic_map() -> Map {
        Map::new(
            MapId::Traffic,
            LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            TRAFFIC_ZOOM,
            Point::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_one_circle_per_point() {
        let mut map = traffic_map();
        let ids = render_overlay(&mut map, &SAMPLE_TRAFFIC).unwrap();
        assert_eq!(ids.len(), 5);
        assert_eq!(map.count_layers_of_type(LayerType::Circle), 5);

        let first = map.get_layer_as::<Circle>(&ids[0]).unwrap();
        assert_eq!(first.radius_meters(), 300.0);
        assert_eq!(first.style().fill_color, Color::from_hex("#dc3545").unwrap());
        assert_eq!(first.style().stroke_color, first.style().fill_color);
        assert_eq!(first.style().fill_opacity, 0.5);
    }

    #[test]
    fn test_overlay_is_additive() {
        let mut map = traffic_map();
        render_overlay(&mut map, &SAMPLE_TRAFFIC).unwrap();
        render_overlay(&mut map, &SAMPLE_TRAFFIC).unwrap();
        assert_eq!(map.count_layers_of_type(LayerType::Circle), 10);
    }

    #[test]
    fn test_empty_points_add_nothing() {
        let mut map = traffic_map();
        assert!(render_overlay(&mut map, &[]).unwrap().is_empty());
        assert_eq!(map.layer_count(), 0);
    }
}
