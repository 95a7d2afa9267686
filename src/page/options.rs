use crate::{
    core::config::RouteConfig,
    page::{planner::Route, widgets::TravelMode},
};

/// One preset route card
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOption {
    pub ordinal: usize,
    pub title: String,
    pub icon: &'static str,
    pub time_text: String,
    pub distance_text: String,
    pub selected: bool,
}

/// The preset route cards under the search form
#[derive(Debug, Clone)]
pub struct RouteOptions {
    cards: Vec<RouteOption>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        let presets = [
            ("Fastest route", "8.2 mi"),
            ("Balanced route", "9.5 mi"),
            ("Shortest route", "7.1 mi"),
        ];
        let times = TravelMode::Driving.times();
        let cards = presets
            .iter()
            .zip(times)
            .enumerate()
            .map(|(ordinal, ((title, distance), time))| RouteOption {
                ordinal,
                title: title.to_string(),
                icon: "bi-clock",
                time_text: time.to_string(),
                distance_text: distance.to_string(),
                selected: false,
            })
            .collect();
        Self { cards }
    }
}

impl RouteOptions {
    pub fn cards(&self) -> &[RouteOption] {
        &self.cards
    }

    pub fn selected(&self) -> Option<&RouteOption> {
        self.cards.iter().find(|card| card.selected)
    }

    /// Marks exactly the card at `ordinal`; an out-of-range ordinal leaves
    /// none selected. Returns whether a card matched.
    pub fn select(&mut self, ordinal: usize) -> bool {
        for card in &mut self.cards {
            card.selected = card.ordinal == ordinal;
        }
        ordinal < self.cards.len()
    }

    /// Rewrites icon and time of every card for `mode`; distances stay
    pub fn apply_travel_mode(&mut self, mode: TravelMode) {
        for (index, card) in self.cards.iter_mut().enumerate() {
            if let Some(time) = mode.time_for(index) {
                card.time_text = time.to_string();
            }
            card.icon = mode.icon();
        }
    }
}

/// Geometry and color of the preset route at `ordinal`.
///
/// Colors come from the palette by ordinal, falling back to its first entry
/// (and to the main route color for an empty palette).
pub fn option_route(ordinal: usize, config: &RouteConfig) -> Route {
    let color = config
        .option_palette
        .get(ordinal)
        .or_else(|| config.option_palette.first())
        .copied()
        .unwrap_or(config.color);
    let offset = (ordinal as f64 - 1.0) * config.option_lateral_step;

    Route::between(config.option_start, config.option_end, color, config.weight)
        .with_lateral_offset(offset)
}
