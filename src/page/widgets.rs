use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the user intends to travel; changes the times shown on option cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Transit,
    Walking,
    Cycling,
    Rideshare,
}

impl TravelMode {
    pub const ALL: [TravelMode; 5] = [
        TravelMode::Driving,
        TravelMode::Transit,
        TravelMode::Walking,
        TravelMode::Cycling,
        TravelMode::Rideshare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
            TravelMode::Rideshare => "rideshare",
        }
    }

    /// Bootstrap icon class
    pub fn icon(&self) -> &'static str {
        match self {
            TravelMode::Driving => "bi-car-front",
            TravelMode::Transit => "bi-bus-front",
            TravelMode::Walking => "bi-person-walking",
            TravelMode::Cycling => "bi-bicycle",
            TravelMode::Rideshare => "bi-people",
        }
    }

    /// Travel time per option card, by card position
    pub fn times(&self) -> [&'static str; 3] {
        match self {
            TravelMode::Driving => ["25 min", "32 min", "40 min"],
            TravelMode::Transit => ["35 min", "42 min", "50 min"],
            TravelMode::Walking => ["2 hr 30 min", "3 hr", "2 hr 15 min"],
            TravelMode::Cycling => ["50 min", "1 hr 5 min", "45 min"],
            TravelMode::Rideshare => ["28 min", "35 min", "42 min"],
        }
    }

    pub fn time_for(&self, index: usize) -> Option<&'static str> {
        self.times().get(index).copied()
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::UnknownTravelMode(s.to_string()))
    }
}

/// Mode buttons; exactly one is active
#[derive(Debug, Clone, Default)]
pub struct TravelModeButtons {
    active: TravelMode,
}

impl TravelModeButtons {
    pub fn active(&self) -> TravelMode {
        self.active
    }

    pub fn activate(&mut self, mode: TravelMode) {
        self.active = mode;
    }

    /// Every button with its active flag, in display order
    pub fn buttons(&self) -> impl Iterator<Item = (TravelMode, bool)> + '_ {
        TravelMode::ALL
            .into_iter()
            .map(move |mode| (mode, mode == self.active))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarIcon {
    Filled,
    Outline,
}

impl StarIcon {
    pub fn class(&self) -> &'static str {
        match self {
            StarIcon::Filled => "bi-star-fill",
            StarIcon::Outline => "bi-star",
        }
    }
}

pub const MAX_RATING: u8 = 5;

/// Five stars, filled up to the current rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingWidget {
    rating: u8,
}

impl Default for RatingWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingWidget {
    pub fn new() -> Self {
        Self { rating: 0 }
    }

    /// Fills stars `1..=rating`; values above five are clamped
    pub fn set_rating(&mut self, rating: u8) {
        if rating > MAX_RATING {
            log::warn!("rating {rating} clamped to {MAX_RATING}");
        }
        self.rating = rating.min(MAX_RATING);
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn stars(&self) -> [StarIcon; MAX_RATING as usize] {
        std::array::from_fn(|i| {
            if (i as u8) < self.rating {
                StarIcon::Filled
            } else {
                StarIcon::Outline
            }
        })
    }
}
