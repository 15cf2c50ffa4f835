//! Point-of-interest and restaurant models

use serde::{Deserialize, Serialize};

/// A named, geolocated attraction with a category tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointOfInterest {
    pub name: String,
    /// Free-form tag, e.g. "museum", "park", "landmark", "unknown"
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A restaurant with its cuisine as the category tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub name: String,
    /// Cuisine tag, "unknown" when the source carries none
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl PointOfInterest {
    /// Label used in itinerary entries: `"name (category)"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

impl Restaurant {
    /// Label used in itinerary entries: `"name (category)"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}
