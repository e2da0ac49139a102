//! Scoring dimensions and the elicited weight vector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six axes an archetype is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Budget,
    Location,
    Features,
    Landlord,
    Type,
    Keyword,
}

impl Dimension {
    /// Declaration order; also the tie-break order for summaries.
    pub const ALL: [Dimension; 6] = [
        Dimension::Budget,
        Dimension::Location,
        Dimension::Features,
        Dimension::Landlord,
        Dimension::Type,
        Dimension::Keyword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Budget => "budget",
            Dimension::Location => "location",
            Dimension::Features => "features",
            Dimension::Landlord => "landlord",
            Dimension::Type => "type",
            Dimension::Keyword => "keyword",
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Budget => "預算考量",
            Dimension::Location => "地段便利性",
            Dimension::Features => "硬體設施",
            Dimension::Landlord => "房東相處",
            Dimension::Type => "房型隱私",
            Dimension::Keyword => "特殊需求",
        }
    }

    fn index(&self) -> usize {
        match self {
            Dimension::Budget => 0,
            Dimension::Location => 1,
            Dimension::Features => 2,
            Dimension::Landlord => 3,
            Dimension::Type => 4,
            Dimension::Keyword => 5,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-dimension weights on the elicitation scale (baseline 50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightVector {
    budget: i32,
    location: i32,
    features: i32,
    landlord: i32,
    #[serde(rename = "type")]
    room_type: i32,
    keyword: i32,
}

impl WeightVector {
    /// Starting value of every dimension.
    pub const BASELINE: i32 = 50;

    /// Lowest value any dimension may hold.
    pub const FLOOR: i32 = 10;

    pub fn uniform(value: i32) -> Self {
        Self {
            budget: value,
            location: value,
            features: value,
            landlord: value,
            room_type: value,
            keyword: value,
        }
    }

    pub fn get(&self, dimension: Dimension) -> i32 {
        self.as_array()[dimension.index()]
    }

    pub fn with(mut self, dimension: Dimension, value: i32) -> Self {
        *self.slot_mut(dimension) = value;
        self
    }

    pub fn add(&mut self, dimension: Dimension, delta: i32) {
        *self.slot_mut(dimension) += delta;
    }

    /// Raises every dimension below `floor` to `floor`.
    pub fn floor_at(&mut self, floor: i32) {
        for dimension in Dimension::ALL {
            let slot = self.slot_mut(dimension);
            if *slot < floor {
                *slot = floor;
            }
        }
    }

    /// Dimensions paired with their weight, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, i32)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    fn as_array(&self) -> [i32; 6] {
        [
            self.budget,
            self.location,
            self.features,
            self.landlord,
            self.room_type,
            self.keyword,
        ]
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut i32 {
        match dimension {
            Dimension::Budget => &mut self.budget,
            Dimension::Location => &mut self.location,
            Dimension::Features => &mut self.features,
            Dimension::Landlord => &mut self.landlord,
            Dimension::Type => &mut self.room_type,
            Dimension::Keyword => &mut self.keyword,
        }
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::uniform(Self::BASELINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vector_is_uniform_baseline() {
        let weights = WeightVector::default();
        assert!(weights.iter().all(|(_, w)| w == 50));
    }

    #[test]
    fn add_and_floor_adjust_single_dimension() {
        let mut weights = WeightVector::default();
        weights.add(Dimension::Keyword, -45);
        weights.add(Dimension::Budget, 20);
        weights.floor_at(WeightVector::FLOOR);

        assert_eq!(weights.get(Dimension::Keyword), 10);
        assert_eq!(weights.get(Dimension::Budget), 70);
        assert_eq!(weights.get(Dimension::Location), 50);
    }

    #[test]
    fn serializes_type_dimension_as_type() {
        let weights = WeightVector::default().with(Dimension::Type, 80);
        let json = serde_json::to_value(weights).unwrap();
        assert_eq!(json["type"], 80);
        assert_eq!(json["budget"], 50);
    }
}
