//! Slot names and the fixed asking order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A named field of the user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Budget,
    LocationPref,
    TypePref,
    ManagementPref,
    RequiredFeatures,
    FeaturesPreference,
}

impl SlotName {
    pub const ALL: [SlotName; 6] = [
        SlotName::Budget,
        SlotName::LocationPref,
        SlotName::TypePref,
        SlotName::ManagementPref,
        SlotName::RequiredFeatures,
        SlotName::FeaturesPreference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotName::Budget => "budget",
            SlotName::LocationPref => "location_pref",
            SlotName::TypePref => "type_pref",
            SlotName::ManagementPref => "management_pref",
            SlotName::RequiredFeatures => "required_features",
            SlotName::FeaturesPreference => "features_preference",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of slots that must all be present for a complete profile.
///
/// The order is the asking sequence of the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredSlots(Vec<SlotName>);

impl RequiredSlots {
    /// The dialog's asking order.
    pub fn standard() -> Self {
        Self(vec![
            SlotName::Budget,
            SlotName::LocationPref,
            SlotName::TypePref,
            SlotName::ManagementPref,
            SlotName::FeaturesPreference,
        ])
    }

    /// Builds a custom order, rejecting empty or duplicated lists.
    pub fn new(slots: Vec<SlotName>) -> Result<Self, ValidationError> {
        if slots.is_empty() {
            return Err(ValidationError::empty_field("required_slots"));
        }
        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].contains(slot) {
                return Err(ValidationError::invalid_format(
                    "required_slots",
                    format!("'{}' listed twice", slot),
                ));
            }
        }
        Ok(Self(slots))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, slot: SlotName) -> bool {
        self.0.contains(&slot)
    }
}

impl Default for RequiredSlots {
    fn default() -> Self {
        Self::standard()
    }
}
