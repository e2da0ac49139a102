//! The collected user profile and partial updates to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::slot::{RequiredSlots, SlotName};
use super::values::{Budget, FeaturesAnswer, LocationPref, ManagementPref, RoomType};

/// Slots collected so far. An absent slot means "not yet collected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location_pref: Option<LocationPref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    type_pref: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    management_pref: Option<ManagementPref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required_features: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    features_preference: Option<FeaturesAnswer>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn budget(&self) -> Option<Budget> {
        self.budget
    }

    pub fn location_pref(&self) -> Option<LocationPref> {
        self.location_pref
    }

    pub fn type_pref(&self) -> Option<RoomType> {
        self.type_pref
    }

    pub fn management_pref(&self) -> Option<ManagementPref> {
        self.management_pref
    }

    /// Requested feature tokens; empty when none were requested.
    pub fn required_features(&self) -> impl Iterator<Item = &str> {
        self.required_features
            .iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn features_preference(&self) -> Option<FeaturesAnswer> {
        self.features_preference
    }

    /// Returns true if the slot holds a value.
    pub fn has(&self, slot: SlotName) -> bool {
        match slot {
            SlotName::Budget => self.budget.is_some(),
            SlotName::LocationPref => self.location_pref.is_some(),
            SlotName::TypePref => self.type_pref.is_some(),
            SlotName::ManagementPref => self.management_pref.is_some(),
            SlotName::RequiredFeatures => self.required_features.is_some(),
            SlotName::FeaturesPreference => self.features_preference.is_some(),
        }
    }

    /// First required slot still missing, in asking order.
    pub fn first_missing(&self, required: &RequiredSlots) -> Option<SlotName> {
        required.iter().copied().find(|slot| !self.has(*slot))
    }

    pub fn is_complete(&self, required: &RequiredSlots) -> bool {
        self.first_missing(required).is_none()
    }

    pub fn is_empty(&self) -> bool {
        SlotName::ALL.iter().all(|slot| !self.has(*slot))
    }

    /// Merges an update: present values overwrite, absent ones leave the
    /// current value untouched.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(budget) = update.budget {
            self.budget = Some(budget);
        }
        if let Some(location) = update.location_pref {
            self.location_pref = Some(location);
        }
        if let Some(room) = update.type_pref {
            self.type_pref = Some(room);
        }
        if let Some(management) = update.management_pref {
            self.management_pref = Some(management);
        }
        if let Some(features) = &update.required_features {
            self.required_features = Some(features.clone());
        }
        if let Some(answer) = update.features_preference {
            self.features_preference = Some(answer);
        }
    }
}

/// Partial profile produced by one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_pref: Option<LocationPref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_pref: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_pref: Option<ManagementPref>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_features: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_preference: Option<FeaturesAnswer>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value a generic "don't care" reply stands for while `slot` is
    /// being asked.
    pub fn generic_for(slot: SlotName) -> Self {
        let mut update = Self::default();
        match slot {
            SlotName::Budget => update.budget = Some(Budget::NO_LIMIT),
            SlotName::LocationPref => update.location_pref = Some(LocationPref::Downtown),
            SlotName::TypePref => update.type_pref = Some(RoomType::Studio),
            SlotName::ManagementPref => update.management_pref = Some(ManagementPref::Indifferent),
            SlotName::RequiredFeatures | SlotName::FeaturesPreference => {
                update.features_preference = Some(FeaturesAnswer::Done)
            }
        }
        update
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_location(mut self, location: LocationPref) -> Self {
        self.location_pref = Some(location);
        self
    }

    pub fn with_room_type(mut self, room: RoomType) -> Self {
        self.type_pref = Some(room);
        self
    }

    pub fn with_management(mut self, management: ManagementPref) -> Self {
        self.management_pref = Some(management);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = features
            .into_iter()
            .filter_map(|f| super::values::normalize_feature(f.as_ref()))
            .collect();
        if !set.is_empty() {
            self.required_features = Some(set);
        }
        self
    }

    pub fn with_features_done(mut self) -> Self {
        self.features_preference = Some(FeaturesAnswer::Done);
        self
    }

    pub fn has(&self, slot: SlotName) -> bool {
        match slot {
            SlotName::Budget => self.budget.is_some(),
            SlotName::LocationPref => self.location_pref.is_some(),
            SlotName::TypePref => self.type_pref.is_some(),
            SlotName::ManagementPref => self.management_pref.is_some(),
            SlotName::RequiredFeatures => self.required_features.is_some(),
            SlotName::FeaturesPreference => self.features_preference.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        SlotName::ALL.iter().all(|slot| !self.has(*slot))
    }

    /// Names of the slots this update sets.
    pub fn slots(&self) -> Vec<SlotName> {
        SlotName::ALL
            .iter()
            .copied()
            .filter(|slot| self.has(*slot))
            .collect()
    }

    /// Listing features while the features question is open also answers it.
    pub fn settle_features_answer(&mut self, hint: Option<SlotName>) {
        let asking_features = matches!(
            hint,
            Some(SlotName::FeaturesPreference) | Some(SlotName::RequiredFeatures)
        );
        if asking_features && self.required_features.is_some() {
            self.features_preference = Some(FeaturesAnswer::Done);
        }
    }
}
