//! Persona archetypes and their load-time configuration record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{ArchetypeId, ValidationError};
use crate::domain::profile::{normalize_feature, LocationPref, ManagementPref, RoomType};

/// Raw catalog record as stored by the external catalog.
///
/// Converted into an [`Archetype`] with `Archetype::try_from`, which rejects
/// anything outside the known vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub rent_min: u32,
    pub rent_max: u32,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub required_features: Vec<String>,
    #[serde(default)]
    pub bonus_features: Vec<String>,
    #[serde(default)]
    pub management_pref: Option<String>,
    pub room_type: String,
}

fn default_active() -> bool {
    true
}

/// A validated archetype. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    id: ArchetypeId,
    name: String,
    description: String,
    rent_min: u32,
    rent_max: u32,
    preferred_locations: BTreeSet<LocationPref>,
    required_features: Vec<String>,
    bonus_features: Vec<String>,
    management_pref: ManagementPref,
    room_type: RoomType,
    keywords: Vec<String>,
}

impl Archetype {
    pub fn id(&self) -> &ArchetypeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Inclusive rent range `(min, max)`.
    pub fn rent_range(&self) -> (u32, u32) {
        (self.rent_min, self.rent_max)
    }

    pub fn preferred_locations(&self) -> &BTreeSet<LocationPref> {
        &self.preferred_locations
    }

    pub fn required_features(&self) -> &[String] {
        &self.required_features
    }

    pub fn bonus_features(&self) -> &[String] {
        &self.bonus_features
    }

    /// Required then bonus feature tokens.
    pub fn available_features(&self) -> impl Iterator<Item = &str> {
        self.required_features
            .iter()
            .chain(self.bonus_features.iter())
            .map(String::as_str)
    }

    pub fn management_pref(&self) -> ManagementPref {
        self.management_pref
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl TryFrom<ArchetypeConfig> for Archetype {
    type Error = ValidationError;

    fn try_from(config: ArchetypeConfig) -> Result<Self, Self::Error> {
        let id = ArchetypeId::new(config.id)?;

        if config.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if config.rent_min > config.rent_max {
            return Err(ValidationError::invalid_format(
                "rent_range",
                format!("rent_min {} exceeds rent_max {}", config.rent_min, config.rent_max),
            ));
        }

        let preferred_locations = config
            .preferred_locations
            .iter()
            .map(|raw| {
                LocationPref::parse_loose(raw).ok_or_else(|| {
                    ValidationError::invalid_format("preferred_locations", format!("unknown location '{}'", raw))
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let room_type = RoomType::parse_loose(&config.room_type).ok_or_else(|| {
            ValidationError::invalid_format("room_type", format!("unknown room type '{}'", config.room_type))
        })?;

        let management_pref = match config.management_pref.as_deref() {
            None => ManagementPref::Indifferent,
            Some(raw) => ManagementPref::parse_loose(raw).ok_or_else(|| {
                ValidationError::invalid_format("management_pref", format!("unknown management '{}'", raw))
            })?,
        };

        Ok(Self {
            id,
            name: config.name,
            description: config.description,
            rent_min: config.rent_min,
            rent_max: config.rent_max,
            preferred_locations,
            required_features: normalize_tokens(config.required_features),
            bonus_features: normalize_tokens(config.bonus_features),
            management_pref,
            room_type,
            keywords: config
                .keywords
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
        })
    }
}

fn normalize_tokens(raw: Vec<String>) -> Vec<String> {
    raw.iter().filter_map(|t| normalize_feature(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ArchetypeConfig {
        ArchetypeConfig {
            id: "type_B".to_string(),
            name: "懶人貴族型".to_string(),
            active: true,
            keywords: vec!["子母車".to_string(), " 電梯 ".to_string(), "".to_string()],
            rent_min: 5500,
            rent_max: 8000,
            preferred_locations: vec!["downtown".to_string()],
            required_features: vec!["Garbage".to_string(), "elevator".to_string()],
            bonus_features: vec!["parking".to_string()],
            room_type: "套房".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_builds_archetype() {
        let archetype = Archetype::try_from(config()).unwrap();

        assert_eq!(archetype.id().as_str(), "type_B");
        assert_eq!(archetype.rent_range(), (5500, 8000));
        assert_eq!(archetype.room_type(), RoomType::Studio);
        assert_eq!(archetype.management_pref(), ManagementPref::Indifferent);
        assert!(archetype.preferred_locations().contains(&LocationPref::Downtown));
        assert_eq!(archetype.keywords(), &["子母車".to_string(), "電梯".to_string()]);
        let features: Vec<_> = archetype.available_features().collect();
        assert_eq!(features, vec!["garbage", "elevator", "parking"]);
    }

    #[test]
    fn inverted_rent_range_is_rejected() {
        let mut bad = config();
        bad.rent_min = 9000;
        assert!(matches!(
            Archetype::try_from(bad),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "rent_range"
        ));
    }

    #[test]
    fn unknown_location_is_rejected() {
        let mut bad = config();
        bad.preferred_locations.push("moon".to_string());
        assert!(Archetype::try_from(bad).is_err());
    }

    #[test]
    fn unknown_room_type_is_rejected() {
        let mut bad = config();
        bad.room_type = "tent".to_string();
        assert!(Archetype::try_from(bad).is_err());
    }

    #[test]
    fn unknown_management_is_rejected() {
        let mut bad = config();
        bad.management_pref = Some("butler".to_string());
        assert!(Archetype::try_from(bad).is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut bad = config();
        bad.name = " ".to_string();
        assert!(matches!(
            Archetype::try_from(bad),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn active_defaults_to_true_when_deserialized() {
        let yaml = "id: t\nname: T\nrent_min: 1\nrent_max: 2\nroom_type: shared\n";
        let config: ArchetypeConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.active);
    }
}
