//! Typed slot values.
//!
//! Each enum accepts both its canonical token and the everyday words users
//! and models produce for it (`parse_loose`), so every adapter normalizes
//! through the same vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Monthly rent budget in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u32);

impl Budget {
    /// Sentinel meaning "no upper limit".
    pub const NO_LIMIT: Budget = Budget(99_999);

    pub fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Parses a signed amount, rejecting negatives.
    pub fn try_from_i64(amount: i64) -> Result<Self, ValidationError> {
        u32::try_from(amount)
            .map(Self)
            .map_err(|_| ValidationError::out_of_range("budget", 0, u32::MAX as i64, amount))
    }

    pub fn amount(&self) -> u32 {
        self.0
    }

    pub fn is_no_limit(&self) -> bool {
        self.0 >= Self::NO_LIMIT.0
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_no_limit() {
            write!(f, "no limit")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Preferred neighbourhood character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationPref {
    Downtown,
    School,
    Quiet,
}

impl LocationPref {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationPref::Downtown => "downtown",
            LocationPref::School => "school",
            LocationPref::Quiet => "quiet",
        }
    }

    /// Downtown and school areas overlap geographically.
    pub fn is_adjacent_to(&self, other: &LocationPref) -> bool {
        matches!(
            (self, other),
            (LocationPref::Downtown, LocationPref::School)
                | (LocationPref::School, LocationPref::Downtown)
        )
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "downtown" | "city" | "市區" | "市中心" | "方便" => Some(LocationPref::Downtown),
            "school" | "campus" | "學校" | "學校附近" | "暨大" => Some(LocationPref::School),
            "quiet" | "安靜" | "偏僻" | "郊區" => Some(LocationPref::Quiet),
            _ => None,
        }
    }
}

impl fmt::Display for LocationPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Studio,
    Shared,
    Apartment,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Studio => "studio",
            RoomType::Shared => "shared",
            RoomType::Apartment => "apartment",
        }
    }

    /// Normalizes the fixed room-type vocabulary (`套房`, `雅房`, `整層` and
    /// the canonical tokens).
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "studio" | "套房" | "獨立套房" => Some(RoomType::Studio),
            "shared" | "雅房" | "分租" => Some(RoomType::Shared),
            "apartment" | "整層" | "整層住家" | "公寓" => Some(RoomType::Apartment),
            _ => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the building is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagementPref {
    /// Landlord lives on site.
    Owner,
    /// Professional management company or building staff.
    Pro,
    /// Explicitly no resident landlord.
    NoOwner,
    /// No preference.
    #[serde(rename = "none")]
    Indifferent,
}

impl ManagementPref {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementPref::Owner => "owner",
            ManagementPref::Pro => "pro",
            ManagementPref::NoOwner => "no_owner",
            ManagementPref::Indifferent => "none",
        }
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "owner" | "landlord" | "房東同住" => Some(ManagementPref::Owner),
            "pro" | "professional" | "管理員" | "代管" => Some(ManagementPref::Pro),
            "no_owner" | "no-owner" | "noowner" | "不要房東" => Some(ManagementPref::NoOwner),
            "none" | "any" | "都可以" => Some(ManagementPref::Indifferent),
            _ => None,
        }
    }
}

impl fmt::Display for ManagementPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion marker for the features question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturesAnswer {
    Done,
}

/// Canonical form of a feature token: trimmed and lowercased.
pub fn normalize_feature(raw: &str) -> Option<String> {
    let token = raw.trim().to_lowercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Rewrites full-width digits and commas as their ASCII forms.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '，' => ',',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_sentinel_is_no_limit() {
        assert!(Budget::NO_LIMIT.is_no_limit());
        assert!(Budget::new(120_000).is_no_limit());
        assert!(!Budget::new(8000).is_no_limit());
    }

    #[test]
    fn budget_rejects_negative_amounts() {
        assert!(Budget::try_from_i64(-1).is_err());
        assert_eq!(Budget::try_from_i64(4500).unwrap().amount(), 4500);
    }

    #[test]
    fn location_adjacency_is_symmetric_and_limited() {
        assert!(LocationPref::Downtown.is_adjacent_to(&LocationPref::School));
        assert!(LocationPref::School.is_adjacent_to(&LocationPref::Downtown));
        assert!(!LocationPref::Quiet.is_adjacent_to(&LocationPref::Downtown));
        assert!(!LocationPref::School.is_adjacent_to(&LocationPref::School));
    }

    #[test]
    fn room_type_normalizes_local_vocabulary() {
        assert_eq!(RoomType::parse_loose("套房"), Some(RoomType::Studio));
        assert_eq!(RoomType::parse_loose("雅房"), Some(RoomType::Shared));
        assert_eq!(RoomType::parse_loose("整層"), Some(RoomType::Apartment));
        assert_eq!(RoomType::parse_loose(" Studio "), Some(RoomType::Studio));
        assert_eq!(RoomType::parse_loose("castle"), None);
    }

    #[test]
    fn management_none_serializes_as_none() {
        let json = serde_json::to_string(&ManagementPref::Indifferent).unwrap();
        assert_eq!(json, "\"none\"");
        let back: ManagementPref = serde_json::from_str("\"no_owner\"").unwrap();
        assert_eq!(back, ManagementPref::NoOwner);
    }

    #[test]
    fn feature_tokens_are_normalized() {
        assert_eq!(normalize_feature("  Elevator "), Some("elevator".to_string()));
        assert_eq!(normalize_feature("   "), None);
    }

    #[test]
    fn full_width_digits_become_ascii() {
        assert_eq!(normalize_digits("預算５，０００元"), "預算5,000元");
        assert_eq!(normalize_digits("4500"), "4500");
    }
}
