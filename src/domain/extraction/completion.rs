//! Reading a slot object out of a completion.
//!
//! Models drift from the requested schema: numbers arrive as strings, room
//! types arrive in Chinese, features arrive as boolean flags. Every value is
//! normalized through the slot vocabulary; anything that does not fit is
//! dropped rather than stored with the wrong type.

use serde_json::{Map, Value};

use super::errors::ExtractionError;
use super::json::locate_json_object;
use crate::domain::profile::{
    normalize_digits, Budget, LocationPref, ManagementPref, ProfileUpdate, RoomType,
};

const NO_LIMIT_WORDS: [&str; 4] = ["不限", "沒上限", "no limit", "unlimited"];

/// Boolean flags older prompts produce, mapped to feature tokens.
const FEATURE_FLAGS: [(&str, &str); 4] = [
    ("garbage_service", "garbage"),
    ("elevator", "elevator"),
    ("security", "security"),
    ("quiet", "quiet"),
];

/// Parses a completion into a `ProfileUpdate`.
///
/// Fails only when no JSON object can be located or parsed. An object with
/// no usable values yields an empty update.
pub fn parse_profile_completion(raw: &str) -> Result<ProfileUpdate, ExtractionError> {
    let object_text = locate_json_object(raw)
        .ok_or_else(|| ExtractionError::malformed(raw, "no JSON object in completion"))?;

    let value: Value = serde_json::from_str(object_text)
        .map_err(|e| ExtractionError::malformed(raw, e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(ExtractionError::malformed(raw, "completion is not an object"));
    };

    Ok(update_from_fields(&fields))
}

fn update_from_fields(fields: &Map<String, Value>) -> ProfileUpdate {
    let mut update = ProfileUpdate::new();

    if let Some(budget) = fields.get("budget").and_then(budget_value) {
        update = update.with_budget(budget);
    }
    if let Some(location) = fields
        .get("location_pref")
        .and_then(Value::as_str)
        .and_then(LocationPref::parse_loose)
    {
        update = update.with_location(location);
    }
    if let Some(room) = fields
        .get("type_pref")
        .and_then(Value::as_str)
        .and_then(RoomType::parse_loose)
    {
        update = update.with_room_type(room);
    }
    if let Some(management) = fields
        .get("management_pref")
        .and_then(Value::as_str)
        .and_then(ManagementPref::parse_loose)
    {
        update = update.with_management(management);
    }

    let mut features: Vec<String> = match fields.get("required_features") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(single)) => single
            .split([',', '，', '、'])
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    for (flag, token) in FEATURE_FLAGS {
        if fields.get(flag).and_then(Value::as_bool) == Some(true) {
            features.push(token.to_string());
        }
    }
    update = update.with_features(features);

    if fields
        .get("features_preference")
        .and_then(Value::as_str)
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("done"))
    {
        update = update.with_features_done();
    }

    update
}

fn budget_value(value: &Value) -> Option<Budget> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .and_then(|amount| Budget::try_from_i64(amount).ok()),
        Value::String(s) => {
            let text = normalize_digits(s.trim()).to_lowercase();
            if NO_LIMIT_WORDS.iter().any(|w| text.contains(w)) {
                return Some(Budget::NO_LIMIT);
            }
            let compact = text.replace(',', "");
            if let Ok(amount) = compact.parse::<f64>() {
                return amount
                    .is_finite()
                    .then(|| amount.round() as i64)
                    .and_then(|amount| Budget::try_from_i64(amount).ok());
            }
            // One amount with a unit ("5000元") is accepted; ranges and
            // several numbers are ambiguous and dropped.
            let mut runs = compact
                .split(|c: char| !c.is_ascii_digit())
                .filter(|run| !run.is_empty());
            let amount = runs.next()?;
            if runs.next().is_some() {
                return None;
            }
            amount.parse::<u32>().ok().map(Budget::new)
        }
        _ => None,
    }
}
