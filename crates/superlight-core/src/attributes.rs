//! The closed set of recognized light attributes
//!
//! Requests and downstream commands may only carry attributes from this
//! enumeration. Push payloads are validated against it; attributes reported
//! by the device are projected onto it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for attribute payload validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("unrecognized light attribute: {0}")]
    Unrecognized(String),
}

/// A recognized light attribute
///
/// Matches the keys a light turn-on command accepts: brightness, color
/// temperature, hue/saturation, RGB/RGBW/RGBWW, xy, effect, transition and
/// flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightAttribute {
    Brightness,
    ColorTemp,
    ColorTempKelvin,
    HsColor,
    RgbColor,
    RgbwColor,
    RgbwwColor,
    XyColor,
    Effect,
    Transition,
    Flash,
}

impl LightAttribute {
    /// Every recognized attribute, in a stable order
    pub const ALL: [LightAttribute; 11] = [
        LightAttribute::Brightness,
        LightAttribute::ColorTemp,
        LightAttribute::ColorTempKelvin,
        LightAttribute::HsColor,
        LightAttribute::RgbColor,
        LightAttribute::RgbwColor,
        LightAttribute::RgbwwColor,
        LightAttribute::XyColor,
        LightAttribute::Effect,
        LightAttribute::Transition,
        LightAttribute::Flash,
    ];

    /// The wire name of this attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            LightAttribute::Brightness => "brightness",
            LightAttribute::ColorTemp => "color_temp",
            LightAttribute::ColorTempKelvin => "color_temp_kelvin",
            LightAttribute::HsColor => "hs_color",
            LightAttribute::RgbColor => "rgb_color",
            LightAttribute::RgbwColor => "rgbw_color",
            LightAttribute::RgbwwColor => "rgbww_color",
            LightAttribute::XyColor => "xy_color",
            LightAttribute::Effect => "effect",
            LightAttribute::Transition => "transition",
            LightAttribute::Flash => "flash",
        }
    }
}

impl FromStr for LightAttribute {
    type Err = AttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| AttributeError::Unrecognized(s.to_string()))
    }
}

impl fmt::Display for LightAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of recognized light attributes with their values
///
/// Insertion order is preserved so snapshots and command payloads read the
/// way the caller wrote them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet(IndexMap<LightAttribute, serde_json::Value>);

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw JSON object, rejecting unrecognized keys
    ///
    /// This is the push-boundary constructor: a caller handing in a key
    /// outside the allow-list gets an error before anything is stored.
    pub fn try_from_json(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, AttributeError> {
        let mut set = Self::new();
        for (key, value) in object {
            let attr: LightAttribute = key.parse()?;
            set.0.insert(attr, value.clone());
        }
        Ok(set)
    }

    /// Build from a raw JSON object, silently dropping unrecognized keys
    ///
    /// Used for attributes reported by the device, which carries state the
    /// allow-list does not cover (color_mode, supported features, etc.).
    pub fn project_json(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut set = Self::new();
        for (key, value) in object {
            if let Ok(attr) = key.parse::<LightAttribute>() {
                set.0.insert(attr, value.clone());
            }
        }
        set
    }

    /// Render as a JSON object keyed by wire names, for command payloads
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        self.0
            .iter()
            .map(|(attr, value)| (attr.as_str().to_string(), value.clone()))
            .collect()
    }

    /// Insert or replace an attribute value
    pub fn insert(&mut self, attr: LightAttribute, value: serde_json::Value) {
        self.0.insert(attr, value);
    }

    /// Get an attribute value
    pub fn get(&self, attr: LightAttribute) -> Option<&serde_json::Value> {
        self.0.get(&attr)
    }

    /// Remove an attribute, returning its value if present
    pub fn remove(&mut self, attr: LightAttribute) -> Option<serde_json::Value> {
        self.0.shift_remove(&attr)
    }

    /// Whether the attribute is present
    pub fn contains(&self, attr: LightAttribute) -> bool {
        self.0.contains_key(&attr)
    }

    /// Number of attributes in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attribute/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (LightAttribute, &serde_json::Value)> {
        self.0.iter().map(|(attr, value)| (*attr, value))
    }
}

impl FromIterator<(LightAttribute, serde_json::Value)> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = (LightAttribute, serde_json::Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names_roundtrip() {
        for attr in LightAttribute::ALL {
            assert_eq!(attr.as_str().parse::<LightAttribute>().unwrap(), attr);
        }
    }

    #[test]
    fn test_try_from_json_accepts_known_keys() {
        let object = json!({"brightness": 255, "hs_color": [30.0, 100.0]});
        let set = AttributeSet::try_from_json(object.as_object().unwrap()).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(LightAttribute::Brightness), Some(&json!(255)));
    }

    #[test]
    fn test_try_from_json_rejects_unknown_keys() {
        let object = json!({"brightness": 255, "volume": 11});
        let err = AttributeSet::try_from_json(object.as_object().unwrap()).unwrap_err();

        assert_eq!(err, AttributeError::Unrecognized("volume".to_string()));
    }

    #[test]
    fn test_project_json_drops_unknown_keys() {
        let object = json!({
            "brightness": 128,
            "color_mode": "hs",
            "supported_color_modes": ["hs"],
            "friendly_name": "Kitchen",
        });
        let set = AttributeSet::project_json(object.as_object().unwrap());

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(LightAttribute::Brightness), Some(&json!(128)));
    }

    #[test]
    fn test_to_json_object_uses_wire_names() {
        let mut set = AttributeSet::new();
        set.insert(LightAttribute::ColorTempKelvin, json!(2700));

        let object = set.to_json_object();
        assert_eq!(object.get("color_temp_kelvin"), Some(&json!(2700)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut set = AttributeSet::new();
        set.insert(LightAttribute::Brightness, json!(200));
        set.insert(LightAttribute::XyColor, json!([0.3, 0.4]));

        let encoded = serde_json::to_string(&set).unwrap();
        let decoded: AttributeSet = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, set);
    }
}
