//! Settings-blob (de)serialization for the style store.
//!
//! The blob is a per-user JSON document keyed by drawable class:
//!
//! ```json
//! {
//!   "line": {
//!     "general":   { "color": "#FFFFFF", "width": 2.0, "pattern": "solid" },
//!     "overrides": { "hover": { "color": "#FF8C00" } },
//!     "enabled":   { "hover": true }
//!   }
//! }
//! ```
//!
//! Loading is lenient throughout: unknown keys and malformed values are
//! dropped with a warning, a class section that cannot be read falls back
//! to factory defaults, and nothing here is ever fatal. General layers are
//! rebuilt as factory-default plus delta, so they stay total even when the
//! blob is partial or stale. Schema versioning of the blob is the storage
//! collaborator's responsibility.

use super::config::{StyleConfig, StyleDelta};
use super::store::{ModeMap, StyleSettings, StyleSlot};
use super::{DrawableClass, InteractionMode};
use serde_json::{Map, Value};

const SLOT_KEYS: [&str; 3] = ["general", "overrides", "enabled"];

impl StyleSettings {
    /// Serialize to the settings blob.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        let mut root = Map::new();
        root.insert("line".into(), slot_to_json(&self.line)?);
        root.insert("circle".into(), slot_to_json(&self.circle)?);
        root.insert("polyline".into(), slot_to_json(&self.polyline)?);
        root.insert("rectangle".into(), slot_to_json(&self.rectangle)?);
        root.insert("arc".into(), slot_to_json(&self.arc)?);
        root.insert(
            "angle-measurement".into(),
            slot_to_json(&self.angle_measurement)?,
        );
        root.insert("point".into(), slot_to_json(&self.point)?);
        Ok(Value::Object(root))
    }

    /// Parse a settings blob, leniently.
    pub fn from_json(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            log::warn!("style settings blob is not an object, using factory defaults");
            return Self::default();
        };

        for key in root.keys() {
            if !DrawableClass::ALL.iter().any(|c| c.as_str() == key) {
                log::warn!("unknown drawable class '{key}' in style settings, dropping");
            }
        }

        Self {
            line: slot_from_json(root.get("line"), DrawableClass::Line),
            circle: slot_from_json(root.get("circle"), DrawableClass::Circle),
            polyline: slot_from_json(root.get("polyline"), DrawableClass::Polyline),
            rectangle: slot_from_json(root.get("rectangle"), DrawableClass::Rectangle),
            arc: slot_from_json(root.get("arc"), DrawableClass::Arc),
            angle_measurement: slot_from_json(
                root.get("angle-measurement"),
                DrawableClass::AngleMeasurement,
            ),
            point: slot_from_json(root.get("point"), DrawableClass::Point),
        }
    }
}

fn slot_to_json<T: StyleConfig>(slot: &StyleSlot<T>) -> serde_json::Result<Value> {
    let mut obj = Map::new();
    obj.insert("general".into(), serde_json::to_value(slot.general())?);

    let mut overrides = Map::new();
    let mut enabled = Map::new();
    for mode in InteractionMode::ALL {
        if let Some(delta) = slot.override_delta(mode) {
            overrides.insert(mode.as_str().into(), serde_json::to_value(delta)?);
        }
        if slot.override_enabled(mode) {
            enabled.insert(mode.as_str().into(), Value::Bool(true));
        }
    }
    if !overrides.is_empty() {
        obj.insert("overrides".into(), Value::Object(overrides));
    }
    if !enabled.is_empty() {
        obj.insert("enabled".into(), Value::Object(enabled));
    }
    Ok(Value::Object(obj))
}

fn slot_from_json<T: StyleConfig>(value: Option<&Value>, class: DrawableClass) -> StyleSlot<T> {
    let Some(value) = value else {
        return StyleSlot::default();
    };
    let ctx = class.as_str();
    let Some(obj) = value.as_object() else {
        log::warn!("style section '{ctx}' is not an object, using factory defaults");
        return StyleSlot::default();
    };

    for key in obj.keys() {
        if !SLOT_KEYS.contains(&key.as_str()) {
            log::warn!("unknown key '{key}' in style section '{ctx}', dropping");
        }
    }

    // Factory default plus delta keeps the General layer total even when
    // the stored object is partial or from an older schema.
    let general = T::default().apply(&lenient_delta::<T>(
        obj.get("general"),
        &format!("{ctx}.general"),
    ));

    let mut overrides: ModeMap<Option<T::Delta>> = ModeMap::default();
    if let Some(section) = obj.get("overrides") {
        match section.as_object() {
            Some(map) => {
                for (key, delta_value) in map {
                    let Some(mode) = InteractionMode::parse(key) else {
                        log::warn!("unknown mode '{key}' in '{ctx}.overrides', dropping");
                        continue;
                    };
                    let delta = lenient_delta::<T>(
                        Some(delta_value),
                        &format!("{ctx}.overrides.{key}"),
                    );
                    if !delta.is_empty() {
                        *overrides.get_mut(mode) = Some(delta);
                    }
                }
            }
            None => log::warn!("'{ctx}.overrides' is not an object, dropping"),
        }
    }

    let mut enabled: ModeMap<bool> = ModeMap::default();
    if let Some(section) = obj.get("enabled") {
        match section.as_object() {
            Some(map) => {
                for (key, flag) in map {
                    let Some(mode) = InteractionMode::parse(key) else {
                        log::warn!("unknown mode '{key}' in '{ctx}.enabled', dropping");
                        continue;
                    };
                    match flag.as_bool() {
                        Some(on) => *enabled.get_mut(mode) = on,
                        None => {
                            log::warn!("'{ctx}.enabled.{key}' is not a boolean, dropping");
                        }
                    }
                }
            }
            None => log::warn!("'{ctx}.enabled' is not an object, dropping"),
        }
    }

    StyleSlot::restore(general, overrides, enabled)
}

/// Parse a delta object key by key, dropping unknown keys and malformed
/// values with a warning so they never reach an effective style.
fn lenient_delta<T: StyleConfig>(value: Option<&Value>, ctx: &str) -> T::Delta {
    let Some(value) = value else {
        return T::Delta::default();
    };
    let Some(obj) = value.as_object() else {
        log::warn!("'{ctx}' is not an object, dropping");
        return T::Delta::default();
    };

    let mut clean = Map::new();
    for (key, field_value) in obj {
        if !T::FIELDS.contains(&key.as_str()) {
            log::warn!("unknown style key '{key}' in '{ctx}', dropping");
            continue;
        }
        // Probe each field alone so one bad value cannot take the valid
        // ones down with it.
        let probe = Value::Object(Map::from_iter([(key.clone(), field_value.clone())]));
        match serde_json::from_value::<T::Delta>(probe) {
            Ok(_) => {
                clean.insert(key.clone(), field_value.clone());
            }
            Err(err) => {
                log::warn!("invalid value for style key '{key}' in '{ctx}': {err}; dropping");
            }
        }
    }

    serde_json::from_value(Value::Object(clean)).unwrap_or_else(|err| {
        log::warn!("failed to assemble delta for '{ctx}': {err}; using empty delta");
        T::Delta::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::config::{LineStyle, LineStyleDelta};
    use crate::style::store::{SlotAction, StyleAction, StyleStore};
    use crate::style::{LinePattern, StyleColor};
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_roundtrip_preserves_overrides_and_flags() {
        let mut store = StyleStore::new(Arc::new(MemoryStorage::new()), "styles");
        store.dispatch(StyleAction::Line(SlotAction::ToggleOverride(
            InteractionMode::Hover,
            true,
        )));
        store.dispatch(StyleAction::Line(SlotAction::UpdateOverride(
            InteractionMode::Hover,
            LineStyleDelta {
                color: Some(StyleColor::rgb(0xFF, 0x8C, 0x00)),
                ..Default::default()
            },
        )));

        let blob = store.settings().to_json().unwrap();
        let restored = StyleSettings::from_json(&blob);

        assert!(restored.line.override_enabled(InteractionMode::Hover));
        assert_eq!(
            restored.line.effective(InteractionMode::Hover).color,
            StyleColor::rgb(0xFF, 0x8C, 0x00)
        );
        assert_eq!(
            restored.line.effective(InteractionMode::Draft),
            LineStyle::default()
        );
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let blob = json!({
            "line": {
                "general": { "color": "#336699", "glow": true },
                "overrides": { "hover": { "width": 3.0, "sparkle": "yes" } }
            }
        });

        let settings = StyleSettings::from_json(&blob);
        let general = settings.line.general();
        assert_eq!(general.color, StyleColor::rgb(0x33, 0x66, 0x99));
        // Unknown keys vanish instead of poisoning the slot.
        let delta = settings.line.override_delta(InteractionMode::Hover).unwrap();
        assert_eq!(delta.width, Some(3.0));
        assert!(delta.color.is_none());
    }

    #[test]
    fn test_malformed_value_drops_only_that_key() {
        let blob = json!({
            "line": {
                "general": { "color": "not-a-color", "width": 4.5 }
            }
        });

        let settings = StyleSettings::from_json(&blob);
        let general = settings.line.general();
        assert_eq!(general.color, LineStyle::default().color);
        assert_eq!(general.width, 4.5);
    }

    #[test]
    fn test_broken_slot_is_isolated() {
        let blob = json!({
            "line": "garbage",
            "circle": { "general": { "width": 7.0 } }
        });

        let settings = StyleSettings::from_json(&blob);
        assert_eq!(*settings.line.general(), LineStyle::default());
        assert_eq!(settings.circle.general().width, 7.0);
    }

    #[test]
    fn test_partial_general_stays_total() {
        let blob = json!({
            "line": { "general": { "pattern": "dashed" } }
        });

        let settings = StyleSettings::from_json(&blob);
        let general = settings.line.general();
        assert_eq!(general.pattern, LinePattern::Dashed);
        // Unmentioned fields come from the factory preset.
        assert_eq!(general.color, LineStyle::default().color);
        assert_eq!(general.width, LineStyle::default().width);
    }

    #[test]
    fn test_missing_blob_sections_default() {
        let settings = StyleSettings::from_json(&json!({}));
        assert_eq!(*settings.point.general(), Default::default());
    }

    #[test]
    fn test_empty_overrides_are_not_stored() {
        let blob = json!({
            "line": { "overrides": { "hover": { "bogus": 1 } } }
        });
        let settings = StyleSettings::from_json(&blob);
        assert!(settings.line.override_delta(InteractionMode::Hover).is_none());
    }
}
