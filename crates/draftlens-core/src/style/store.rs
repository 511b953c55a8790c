//! Style-resolution store.
//!
//! Owns the General configuration of every drawable class, the per-mode
//! override deltas and enable flags, memoizes effective styles on a
//! version counter, and schedules debounced persistence of the settings
//! blob. All mutation funnels through [`StyleStore::dispatch`]; reads can
//! come from any number of consumers.

use super::config::{
    AngleStyle, ArcStyle, CircleStyle, LineStyle, PointStyle, PolylineStyle, RectangleStyle,
    StyleConfig,
};
use super::merge;
use super::{DrawableClass, InteractionMode};
use crate::storage::{DebouncedSaver, SettingsStorage, StorageError, StorageResult};
use std::cell::RefCell;
use std::sync::Arc;

/// Fixed map with one value per interaction mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeMap<V> {
    draft: V,
    hover: V,
    selection: V,
    completion: V,
}

impl<V> ModeMap<V> {
    pub fn get(&self, mode: InteractionMode) -> &V {
        match mode {
            InteractionMode::Draft => &self.draft,
            InteractionMode::Hover => &self.hover,
            InteractionMode::Selection => &self.selection,
            InteractionMode::Completion => &self.completion,
        }
    }

    pub fn get_mut(&mut self, mode: InteractionMode) -> &mut V {
        match mode {
            InteractionMode::Draft => &mut self.draft,
            InteractionMode::Hover => &mut self.hover,
            InteractionMode::Selection => &mut self.selection,
            InteractionMode::Completion => &mut self.completion,
        }
    }

    /// Iterate all (mode, value) pairs in stable order.
    pub fn entries(&self) -> impl Iterator<Item = (InteractionMode, &V)> {
        InteractionMode::ALL.iter().map(|m| (*m, self.get(*m)))
    }
}

/// Style state of one drawable class: General layer, override deltas,
/// enable flags, and a memo cache of resolved effective styles.
#[derive(Debug, Clone)]
pub struct StyleSlot<T: StyleConfig> {
    general: T,
    overrides: ModeMap<Option<T::Delta>>,
    enabled: ModeMap<bool>,
    /// Bumped on every mutation; stamps the memo cache.
    version: u64,
    cache: RefCell<ModeMap<Option<(u64, T)>>>,
}

impl<T: StyleConfig> Default for StyleSlot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: StyleConfig> StyleSlot<T> {
    /// Create a slot with the given General configuration and no overrides.
    pub fn new(general: T) -> Self {
        Self {
            general,
            overrides: ModeMap::default(),
            enabled: ModeMap::default(),
            version: 0,
            cache: RefCell::new(ModeMap::default()),
        }
    }

    /// The General (base) configuration.
    pub fn general(&self) -> &T {
        &self.general
    }

    /// The stored override delta for a mode, if any.
    pub fn override_delta(&self, mode: InteractionMode) -> Option<&T::Delta> {
        self.overrides.get(mode).as_ref()
    }

    /// Whether the override for a mode is enabled.
    pub fn override_enabled(&self, mode: InteractionMode) -> bool {
        *self.enabled.get(mode)
    }

    /// Mutation counter, bumped on every change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Resolve the effective style for a mode.
    ///
    /// Memoized per mode on the slot's version counter: repeated reads
    /// between mutations hit the cache and are value-equal.
    pub fn effective(&self, mode: InteractionMode) -> T {
        if let Some((version, value)) = self.cache.borrow().get(mode) {
            if *version == self.version {
                return *value;
            }
        }

        let value = merge::resolve(
            &self.general,
            self.overrides.get(mode).as_ref(),
            self.override_enabled(mode),
        );
        *self.cache.borrow_mut().get_mut(mode) = Some((self.version, value));
        value
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    fn apply_action(&mut self, action: SlotAction<T>) {
        match action {
            SlotAction::UpdateGeneral(delta) => {
                self.general = self.general.apply(&delta);
            }
            SlotAction::UpdateOverride(mode, patch) => {
                let folded =
                    merge::fold_delta(&self.general, self.overrides.get(mode).as_ref(), &patch);
                *self.overrides.get_mut(mode) = folded;
            }
            SlotAction::ToggleOverride(mode, on) => {
                *self.enabled.get_mut(mode) = on;
            }
            SlotAction::ResetOverride(mode) => {
                *self.overrides.get_mut(mode) = None;
                *self.enabled.get_mut(mode) = false;
            }
            SlotAction::ResetClass => {
                *self = Self::default();
            }
        }
        self.bump();
    }

    /// Restore a slot from loaded state (settings blob).
    pub(crate) fn restore(
        general: T,
        overrides: ModeMap<Option<T::Delta>>,
        enabled: ModeMap<bool>,
    ) -> Self {
        Self {
            general,
            overrides,
            enabled,
            version: 0,
            cache: RefCell::new(ModeMap::default()),
        }
    }
}

/// Resolved style state of every drawable class.
///
/// This is the read surface the preview renderer consumes; mutation goes
/// through [`StyleStore::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct StyleSettings {
    pub line: StyleSlot<LineStyle>,
    pub circle: StyleSlot<CircleStyle>,
    pub polyline: StyleSlot<PolylineStyle>,
    pub rectangle: StyleSlot<RectangleStyle>,
    pub arc: StyleSlot<ArcStyle>,
    pub angle_measurement: StyleSlot<AngleStyle>,
    pub point: StyleSlot<PointStyle>,
}

impl StyleSettings {
    pub fn effective_line(&self, mode: InteractionMode) -> LineStyle {
        self.line.effective(mode)
    }

    pub fn effective_circle(&self, mode: InteractionMode) -> CircleStyle {
        self.circle.effective(mode)
    }

    pub fn effective_polyline(&self, mode: InteractionMode) -> PolylineStyle {
        self.polyline.effective(mode)
    }

    pub fn effective_rectangle(&self, mode: InteractionMode) -> RectangleStyle {
        self.rectangle.effective(mode)
    }

    pub fn effective_arc(&self, mode: InteractionMode) -> ArcStyle {
        self.arc.effective(mode)
    }

    pub fn effective_angle(&self, mode: InteractionMode) -> AngleStyle {
        self.angle_measurement.effective(mode)
    }

    pub fn effective_point(&self, mode: InteractionMode) -> PointStyle {
        self.point.effective(mode)
    }
}

/// Mutation of one drawable class's style slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotAction<T: StyleConfig> {
    /// Patch the General layer.
    UpdateGeneral(T::Delta),
    /// Fold a patch into the override delta of a mode.
    UpdateOverride(InteractionMode, T::Delta),
    /// Enable or disable the override of a mode.
    ToggleOverride(InteractionMode, bool),
    /// Drop the override delta and enable flag of a mode.
    ResetOverride(InteractionMode),
    /// Restore the whole class to factory state.
    ResetClass,
}

impl<T: StyleConfig> SlotAction<T> {
    fn is_toggle(&self) -> bool {
        matches!(self, SlotAction::ToggleOverride(_, _))
    }
}

/// Mutation of the style store; the single reducer entry point's input.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleAction {
    Line(SlotAction<LineStyle>),
    Circle(SlotAction<CircleStyle>),
    Polyline(SlotAction<PolylineStyle>),
    Rectangle(SlotAction<RectangleStyle>),
    Arc(SlotAction<ArcStyle>),
    AngleMeasurement(SlotAction<AngleStyle>),
    Point(SlotAction<PointStyle>),
}

impl StyleAction {
    /// The drawable class this action targets.
    pub fn class(&self) -> DrawableClass {
        match self {
            StyleAction::Line(_) => DrawableClass::Line,
            StyleAction::Circle(_) => DrawableClass::Circle,
            StyleAction::Polyline(_) => DrawableClass::Polyline,
            StyleAction::Rectangle(_) => DrawableClass::Rectangle,
            StyleAction::Arc(_) => DrawableClass::Arc,
            StyleAction::AngleMeasurement(_) => DrawableClass::AngleMeasurement,
            StyleAction::Point(_) => DrawableClass::Point,
        }
    }

    fn is_toggle(&self) -> bool {
        match self {
            StyleAction::Line(a) => a.is_toggle(),
            StyleAction::Circle(a) => a.is_toggle(),
            StyleAction::Polyline(a) => a.is_toggle(),
            StyleAction::Rectangle(a) => a.is_toggle(),
            StyleAction::Arc(a) => a.is_toggle(),
            StyleAction::AngleMeasurement(a) => a.is_toggle(),
            StyleAction::Point(a) => a.is_toggle(),
        }
    }
}

/// The style-resolution store: settings plus debounced persistence.
///
/// Owned by the composition root and passed by reference to consumers.
/// Boolean toggles persist immediately; every other mutation restarts the
/// debounce window. Persistence is fire-and-forget from the renderer's
/// perspective; the host polls [`StyleStore::maybe_persist`].
pub struct StyleStore<S: SettingsStorage> {
    settings: StyleSettings,
    saver: DebouncedSaver<S>,
}

impl<S: SettingsStorage> StyleStore<S> {
    /// Create a store with factory defaults.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            settings: StyleSettings::default(),
            saver: DebouncedSaver::new(storage, key),
        }
    }

    /// Load the store from the settings blob under `key`.
    ///
    /// A missing blob or any per-class parse failure falls back to factory
    /// defaults for the affected slot only; loading never fails the store.
    pub async fn load(storage: Arc<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let settings = match storage.load(&key).await {
            Ok(blob) => StyleSettings::from_json(&blob),
            Err(StorageError::NotFound(_)) => StyleSettings::default(),
            Err(err) => {
                log::warn!("failed to load style settings '{key}': {err}");
                StyleSettings::default()
            }
        };
        Self {
            settings,
            saver: DebouncedSaver::new(storage, key),
        }
    }

    /// Read access for style consumers.
    pub fn settings(&self) -> &StyleSettings {
        &self.settings
    }

    /// The single serialized mutation entry point.
    pub fn dispatch(&mut self, action: StyleAction) {
        let urgent = action.is_toggle();
        match action {
            StyleAction::Line(a) => self.settings.line.apply_action(a),
            StyleAction::Circle(a) => self.settings.circle.apply_action(a),
            StyleAction::Polyline(a) => self.settings.polyline.apply_action(a),
            StyleAction::Rectangle(a) => self.settings.rectangle.apply_action(a),
            StyleAction::Arc(a) => self.settings.arc.apply_action(a),
            StyleAction::AngleMeasurement(a) => self.settings.angle_measurement.apply_action(a),
            StyleAction::Point(a) => self.settings.point.apply_action(a),
        }

        if urgent {
            self.saver.mark_urgent();
        } else {
            self.saver.mark_dirty();
        }
    }

    /// Whether a persistence write is still outstanding.
    pub fn is_dirty(&self) -> bool {
        self.saver.is_dirty()
    }

    /// Flush the settings blob if the debounce window elapsed (or a toggle
    /// requested an immediate write). Returns whether a write happened.
    ///
    /// A failed write logs a warning, leaves the store dirty for the next
    /// poll, and never touches the in-memory state.
    pub async fn maybe_persist(&mut self) -> StorageResult<bool> {
        if !self.saver.should_flush() {
            return Ok(false);
        }
        self.persist_now().await?;
        Ok(true)
    }

    /// Flush the settings blob unconditionally.
    pub async fn persist_now(&mut self) -> StorageResult<()> {
        let blob = self
            .settings
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.saver.flush(&blob).await
    }
}
