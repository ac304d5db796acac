//! # Device Profiles
//!
//! A profile maps logical control names ("SOUTH_FACE", "LEFT_STICK_X") to the
//! accessor a controller type exposes for them. Profiles may delegate to an
//! earlier profile; delegation is resolved once, at registration.

use super::gamepad::GamepadType;
use crate::error::{CompileError, Result};
use std::collections::HashMap;

/// The kinds of control a profile can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Button,
    Axis,
    Rumble,
    Led,
}

/// How one logical control is shown and reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorDescriptor {
    /// Key into [`super::Labels`] for the display label.
    pub label_key: String,
    /// Method name (or rumble type) emitted in generated code. May carry a
    /// fixed argument list, as in `getRawButton(3)`.
    pub accessor: String,
    /// Short hint such as the printed glyph on the button.
    pub comment: String,
}

impl AccessorDescriptor {
    pub fn new(label_key: impl Into<String>, accessor: impl Into<String>) -> Self {
        Self {
            label_key: label_key.into(),
            accessor: accessor.into(),
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Call expression for this accessor with `suffix` appended to the method
    /// name: `getA` + `Pressed` gives `getAPressed()`, `getRawButton(3)` +
    /// `Pressed` gives `getRawButtonPressed(3)`.
    pub fn call(&self, suffix: &str) -> String {
        match self.accessor.find('(') {
            Some(open) => format!(
                "{}{}{}",
                &self.accessor[..open],
                suffix,
                &self.accessor[open..]
            ),
            None => format!("{}{}()", self.accessor, suffix),
        }
    }
}

/// Insertion-ordered table of logical key to accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotTable {
    order: Vec<String>,
    entries: HashMap<String, AccessorDescriptor>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. Replacing keeps the entry's position.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: AccessorDescriptor) {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, descriptor);
    }

    pub fn remove(&mut self, key: &str) -> Option<AccessorDescriptor> {
        let removed = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    pub fn get(&self, key: &str) -> Option<&AccessorDescriptor> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccessorDescriptor)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|d| (key.as_str(), d)))
    }
}

impl<K: Into<String>> FromIterator<(K, AccessorDescriptor)> for SlotTable {
    fn from_iter<I: IntoIterator<Item = (K, AccessorDescriptor)>>(iter: I) -> Self {
        let mut table = SlotTable::new();
        for (key, descriptor) in iter {
            table.insert(key, descriptor);
        }
        table
    }
}

/// The effective tables of one controller type. A missing table means the
/// controller has no controls of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceTables {
    pub buttons: Option<SlotTable>,
    pub axes: Option<SlotTable>,
    pub rumble: Option<SlotTable>,
    pub leds: Option<SlotTable>,
}

impl DeviceTables {
    pub fn table(&self, slot: SlotKind) -> Option<&SlotTable> {
        match slot {
            SlotKind::Button => self.buttons.as_ref(),
            SlotKind::Axis => self.axes.as_ref(),
            SlotKind::Rumble => self.rumble.as_ref(),
            SlotKind::Led => self.leds.as_ref(),
        }
    }

    fn table_mut(&mut self, slot: SlotKind) -> &mut Option<SlotTable> {
        match slot {
            SlotKind::Button => &mut self.buttons,
            SlotKind::Axis => &mut self.axes,
            SlotKind::Rumble => &mut self.rumble,
            SlotKind::Led => &mut self.leds,
        }
    }
}

/// Overrides and deletions applied on top of a base profile.
#[derive(Debug, Clone)]
pub struct Derivation {
    pub base: GamepadType,
    pub overrides: Vec<(SlotKind, String, AccessorDescriptor)>,
    pub removals: Vec<(SlotKind, String)>,
    /// Whole tables the derived profile does not have.
    pub without: Vec<SlotKind>,
}

impl Derivation {
    pub fn of(base: GamepadType) -> Self {
        Self {
            base,
            overrides: Vec::new(),
            removals: Vec::new(),
            without: Vec::new(),
        }
    }

    pub fn set(mut self, slot: SlotKind, key: &str, descriptor: AccessorDescriptor) -> Self {
        self.overrides.push((slot, key.to_string(), descriptor));
        self
    }

    pub fn remove(mut self, slot: SlotKind, keys: &[&str]) -> Self {
        self.removals
            .extend(keys.iter().map(|key| (slot, key.to_string())));
        self
    }

    pub fn without(mut self, slot: SlotKind) -> Self {
        self.without.push(slot);
        self
    }

    fn apply(&self, base: &DeviceTables) -> DeviceTables {
        let mut tables = base.clone();
        for (slot, key, descriptor) in &self.overrides {
            tables
                .table_mut(*slot)
                .get_or_insert_with(SlotTable::new)
                .insert(key.clone(), descriptor.clone());
        }
        for (slot, key) in &self.removals {
            if let Some(table) = tables.table_mut(*slot) {
                table.remove(key);
            }
        }
        for slot in &self.without {
            *tables.table_mut(*slot) = None;
        }
        tables
    }
}

/// How a profile is declared at registration time.
#[derive(Debug, Clone)]
pub enum ProfileDefinition {
    Tables(DeviceTables),
    /// Identical to another profile.
    SameAs(GamepadType),
    DerivedFrom(Derivation),
}

/// A registered profile with its effective tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub id: GamepadType,
    pub tables: DeviceTables,
}

impl DeviceProfile {
    pub fn table(&self, slot: SlotKind) -> Option<&SlotTable> {
        self.tables.table(slot)
    }

    /// The accessor for one control. `None` when the profile has no table for
    /// `slot` or no entry for `key`; callers render nothing in that case.
    pub fn accessor_for(&self, slot: SlotKind, key: &str) -> Option<&AccessorDescriptor> {
        self.table(slot)?.get(key)
    }
}

/// Immutable-after-startup set of device profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<GamepadType, DeviceProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile, resolving any delegation against profiles already
    /// registered.
    pub fn register(&mut self, id: GamepadType, definition: ProfileDefinition) -> Result<()> {
        if self.profiles.contains_key(&id) {
            return Err(CompileError::DuplicateProfile(id.to_string()));
        }
        let tables = match definition {
            ProfileDefinition::Tables(tables) => tables,
            ProfileDefinition::SameAs(base) => self.resolve(base)?.tables.clone(),
            ProfileDefinition::DerivedFrom(derivation) => {
                derivation.apply(&self.resolve(derivation.base)?.tables)
            }
        };
        tracing::debug!(
            "[DEVICES] Registered profile '{}' ({} buttons, {} axes)",
            id,
            tables.buttons.as_ref().map_or(0, SlotTable::len),
            tables.axes.as_ref().map_or(0, SlotTable::len)
        );
        self.profiles.insert(id, DeviceProfile { id, tables });
        Ok(())
    }

    pub fn resolve(&self, id: GamepadType) -> Result<&DeviceProfile> {
        self.profiles
            .get(&id)
            .ok_or_else(|| CompileError::UnknownProfile(id.to_string()))
    }

    pub fn accessor_for(
        &self,
        id: GamepadType,
        slot: SlotKind,
        key: &str,
    ) -> Option<&AccessorDescriptor> {
        self.profiles.get(&id)?.accessor_for(slot, key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
