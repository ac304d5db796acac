//! # Devices
//!
//! Data-driven controller profiles consumed by the generator and by the
//! gamepad node fields.

mod gamepad;
mod labels;
mod profile;
mod tables;

pub use gamepad::*;
pub use labels::Labels;
pub use profile::{
    AccessorDescriptor, Derivation, DeviceProfile, DeviceTables, ProfileDefinition,
    ProfileRegistry, SlotKind, SlotTable,
};
