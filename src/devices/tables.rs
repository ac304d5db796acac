//! Builtin controller tables.

use super::gamepad::GamepadType;
use super::profile::{
    AccessorDescriptor, Derivation, DeviceTables, ProfileDefinition, ProfileRegistry, SlotKind,
    SlotTable,
};
use crate::error::Result;

/// (logical key, label key, accessor)
type Row = (&'static str, &'static str, &'static str);

const GENERIC_BUTTONS: &[Row] = &[
    ("SOUTH_FACE", "GAMEPAD_BUTTON_SOUTH_FACE", "getSouthFace"),
    ("EAST_FACE", "GAMEPAD_BUTTON_EAST_FACE", "getEastFace"),
    ("WEST_FACE", "GAMEPAD_BUTTON_WEST_FACE", "getWestFace"),
    ("NORTH_FACE", "GAMEPAD_BUTTON_NORTH_FACE", "getNorthFace"),
    ("BACK", "GAMEPAD_BUTTON_BACK", "getBack"),
    ("GUIDE", "GAMEPAD_BUTTON_GUIDE", "getGuide"),
    ("START", "GAMEPAD_BUTTON_START", "getStart"),
    ("LEFT_STICK", "GAMEPAD_BUTTON_LEFT_STICK", "getLeftStick"),
    ("RIGHT_STICK", "GAMEPAD_BUTTON_RIGHT_STICK", "getRightStick"),
    ("LEFT_BUMPER", "GAMEPAD_BUTTON_LEFT_BUMPER", "getLeftBumper"),
    ("RIGHT_BUMPER", "GAMEPAD_BUTTON_RIGHT_BUMPER", "getRightBumper"),
    ("DPAD_UP", "GAMEPAD_BUTTON_DPAD_UP", "getDpadUp"),
    ("DPAD_DOWN", "GAMEPAD_BUTTON_DPAD_DOWN", "getDpadDown"),
    ("DPAD_LEFT", "GAMEPAD_BUTTON_DPAD_LEFT", "getDpadLeft"),
    ("DPAD_RIGHT", "GAMEPAD_BUTTON_DPAD_RIGHT", "getDpadRight"),
    ("MISC1", "GAMEPAD_BUTTON_MISC1", "getMisc1"),
    ("RIGHT_PADDLE_1", "GAMEPAD_BUTTON_RIGHT_PADDLE_1", "getRightPaddle1"),
    ("LEFT_PADDLE_1", "GAMEPAD_BUTTON_LEFT_PADDLE_1", "getLeftPaddle1"),
    ("RIGHT_PADDLE_2", "GAMEPAD_BUTTON_RIGHT_PADDLE_2", "getRightPaddle2"),
    ("LEFT_PADDLE_2", "GAMEPAD_BUTTON_LEFT_PADDLE_2", "getLeftPaddle2"),
    ("TOUCHPAD", "GAMEPAD_BUTTON_TOUCHPAD", "getTouchpad"),
    ("MISC2", "GAMEPAD_BUTTON_MISC2", "getMisc2"),
    ("MISC3", "GAMEPAD_BUTTON_MISC3", "getMisc3"),
    ("MISC4", "GAMEPAD_BUTTON_MISC4", "getMisc4"),
    ("MISC5", "GAMEPAD_BUTTON_MISC5", "getMisc5"),
    ("MISC6", "GAMEPAD_BUTTON_MISC6", "getMisc6"),
];

const GENERIC_AXES: &[Row] = &[
    ("LEFT_STICK_X", "GAMEPAD_AXIS_LEFT_STICK_X", "getLeftStickX"),
    ("LEFT_STICK_Y", "GAMEPAD_AXIS_LEFT_STICK_Y", "getLeftStickY"),
    ("RIGHT_STICK_X", "GAMEPAD_AXIS_RIGHT_STICK_X", "getRightStickX"),
    ("RIGHT_STICK_Y", "GAMEPAD_AXIS_RIGHT_STICK_Y", "getRightStickY"),
    ("LEFT_TRIGGER", "GAMEPAD_AXIS_LEFT_TRIGGER", "getLeftTrigger"),
    ("RIGHT_TRIGGER", "GAMEPAD_AXIS_RIGHT_TRIGGER", "getRightTrigger"),
];

const RUMBLE: &[Row] = &[
    ("LEFT_RUMBLE", "GAMEPAD_RUMBLE_LEFT", "kLeftRumble"),
    ("RIGHT_RUMBLE", "GAMEPAD_RUMBLE_RIGHT", "kRightRumble"),
    ("TRIGGER_LEFT_RUMBLE", "GAMEPAD_RUMBLE_LEFT_TRIGGER", "kLeftTriggerRumble"),
    ("TRIGGER_RIGHT_RUMBLE", "GAMEPAD_RUMBLE_RIGHT_TRIGGER", "kRightTriggerRumble"),
];

const LEDS: &[Row] = &[("LEDS", "GAMEPAD_LEDS", "setLeds")];

/// Buttons neither the XBOX nor the PlayStation layouts have.
const EXTRA_BUTTONS: &[&str] = &[
    "MISC1",
    "MISC2",
    "MISC3",
    "MISC4",
    "MISC5",
    "MISC6",
    "RIGHT_PADDLE_1",
    "LEFT_PADDLE_1",
    "RIGHT_PADDLE_2",
    "LEFT_PADDLE_2",
];

const HID_CHANNELS: u8 = 16;

fn table(rows: &[Row]) -> SlotTable {
    rows.iter()
        .map(|(key, label, accessor)| (*key, AccessorDescriptor::new(*label, *accessor)))
        .collect()
}

fn face(label: &str, accessor: &str, glyph: &str) -> AccessorDescriptor {
    AccessorDescriptor::new(label, accessor).with_comment(glyph)
}

fn generic_gamepad() -> DeviceTables {
    DeviceTables {
        buttons: Some(table(GENERIC_BUTTONS)),
        axes: Some(table(GENERIC_AXES)),
        rumble: Some(table(RUMBLE)),
        leds: Some(table(LEDS)),
    }
}

/// Raw HID: numbered buttons and axes, labelled by their number.
fn generic_hid() -> DeviceTables {
    let numbered = |method: &str| -> SlotTable {
        (1..=HID_CHANNELS)
            .map(|n| {
                let key = n.to_string();
                let descriptor = AccessorDescriptor::new(key.clone(), format!("{}({})", method, n));
                (key, descriptor)
            })
            .collect()
    };
    DeviceTables {
        buttons: Some(numbered("getRawButton")),
        axes: Some(numbered("getRawAxis")),
        rumble: Some(table(RUMBLE)),
        leds: Some(table(LEDS)),
    }
}

fn xbox() -> Derivation {
    Derivation::of(GamepadType::GamepadGeneric)
        .set(SlotKind::Button, "SOUTH_FACE", face("GAMEPAD_BUTTON_A", "getSouthFace", "A"))
        .set(SlotKind::Button, "EAST_FACE", face("GAMEPAD_BUTTON_B", "getEastFace", "B"))
        .set(SlotKind::Button, "WEST_FACE", face("GAMEPAD_BUTTON_X", "getWestFace", "X"))
        .set(SlotKind::Button, "NORTH_FACE", face("GAMEPAD_BUTTON_Y", "getNorthFace", "Y"))
        .remove(SlotKind::Button, EXTRA_BUTTONS)
        .remove(SlotKind::Button, &["TOUCHPAD"])
}

fn ps4() -> Derivation {
    Derivation::of(GamepadType::GamepadGeneric)
        .set(SlotKind::Button, "SOUTH_FACE", face("GAMEPAD_BUTTON_CROSS", "getSouthFace", "X"))
        .set(SlotKind::Button, "EAST_FACE", face("GAMEPAD_BUTTON_CIRCLE", "getEastFace", "O"))
        .set(SlotKind::Button, "WEST_FACE", face("GAMEPAD_BUTTON_SQUARE", "getWestFace", "□"))
        .set(SlotKind::Button, "NORTH_FACE", face("GAMEPAD_BUTTON_TRIANGLE", "getNorthFace", "Δ"))
        .remove(SlotKind::Button, EXTRA_BUTTONS)
}

/// The F310 has the XBOX layout but no rumble motors or LEDs.
fn logitech_f310() -> Derivation {
    Derivation::of(GamepadType::Xbox)
        .without(SlotKind::Rumble)
        .without(SlotKind::Led)
}

impl ProfileRegistry {
    /// Registry holding every builtin controller type. Bases are registered
    /// before the profiles that delegate to them.
    pub fn builtin() -> Result<Self> {
        let mut registry = ProfileRegistry::new();
        registry.register(GamepadType::None, ProfileDefinition::Tables(DeviceTables::default()))?;
        registry.register(GamepadType::GamepadGeneric, ProfileDefinition::Tables(generic_gamepad()))?;
        registry.register(GamepadType::GenericHid, ProfileDefinition::Tables(generic_hid()))?;
        registry.register(GamepadType::Xbox, ProfileDefinition::DerivedFrom(xbox()))?;
        registry.register(GamepadType::Ps4, ProfileDefinition::DerivedFrom(ps4()))?;
        registry.register(GamepadType::Ps5, ProfileDefinition::SameAs(GamepadType::Ps4))?;
        registry.register(GamepadType::LogitechF310, ProfileDefinition::DerivedFrom(logitech_f310()))?;
        tracing::info!("[DEVICES] Registered {} builtin device profiles", registry.len());
        Ok(registry)
    }
}
