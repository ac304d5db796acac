//! # Gamepads
//!
//! Controller types, the per-project port assignment, and the Python
//! expressions that read a gamepad control.

use super::labels::Labels;
use super::profile::{DeviceProfile, ProfileRegistry, SlotKind};
use crate::error::{CompileError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_GAMEPAD_PORT: u8 = 0;
pub const MAX_GAMEPAD_PORT: u8 = 5;

/// Controller types a port can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadType {
    None,
    GamepadGeneric,
    LogitechF310,
    Xbox,
    Ps4,
    Ps5,
    GenericHid,
}

impl GamepadType {
    pub const ALL: [GamepadType; 7] = [
        GamepadType::None,
        GamepadType::GamepadGeneric,
        GamepadType::LogitechF310,
        GamepadType::Xbox,
        GamepadType::Ps4,
        GamepadType::Ps5,
        GamepadType::GenericHid,
    ];

    /// Name stored in project configuration and shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            GamepadType::None => "None",
            GamepadType::GamepadGeneric => "Generic Gamepad",
            GamepadType::LogitechF310 => "Logitech F310",
            GamepadType::Xbox => "XBOX Gamepad",
            GamepadType::Ps4 => "PlayStation 4 Gamepad",
            GamepadType::Ps5 => "PlayStation 5 Gamepad",
            GamepadType::GenericHid => "Generic HID",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        GamepadType::ALL
            .iter()
            .copied()
            .find(|ty| ty.display_name() == name)
    }
}

impl fmt::Display for GamepadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Port number to controller type, as stored in the project.
///
/// Values are kept as the stored strings so that an unrecognized controller
/// name degrades to the generic gamepad instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamepadPortConfig(BTreeMap<u8, String>);

impl Default for GamepadPortConfig {
    /// Logitech F310 on ports 0 and 1.
    fn default() -> Self {
        let mut config = Self::empty();
        config.set(0, GamepadType::LogitechF310);
        config.set(1, GamepadType::LogitechF310);
        config
    }
}

impl GamepadPortConfig {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, port: u8, gamepad: GamepadType) {
        self.0.insert(port, gamepad.display_name().to_string());
    }

    /// The controller on `port`. Unassigned ports have none; unrecognized
    /// names are treated as a generic gamepad.
    pub fn gamepad_for_port(&self, port: u8) -> GamepadType {
        match self.0.get(&port) {
            Some(name) if !name.is_empty() => {
                GamepadType::from_display_name(name).unwrap_or(GamepadType::GamepadGeneric)
            }
            _ => GamepadType::None,
        }
    }

    pub fn remove_none_entries(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, name)| name.as_str() != GamepadType::None.display_name())
                .map(|(port, name)| (*port, name.clone()))
                .collect(),
        )
    }

    pub fn ports_with_controllers(&self) -> Vec<u8> {
        self.0
            .keys()
            .copied()
            .filter(|port| self.gamepad_for_port(*port) != GamepadType::None)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        match self.0.keys().find(|port| **port > MAX_GAMEPAD_PORT) {
            Some(port) => Err(CompileError::InvalidConfig(format!(
                "gamepad port {} is outside {}..={}",
                port, MIN_GAMEPAD_PORT, MAX_GAMEPAD_PORT
            ))),
            None => Ok(()),
        }
    }

    /// The profile for the controller on `port`.
    pub fn profile_for_port<'r>(
        &self,
        registry: &'r ProfileRegistry,
        port: u8,
    ) -> Result<&'r DeviceProfile> {
        registry.resolve(self.gamepad_for_port(port))
    }
}

/// What a boolean button read reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    IsDown,
    WasPressed,
    WasReleased,
}

impl ButtonAction {
    pub const ALL: [ButtonAction; 3] = [
        ButtonAction::IsDown,
        ButtonAction::WasPressed,
        ButtonAction::WasReleased,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ButtonAction::IsDown => "IS_DOWN",
            ButtonAction::WasPressed => "WAS_PRESSED",
            ButtonAction::WasReleased => "WAS_RELEASED",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            ButtonAction::IsDown => "GAMEPAD_IS_DOWN",
            ButtonAction::WasPressed => "GAMEPAD_PRESSED",
            ButtonAction::WasReleased => "GAMEPAD_RELEASED",
        }
    }

    /// Appended to the button accessor's method name.
    pub fn suffix(self) -> &'static str {
        match self {
            ButtonAction::IsDown => "",
            ButtonAction::WasPressed => "Pressed",
            ButtonAction::WasReleased => "Released",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ButtonAction::ALL.iter().copied().find(|a| a.key() == key)
    }
}

/// Button edges an event handler can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    Pressed,
    Released,
    Changed,
}

impl ButtonEvent {
    pub const ALL: [ButtonEvent; 3] = [ButtonEvent::Pressed, ButtonEvent::Released, ButtonEvent::Changed];

    pub fn key(self) -> &'static str {
        match self {
            ButtonEvent::Pressed => "GAMEPAD_EVENT_PRESSED",
            ButtonEvent::Released => "GAMEPAD_EVENT_RELEASED",
            ButtonEvent::Changed => "GAMEPAD_EVENT_CHANGED",
        }
    }

    /// Events are labelled by their own key.
    pub fn label_key(self) -> &'static str {
        self.key()
    }
}

/// Placeholder receiver for the gamepad on `port` until the driver station
/// exposes its gamepads to generated code.
fn gamepad_expression(port: u8) -> String {
    format!("DriverStation.gamepads[{}]", port)
}

/// Python expression reading a button, or `None` when the profile has no
/// such button. The receiver is a placeholder.
pub fn method_for_button(
    profile: &DeviceProfile,
    port: u8,
    button: &str,
    action: ButtonAction,
) -> Option<String> {
    let descriptor = profile.accessor_for(SlotKind::Button, button)?;
    Some(format!(
        "{}.{}",
        gamepad_expression(port),
        descriptor.call(action.suffix())
    ))
}

/// Python expression reading an axis, or `None` when the profile has no such
/// axis. The receiver is a placeholder.
pub fn method_for_axis(profile: &DeviceProfile, port: u8, axis: &str) -> Option<String> {
    let descriptor = profile.accessor_for(SlotKind::Axis, axis)?;
    Some(format!("{}.{}", gamepad_expression(port), descriptor.call("")))
}

/// Placeholder emitted for a button event handler until the driver station
/// dispatches gamepad events.
pub fn event_handler_comment(event: ButtonEvent, button: &str, port: u8) -> String {
    format!("# {} for button {} on gamepad {}\n", event.key(), button, port)
}

/// Dropdown choices `(label, key)` for one kind of control. Empty when the
/// profile has no such controls.
pub fn slot_choices(profile: &DeviceProfile, slot: SlotKind, labels: &Labels) -> Vec<(String, String)> {
    profile
        .table(slot)
        .map(|table| {
            table
                .iter()
                .map(|(key, descriptor)| {
                    (labels.lookup(&descriptor.label_key).to_string(), key.to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn action_choices(labels: &Labels) -> Vec<(String, String)> {
    ButtonAction::ALL
        .iter()
        .map(|a| (labels.lookup(a.label_key()).to_string(), a.key().to_string()))
        .collect()
}

pub fn event_choices(labels: &Labels) -> Vec<(String, String)> {
    ButtonEvent::ALL
        .iter()
        .map(|e| (labels.lookup(e.label_key()).to_string(), e.key().to_string()))
        .collect()
}
