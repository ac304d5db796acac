//! Display labels for device controls, looked up by message key.

use std::collections::HashMap;

const ENGLISH: &[(&str, &str)] = &[
    ("GAMEPAD", "Gamepad"),
    ("GAMEPAD_BUTTON_SOUTH_FACE", "South Face"),
    ("GAMEPAD_BUTTON_EAST_FACE", "East Face"),
    ("GAMEPAD_BUTTON_WEST_FACE", "West Face"),
    ("GAMEPAD_BUTTON_NORTH_FACE", "North Face"),
    ("GAMEPAD_BUTTON_A", "A"),
    ("GAMEPAD_BUTTON_B", "B"),
    ("GAMEPAD_BUTTON_X", "X"),
    ("GAMEPAD_BUTTON_Y", "Y"),
    ("GAMEPAD_BUTTON_CROSS", "Cross"),
    ("GAMEPAD_BUTTON_CIRCLE", "Circle"),
    ("GAMEPAD_BUTTON_SQUARE", "Square"),
    ("GAMEPAD_BUTTON_TRIANGLE", "Triangle"),
    ("GAMEPAD_BUTTON_BACK", "Back"),
    ("GAMEPAD_BUTTON_GUIDE", "Guide"),
    ("GAMEPAD_BUTTON_START", "Start"),
    ("GAMEPAD_BUTTON_LEFT_STICK", "Left Stick"),
    ("GAMEPAD_BUTTON_RIGHT_STICK", "Right Stick"),
    ("GAMEPAD_BUTTON_LEFT_BUMPER", "Left Bumper"),
    ("GAMEPAD_BUTTON_RIGHT_BUMPER", "Right Bumper"),
    ("GAMEPAD_BUTTON_DPAD_UP", "D-pad Up"),
    ("GAMEPAD_BUTTON_DPAD_DOWN", "D-pad Down"),
    ("GAMEPAD_BUTTON_DPAD_LEFT", "D-pad Left"),
    ("GAMEPAD_BUTTON_DPAD_RIGHT", "D-pad Right"),
    ("GAMEPAD_BUTTON_MISC1", "Misc 1"),
    ("GAMEPAD_BUTTON_MISC2", "Misc 2"),
    ("GAMEPAD_BUTTON_MISC3", "Misc 3"),
    ("GAMEPAD_BUTTON_MISC4", "Misc 4"),
    ("GAMEPAD_BUTTON_MISC5", "Misc 5"),
    ("GAMEPAD_BUTTON_MISC6", "Misc 6"),
    ("GAMEPAD_BUTTON_RIGHT_PADDLE_1", "Right Paddle 1"),
    ("GAMEPAD_BUTTON_LEFT_PADDLE_1", "Left Paddle 1"),
    ("GAMEPAD_BUTTON_RIGHT_PADDLE_2", "Right Paddle 2"),
    ("GAMEPAD_BUTTON_LEFT_PADDLE_2", "Left Paddle 2"),
    ("GAMEPAD_BUTTON_TOUCHPAD", "Touchpad"),
    ("GAMEPAD_AXIS_LEFT_STICK_X", "Left Stick X"),
    ("GAMEPAD_AXIS_LEFT_STICK_Y", "Left Stick Y"),
    ("GAMEPAD_AXIS_RIGHT_STICK_X", "Right Stick X"),
    ("GAMEPAD_AXIS_RIGHT_STICK_Y", "Right Stick Y"),
    ("GAMEPAD_AXIS_LEFT_TRIGGER", "Left Trigger"),
    ("GAMEPAD_AXIS_RIGHT_TRIGGER", "Right Trigger"),
    ("GAMEPAD_RUMBLE_LEFT", "Left Rumble"),
    ("GAMEPAD_RUMBLE_RIGHT", "Right Rumble"),
    ("GAMEPAD_RUMBLE_LEFT_TRIGGER", "Left Trigger Rumble"),
    ("GAMEPAD_RUMBLE_RIGHT_TRIGGER", "Right Trigger Rumble"),
    ("GAMEPAD_LEDS", "LEDs"),
    ("GAMEPAD_IS_DOWN", "is down"),
    ("GAMEPAD_PRESSED", "was pressed"),
    ("GAMEPAD_RELEASED", "was released"),
    ("GAMEPAD_EVENT_PRESSED", "On Pressed"),
    ("GAMEPAD_EVENT_RELEASED", "On Released"),
    ("GAMEPAD_EVENT_CHANGED", "On Changed"),
];

/// Message table for control labels. Keys without a message display as
/// themselves, which is how numbered HID buttons get their labels.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    messages: HashMap<String, String>,
}

impl Labels {
    pub fn english() -> Self {
        ENGLISH.iter().copied().collect()
    }

    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Adds or replaces messages, e.g. from a translation file.
    pub fn extend<K: Into<String>, V: Into<String>>(&mut self, messages: impl IntoIterator<Item = (K, V)>) {
        self.messages
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut labels = Labels::default();
        labels.extend(iter);
        labels
    }
}
