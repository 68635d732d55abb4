#![no_std]

//! # Text Input Types
//!
//! This crate defines the wire and domain types for the text input surface.
//!
//! ## Philosophy
//!
//! - **Records, not ad-hoc maps**: Editing state crosses the boundary as a
//!   fixed record with stable field names
//! - **Events, not scan codes**: Key input is structured events, already
//!   mapped to logical keys
//! - **Explicit defaults**: Absent fields have defined meanings, decided by
//!   the consumer, never silently invented by the transport
//! - **Testable**: Every record is serializable and can be built in tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The editing state machine (see `text_input_core`)
//! - A hardware input driver
//! - A rich-text or styled-span model

extern crate alloc;

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Wire literal for downstream caret affinity.
pub const AFFINITY_DOWNSTREAM: &str = "TextAffinity.downstream";

/// Wire literal for upstream caret affinity.
pub const AFFINITY_UPSTREAM: &str = "TextAffinity.upstream";

/// Input type name that enables newline insertion and vertical navigation.
pub const MULTILINE_INPUT_TYPE: &str = "TextInputType.multiline";

/// Unique identifier for a text input client
///
/// Client IDs are assigned by the host and carried verbatim on every
/// callback, so the host can route updates to the right editable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(i64);

impl ClientId {
    /// Creates a client ID from the host's raw integer ID
    pub const fn from_raw(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer ID
    pub fn as_raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client({})", self.0)
    }
}

/// Which side of an offset boundary the caret visually attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAffinity {
    /// Caret attaches to the following character (the default)
    #[default]
    Downstream,
    /// Caret attaches to the preceding character
    Upstream,
}

impl TextAffinity {
    /// Parses a wire affinity name
    ///
    /// Only the exact upstream literal is distinct; every other value
    /// (including unrecognized strings) is downstream.
    pub fn from_name(name: &str) -> Self {
        if name == AFFINITY_UPSTREAM {
            Self::Upstream
        } else {
            Self::Downstream
        }
    }

    /// Returns the wire name for this affinity
    pub fn name(&self) -> &'static str {
        match self {
            Self::Downstream => AFFINITY_DOWNSTREAM,
            Self::Upstream => AFFINITY_UPSTREAM,
        }
    }
}

impl fmt::Display for TextAffinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Input type classification for a client
///
/// The name is an opaque classification string fixed at construction; only
/// the multiline classification changes model behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputType {
    name: String,
}

impl InputType {
    /// Creates an input type from its classification name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the classification name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this classification permits line breaks
    pub fn is_multiline(&self) -> bool {
        self.name == MULTILINE_INPUT_TYPE
    }
}

/// Input type section of a client configuration record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTypeConfig {
    /// Classification name, e.g. `"TextInputType.multiline"`
    #[serde(default)]
    pub name: String,
}

/// Client configuration record, supplied when a client registers
///
/// Both fields are required and must be non-empty; absent fields decode to
/// empty strings and are rejected at model construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Action identifier surfaced to the host on submit
    #[serde(default, rename = "inputAction")]
    pub input_action: String,
    /// Input type classification
    #[serde(default, rename = "inputType")]
    pub input_type: InputTypeConfig,
}

impl ClientConfig {
    /// Creates a configuration record
    pub fn new(input_type_name: impl Into<String>, input_action: impl Into<String>) -> Self {
        Self {
            input_action: input_action.into(),
            input_type: InputTypeConfig {
                name: input_type_name.into(),
            },
        }
    }
}

/// Editing state record exported toward the host
///
/// Field names are fixed by contract; `selection_is_directional` is always
/// emitted as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditingState {
    /// IME composition start
    #[serde(rename = "composingBase")]
    pub composing_base: i64,
    /// IME composition end
    #[serde(rename = "composingExtent")]
    pub composing_extent: i64,
    /// Caret affinity wire name
    #[serde(rename = "selectionAffinity")]
    pub selection_affinity: String,
    /// Selection start
    #[serde(rename = "selectionBase")]
    pub selection_base: i64,
    /// Selection end
    #[serde(rename = "selectionExtent")]
    pub selection_extent: i64,
    /// Always `false`
    #[serde(rename = "selectionIsDirectional")]
    pub selection_is_directional: bool,
    /// Full buffer contents
    pub text: String,
}

/// Editing state record imported from the host
///
/// Every field is optional at the wire level; the model decides absence
/// semantics (`text` and both selection bounds are required, composing
/// bounds default to the selection, affinity defaults to downstream).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditingStateUpdate {
    /// Full buffer contents
    #[serde(default)]
    pub text: Option<String>,
    /// Selection start
    #[serde(default, rename = "selectionBase")]
    pub selection_base: Option<i64>,
    /// Selection end
    #[serde(default, rename = "selectionExtent")]
    pub selection_extent: Option<i64>,
    /// IME composition start
    #[serde(default, rename = "composingBase")]
    pub composing_base: Option<i64>,
    /// IME composition end
    #[serde(default, rename = "composingExtent")]
    pub composing_extent: Option<i64>,
    /// Caret affinity wire name
    #[serde(default, rename = "selectionAffinity")]
    pub selection_affinity: Option<String>,
}

impl EditingStateUpdate {
    /// Creates an update with the required text and selection fields
    pub fn new(text: impl Into<String>, selection_base: i64, selection_extent: i64) -> Self {
        Self {
            text: Some(text.into()),
            selection_base: Some(selection_base),
            selection_extent: Some(selection_extent),
            composing_base: None,
            composing_extent: None,
            selection_affinity: None,
        }
    }

    /// Adds explicit composing bounds
    pub fn with_composing(mut self, base: i64, extent: i64) -> Self {
        self.composing_base = Some(base);
        self.composing_extent = Some(extent);
        self
    }

    /// Adds an explicit affinity wire name
    pub fn with_affinity(mut self, name: impl Into<String>) -> Self {
        self.selection_affinity = Some(name.into());
        self
    }
}

/// Key state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Key was pressed down
    Pressed,
    /// Key was released
    Released,
    /// Key is auto-repeating
    Repeat,
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressed => write!(f, "pressed"),
            Self::Released => write!(f, "released"),
            Self::Repeat => write!(f, "repeat"),
        }
    }
}

/// Logical key codes routed to the editing model
///
/// Only the keys this surface acts on are named; everything else arrives as
/// `Unknown` and is ignored by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Unknown,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Modifier keys active during a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Alt key
    pub const ALT: Self = Self { bits: 1 << 1 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 2 };
    /// Meta/Super key
    pub const META: Self = Self { bits: 1 << 3 };

    /// Creates a modifier set with no modifiers
    pub fn none() -> Self {
        Self::NONE
    }

    /// Adds a modifier
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Checks if a modifier is present
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Returns true if no modifiers are pressed
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// Keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key that changed state
    pub code: KeyCode,
    /// Modifier keys that were active
    pub modifiers: Modifiers,
    /// Event state (pressed, released, repeat)
    pub state: KeyState,
}

impl KeyEvent {
    /// Creates a new key event
    pub fn new(code: KeyCode, modifiers: Modifiers, state: KeyState) -> Self {
        Self {
            code,
            modifiers,
            state,
        }
    }

    /// Creates a key pressed event
    pub fn pressed(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Pressed)
    }

    /// Creates a key released event
    pub fn released(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Released)
    }

    /// Creates a key repeat event
    pub fn repeat(code: KeyCode, modifiers: Modifiers) -> Self {
        Self::new(code, modifiers, KeyState::Repeat)
    }

    /// Returns true if this is a press event
    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }

    /// Returns true if this is a repeat event
    pub fn is_repeat(&self) -> bool {
        self.state == KeyState::Repeat
    }
}

/// Input event forwarded from the windowing layer
///
/// Key events carry logical keys; character events carry the code point
/// produced by the platform's character input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Keyboard event
    Key(KeyEvent),
    /// Committed character input
    Character(char),
}

impl InputEvent {
    /// Creates a key event
    pub fn key(event: KeyEvent) -> Self {
        Self::Key(event)
    }

    /// Creates a character event
    pub fn character(ch: char) -> Self {
        Self::Character(ch)
    }

    /// Returns the key event if this is one
    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(event) => Some(event),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_client_id_round_trip() {
        let id = ClientId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.to_string(), "Client(42)");
    }

    #[test]
    fn test_client_id_serializes_as_bare_integer() {
        let id = ClientId::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");

        let decoded: ClientId = serde_json::from_str("7").unwrap();
        assert_eq!(decoded, id);
    }

    #[test]
    fn test_affinity_from_name() {
        assert_eq!(
            TextAffinity::from_name(AFFINITY_UPSTREAM),
            TextAffinity::Upstream
        );
        assert_eq!(
            TextAffinity::from_name(AFFINITY_DOWNSTREAM),
            TextAffinity::Downstream
        );
        // Unrecognized values normalize to downstream.
        assert_eq!(
            TextAffinity::from_name("TextAffinity.sideways"),
            TextAffinity::Downstream
        );
        assert_eq!(TextAffinity::from_name(""), TextAffinity::Downstream);
    }

    #[test]
    fn test_affinity_default_is_downstream() {
        assert_eq!(TextAffinity::default(), TextAffinity::Downstream);
    }

    #[test]
    fn test_input_type_multiline() {
        assert!(InputType::new(MULTILINE_INPUT_TYPE).is_multiline());
        assert!(!InputType::new("TextInputType.text").is_multiline());
    }

    #[test]
    fn test_client_config_decodes_wire_names() {
        let json = r#"{"inputAction":"TextInputAction.done","inputType":{"name":"TextInputType.text"}}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.input_action, "TextInputAction.done");
        assert_eq!(config.input_type.name, "TextInputType.text");
    }

    #[test]
    fn test_client_config_missing_fields_decode_empty() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert!(config.input_action.is_empty());
        assert!(config.input_type.name.is_empty());
    }

    #[test]
    fn test_editing_state_field_names() {
        let state = EditingState {
            composing_base: 0,
            composing_extent: 0,
            selection_affinity: AFFINITY_DOWNSTREAM.to_string(),
            selection_base: 1,
            selection_extent: 2,
            selection_is_directional: false,
            text: "hi".to_string(),
        };

        let json = serde_json::to_string(&state).unwrap();
        for key in [
            "composingBase",
            "composingExtent",
            "selectionAffinity",
            "selectionBase",
            "selectionExtent",
            "selectionIsDirectional",
            "text",
        ] {
            assert!(json.contains(key), "missing field {} in {}", key, json);
        }
    }

    #[test]
    fn test_editing_state_update_defaults() {
        let update: EditingStateUpdate =
            serde_json::from_str(r#"{"text":"abc","selectionBase":1,"selectionExtent":1}"#)
                .unwrap();

        assert_eq!(update.text.as_deref(), Some("abc"));
        assert_eq!(update.selection_base, Some(1));
        assert_eq!(update.selection_extent, Some(1));
        assert_eq!(update.composing_base, None);
        assert_eq!(update.composing_extent, None);
        assert_eq!(update.selection_affinity, None);
    }

    #[test]
    fn test_editing_state_update_builder() {
        let update = EditingStateUpdate::new("abc", 0, 2)
            .with_composing(1, 2)
            .with_affinity(AFFINITY_UPSTREAM);

        assert_eq!(update.composing_base, Some(1));
        assert_eq!(update.composing_extent, Some(2));
        assert_eq!(update.selection_affinity.as_deref(), Some(AFFINITY_UPSTREAM));
    }

    #[test]
    fn test_export_record_decodes_as_update() {
        let state = EditingState {
            composing_base: 3,
            composing_extent: 4,
            selection_affinity: AFFINITY_UPSTREAM.to_string(),
            selection_base: 3,
            selection_extent: 4,
            selection_is_directional: false,
            text: "round".to_string(),
        };

        let json = serde_json::to_string(&state).unwrap();
        let update: EditingStateUpdate = serde_json::from_str(&json).unwrap();

        assert_eq!(update.text.as_deref(), Some("round"));
        assert_eq!(update.selection_base, Some(3));
        assert_eq!(update.composing_extent, Some(4));
        assert_eq!(update.selection_affinity.as_deref(), Some(AFFINITY_UPSTREAM));
    }

    #[test]
    fn test_key_event_constructors() {
        let event = KeyEvent::pressed(KeyCode::Backspace, Modifiers::none());
        assert!(event.is_pressed());
        assert!(!event.is_repeat());

        let event = KeyEvent::repeat(KeyCode::Left, Modifiers::none());
        assert!(event.is_repeat());

        let event = KeyEvent::released(KeyCode::Left, Modifiers::none());
        assert!(!event.is_pressed());
        assert!(!event.is_repeat());
    }

    #[test]
    fn test_modifiers_combination() {
        let mods = Modifiers::CTRL.with(Modifiers::SHIFT);
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
        assert!(!mods.is_empty());
        assert!(Modifiers::none().is_empty());
    }

    #[test]
    fn test_input_event_as_key() {
        let key = KeyEvent::pressed(KeyCode::Enter, Modifiers::none());
        let event = InputEvent::key(key);
        assert_eq!(event.as_key(), Some(&key));

        let event = InputEvent::character('x');
        assert_eq!(event.as_key(), None);
    }

    #[test]
    fn test_input_event_serialization() {
        let event = InputEvent::key(KeyEvent::pressed(KeyCode::Down, Modifiers::none()));
        let json = serde_json::to_string(&event).unwrap();
        let decoded: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);

        let event = InputEvent::character('q');
        let json = serde_json::to_string(&event).unwrap();
        let decoded: InputEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}
