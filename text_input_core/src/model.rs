//! Text buffer, selection, and cursor state machine

use alloc::string::{String, ToString};
use core::fmt;

use text_input_types::{
    ClientConfig, EditingState, EditingStateUpdate, InputType, TextAffinity,
};

/// Line break character recognized by vertical navigation.
pub const LINE_BREAK: char = '\n';

/// Error produced by model construction or state import
///
/// Mutation and navigation operations never produce errors; these cover the
/// two entry points fed by externally supplied data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextModelError {
    /// Construction was attempted without an input type or input action
    MissingConfig,
    /// A state import omitted the text field
    MissingText,
    /// A state import omitted a selection bound
    MissingSelection,
}

impl fmt::Display for TextModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig => write!(f, "input_type and input_action must be non-empty"),
            Self::MissingText => write!(f, "editing state has no text"),
            Self::MissingSelection => write!(f, "editing state has no selection base/extent"),
        }
    }
}

/// Editing state machine for a single text input client
///
/// Offsets are code-unit indexes into `text`, always within `[0, len]`.
/// Equal selection bounds denote a caret; unequal bounds denote a selection
/// over the half-open range between their minimum and maximum.
#[derive(Debug)]
pub struct TextInputModel {
    text: String,
    selection_base: usize,
    selection_extent: usize,
    composing_base: i64,
    composing_extent: i64,
    text_affinity: TextAffinity,
    input_type: InputType,
    input_action: String,
}

impl TextInputModel {
    /// Creates an empty model
    ///
    /// Fails with [`TextModelError::MissingConfig`] when either the input
    /// type or the input action is empty; no partially built model exists.
    pub fn new(
        input_type: impl Into<String>,
        input_action: impl Into<String>,
    ) -> Result<Self, TextModelError> {
        let input_type = input_type.into();
        let input_action = input_action.into();
        if input_type.is_empty() || input_action.is_empty() {
            return Err(TextModelError::MissingConfig);
        }
        Ok(Self {
            text: String::new(),
            selection_base: 0,
            selection_extent: 0,
            composing_base: 0,
            composing_extent: 0,
            text_affinity: TextAffinity::Downstream,
            input_type: InputType::new(input_type),
            input_action,
        })
    }

    /// Creates a model from a client configuration record
    pub fn from_config(config: &ClientConfig) -> Result<Self, TextModelError> {
        Self::new(config.input_type.name.clone(), config.input_action.clone())
    }

    /// Returns the buffer contents
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the selection base offset
    pub fn selection_base(&self) -> usize {
        self.selection_base
    }

    /// Returns the selection extent offset
    pub fn selection_extent(&self) -> usize {
        self.selection_extent
    }

    /// Returns the action identifier surfaced to the host on submit
    pub fn input_action(&self) -> &str {
        &self.input_action
    }

    /// Replaces the full editing state from an imported record
    ///
    /// Fails, leaving the current state untouched, when the record omits the
    /// text or either selection bound. Selection bounds are clamped into
    /// `[0, len]`; composing bounds default to the clamped selection and are
    /// otherwise stored verbatim (the host owns their validity).
    pub fn set_editing_state(&mut self, update: &EditingStateUpdate) -> Result<(), TextModelError> {
        let text = update.text.as_ref().ok_or(TextModelError::MissingText)?;
        let (base, extent) = match (update.selection_base, update.selection_extent) {
            (Some(base), Some(extent)) => (base, extent),
            _ => return Err(TextModelError::MissingSelection),
        };

        let len = text.len() as i64;
        let base = base.clamp(0, len);
        let extent = extent.clamp(0, len);

        self.text = text.clone();
        self.selection_base = base as usize;
        self.selection_extent = extent as usize;
        self.composing_base = update.composing_base.unwrap_or(base);
        self.composing_extent = update.composing_extent.unwrap_or(extent);
        self.text_affinity = update
            .selection_affinity
            .as_deref()
            .map(TextAffinity::from_name)
            .unwrap_or_default();
        Ok(())
    }

    /// Exports the editing state as the host record
    pub fn editing_state(&self) -> EditingState {
        EditingState {
            composing_base: self.composing_base,
            composing_extent: self.composing_extent,
            selection_affinity: self.text_affinity.name().to_string(),
            selection_base: self.selection_base as i64,
            selection_extent: self.selection_extent as i64,
            selection_is_directional: false,
            text: self.text.clone(),
        }
    }

    /// Inserts a string at the caret, erasing any selection first
    ///
    /// The caret ends collapsed after the inserted text. Returns whether the
    /// buffer or cursor changed.
    pub fn insert_string(&mut self, string: &str) -> bool {
        let erased = self.erase_selection();
        if string.is_empty() {
            return erased;
        }
        self.text.insert_str(self.selection_base, string);
        let caret = self.selection_base + string.len();
        self.selection_base = caret;
        self.selection_extent = caret;
        true
    }

    /// Inserts a single character at the caret
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_string(ch.encode_utf8(&mut buf))
    }

    /// Deletes the selected range, collapsing the caret to its start
    ///
    /// No-op when the caret has no selection.
    pub fn erase_selection(&mut self) -> bool {
        if self.selection_base == self.selection_extent {
            return false;
        }
        let begin = self.selection_base.min(self.selection_extent);
        let end = self.selection_base.max(self.selection_extent);
        self.text.replace_range(begin..end, "");
        self.selection_base = begin;
        self.selection_extent = begin;
        true
    }

    /// Deletes the selection, or one code unit behind the caret
    ///
    /// When a selection was deleted, nothing further is removed. No-op with
    /// a caret at the beginning of the buffer.
    pub fn backspace(&mut self) -> bool {
        if self.erase_selection() {
            return true;
        }
        if self.selection_base == 0 {
            return false;
        }
        self.text.remove(self.selection_base - 1);
        self.selection_base -= 1;
        self.selection_extent = self.selection_base;
        true
    }

    /// Deletes the selection, or one code unit at the caret
    ///
    /// The caret does not move. No-op with a caret at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        if self.erase_selection() {
            return true;
        }
        if self.selection_base == self.text.len() {
            return false;
        }
        self.text.remove(self.selection_base);
        true
    }

    /// Collapses the caret at the given offset
    ///
    /// Returns false, without moving, when the offset is out of bounds or
    /// the caret is already collapsed there.
    pub fn move_cursor_to(&mut self, location: usize) -> bool {
        if location == self.selection_base && location == self.selection_extent {
            return false;
        }
        if location > self.text.len() {
            return false;
        }
        self.selection_base = location;
        self.selection_extent = location;
        true
    }

    /// Moves the caret to the beginning of the buffer
    pub fn move_to_beginning(&mut self) -> bool {
        if self.selection_base == 0 {
            return false;
        }
        self.move_cursor_to(0);
        true
    }

    /// Moves the caret to the end of the buffer
    pub fn move_to_end(&mut self) -> bool {
        if self.selection_base == self.text.len() {
            return false;
        }
        self.move_cursor_to(self.text.len());
        true
    }

    /// Advances the caret by one code unit
    pub fn move_forward(&mut self) -> bool {
        if self.selection_base == self.text.len() {
            return false;
        }
        self.move_cursor_to(self.selection_base + 1);
        true
    }

    /// Retreats the caret by one code unit
    pub fn move_back(&mut self) -> bool {
        if self.selection_base == 0 {
            return false;
        }
        self.move_cursor_to(self.selection_base - 1);
        true
    }

    /// Inserts a line break at the caret
    ///
    /// No-op unless the model's input type is the multiline classification.
    pub fn insert_newline(&mut self) -> bool {
        if !self.input_type.is_multiline() {
            return false;
        }
        self.insert_char(LINE_BREAK)
    }

    /// Moves the caret to the line above, preserving its column
    ///
    /// Multiline only. The target column is clamped to the end of the
    /// previous line when that line is shorter. A missing line break before
    /// the previous one counts as the virtual index -1, compensating for
    /// the first line having no leading break.
    pub fn move_up(&mut self) -> bool {
        if !self.input_type.is_multiline() || self.selection_base == 0 {
            return false;
        }
        let caret = self.selection_base;
        // Nearest break at or before caret - 1; without one there is no
        // line above.
        let previous_break = match self.text[..caret].rfind(LINE_BREAK) {
            Some(index) => index as i64,
            None => return false,
        };
        let before_previous = self.text[..previous_break as usize]
            .rfind(LINE_BREAK)
            .map(|index| index as i64)
            .unwrap_or(-1);

        let mut new_location = caret as i64 - previous_break + before_previous;
        // The previous line may be shorter than the caret's column; land at
        // its end instead of overshooting into the current line.
        if new_location > previous_break {
            new_location = previous_break;
        }
        if new_location < 0 {
            new_location = 0;
        }
        self.move_cursor_to(new_location as usize);
        true
    }

    /// Moves the caret to the line below, preserving its column
    ///
    /// Multiline only. No-op when no line break follows the caret. The
    /// target column is clamped to the end of the next line when that line
    /// is shorter, and to the end of the buffer on the last line.
    pub fn move_down(&mut self) -> bool {
        if !self.input_type.is_multiline() || self.selection_base == self.text.len() {
            return false;
        }
        let caret = self.selection_base;
        let next_break = match self.text[caret..].find(LINE_BREAK) {
            Some(index) => (caret + index) as i64,
            None => return false,
        };
        let previous_break = self.text[..caret]
            .rfind(LINE_BREAK)
            .map(|index| index as i64)
            .unwrap_or(-1);

        let mut new_location = caret as i64 - previous_break + next_break;
        // Clamp to the break after the next line so the caret moves down by
        // exactly one line.
        if let Some(index) = self.text[next_break as usize + 1..].find(LINE_BREAK) {
            let further_break = next_break + 1 + index as i64;
            if new_location > further_break {
                new_location = further_break;
            }
        }
        if new_location >= self.text.len() as i64 {
            new_location = self.text.len() as i64;
        }
        self.move_cursor_to(new_location as usize);
        true
    }
}
