//! Text input contract tests
//!
//! These tests define the stable wire contract between the text input
//! service and its host client.

// ===== Contract Version =====
const TEXT_INPUT_SCHEMA_VERSION: ipc::SchemaVersion = ipc::SchemaVersion::new(1, 0);

// ===== Channel =====
const CHANNEL: &str = "host/textinput";

// ===== Inbound Methods =====
const METHOD_SET_CLIENT: &str = "TextInput.setClient";
const METHOD_CLEAR_CLIENT: &str = "TextInput.clearClient";
const METHOD_SET_EDITING_STATE: &str = "TextInput.setEditingState";
const METHOD_SHOW: &str = "TextInput.show";
const METHOD_HIDE: &str = "TextInput.hide";

// ===== Outbound Methods =====
const METHOD_UPDATE_EDITING_STATE: &str = "TextInputClient.updateEditingState";
const METHOD_PERFORM_ACTION: &str = "TextInputClient.performAction";

// ===== Error Codes =====
const CODE_BAD_ARGUMENTS: &str = "Bad Arguments";
const CODE_INTERNAL_CONSISTENCY: &str = "Internal Consistency Error";

// ===== Record Field Names =====
const EDITING_STATE_FIELDS: [&str; 7] = [
    "composingBase",
    "composingExtent",
    "selectionAffinity",
    "selectionBase",
    "selectionExtent",
    "selectionIsDirectional",
    "text",
];
