//! # Text Input Service
//!
//! This crate implements the handler that owns text input client models and
//! routes editing traffic between the host and the editing state machine.
//!
//! ## Philosophy
//!
//! - **Exclusive ownership**: The service owns every model; state crosses
//!   the boundary by value, never by shared reference
//! - **Explicit active client**: Exactly zero or one client receives
//!   keyboard-routed mutations; switching is a table lookup, not a mutation
//! - **Bounded**: The client table has a fixed capacity; creation beyond it
//!   is rejected, never evicted
//! - **Auditable**: Client lifecycle changes are recorded as structured
//!   events
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The editing state machine (see `text_input_core`)
//! - A window system integration (no real key capture, no IME plumbing)
//! - A focus manager for anything beyond its own client table

use std::collections::HashMap;

use ipc::{MethodCall, MethodReply, MethodResult, SchemaVersion};
use serde::{Deserialize, Serialize};
use text_input_core::{TextInputModel, TextModelError};
use text_input_types::{
    ClientConfig, ClientId, EditingState, EditingStateUpdate, InputEvent, KeyCode, KeyEvent,
};
use thiserror::Error;

/// Channel the text input surface speaks on, both directions.
pub const TEXT_INPUT_CHANNEL: &str = "host/textinput";

/// Text input schema version (v1.0).
pub const TEXT_INPUT_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

/// Method: activate a client, creating its model on first sight.
pub const SET_CLIENT_METHOD: &str = "TextInput.setClient";

/// Method: deactivate the active client.
pub const CLEAR_CLIENT_METHOD: &str = "TextInput.clearClient";

/// Method: replace the active model's editing state.
pub const SET_EDITING_STATE_METHOD: &str = "TextInput.setEditingState";

/// Method: show the input surface (no-op at this layer).
pub const SHOW_METHOD: &str = "TextInput.show";

/// Method: hide the input surface (no-op at this layer).
pub const HIDE_METHOD: &str = "TextInput.hide";

/// Callback: push the exported editing state to the host.
pub const UPDATE_EDITING_STATE_METHOD: &str = "TextInputClient.updateEditingState";

/// Callback: report a submit action to the host.
pub const PERFORM_ACTION_METHOD: &str = "TextInputClient.performAction";

/// Error code for malformed or missing arguments.
pub const BAD_ARGUMENTS_CODE: &str = "Bad Arguments";

/// Error code for operations against missing clients or exhausted capacity.
pub const INTERNAL_CONSISTENCY_CODE: &str = "Internal Consistency Error";

/// Maximum number of client models tracked at once.
pub const CLIENT_MODEL_LIMIT: usize = 256;

/// Text input service error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextInputServiceError {
    #[error("Invalid client config: {0}")]
    InvalidClientConfig(TextModelError),

    #[error("Invalid editing state: {0}")]
    InvalidEditingState(TextModelError),

    #[error("Malformed arguments: {reason}")]
    MalformedArgs { reason: String },

    #[error("No client is set")]
    NoActiveClient,

    #[error("Client limit reached ({limit}); refusing to create a new model")]
    ClientLimitReached { limit: usize },

    #[error("Schema version {received} is incompatible with {supported}")]
    IncompatibleSchema {
        received: SchemaVersion,
        supported: SchemaVersion,
    },

    #[error("Callback delivery failed: {reason}")]
    DeliveryFailed { reason: String },
}

impl TextInputServiceError {
    /// Returns the stable wire error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoActiveClient | Self::ClientLimitReached { .. } => INTERNAL_CONSISTENCY_CODE,
            _ => BAD_ARGUMENTS_CODE,
        }
    }
}

/// Arguments for [`SET_CLIENT_METHOD`]: `[client id, client config]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetClientArgs(pub ClientId, pub ClientConfig);

/// Arguments for [`UPDATE_EDITING_STATE_METHOD`]: `[client id, state]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEditingStateArgs(pub ClientId, pub EditingState);

/// Arguments for [`PERFORM_ACTION_METHOD`]: `[client id, input action]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformActionArgs(pub ClientId, pub String);

/// Sink interface for callbacks toward the host client.
pub trait HostSink {
    fn invoke(&mut self, call: MethodCall) -> Result<(), TextInputServiceError>;
}

/// Client lifecycle event for the audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// A model was created for a client id
    Registered { client: ClientId, sequence: u64 },
    /// A client became the active one
    Activated { client: ClientId, sequence: u64 },
    /// The active client was deactivated
    Cleared { client: ClientId, sequence: u64 },
}

/// Text input service
///
/// Owns the table of client models and the active-client reference, and
/// dispatches host method calls and keyboard events to the active model.
/// Driven synchronously by one dispatch context at a time.
pub struct TextInputService {
    /// Client models by client id
    models: HashMap<ClientId, TextInputModel>,
    /// Client currently receiving keyboard-routed mutations
    active_client: Option<ClientId>,
    /// Audit trail of client lifecycle events
    audit_trail: Vec<ClientEvent>,
    /// Next audit sequence number
    next_sequence: u64,
}

impl TextInputService {
    /// Creates a new text input service with an empty client table
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            active_client: None,
            audit_trail: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Returns the active client id, if any
    pub fn active_client(&self) -> Option<ClientId> {
        self.active_client
    }

    /// Returns the number of tracked client models
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Returns the audit trail
    pub fn audit_trail(&self) -> &[ClientEvent] {
        &self.audit_trail
    }

    /// Activates a client, creating its model on first sight
    ///
    /// Re-activating a known client reuses its existing model unchanged.
    /// Creation fails when the table is at capacity or the config is
    /// invalid; the previously active client stays active on failure.
    pub fn set_client(
        &mut self,
        client: ClientId,
        config: &ClientConfig,
    ) -> Result<(), TextInputServiceError> {
        if !self.models.contains_key(&client) {
            if self.models.len() >= CLIENT_MODEL_LIMIT {
                return Err(TextInputServiceError::ClientLimitReached {
                    limit: CLIENT_MODEL_LIMIT,
                });
            }
            let model = TextInputModel::from_config(config)
                .map_err(TextInputServiceError::InvalidClientConfig)?;
            self.models.insert(client, model);
            self.record(|sequence| ClientEvent::Registered { client, sequence });
        }
        self.active_client = Some(client);
        self.record(|sequence| ClientEvent::Activated { client, sequence });
        Ok(())
    }

    /// Deactivates the active client
    ///
    /// The model stays in the table, keyed by its client id.
    pub fn clear_client(&mut self) {
        if let Some(client) = self.active_client.take() {
            self.record(|sequence| ClientEvent::Cleared { client, sequence });
        }
    }

    /// Replaces the active model's editing state from an imported record
    pub fn set_editing_state(
        &mut self,
        update: &EditingStateUpdate,
    ) -> Result<(), TextInputServiceError> {
        let model = self.active_model_mut()?;
        model
            .set_editing_state(update)
            .map_err(TextInputServiceError::InvalidEditingState)
    }

    /// Exports the active model's editing state
    pub fn editing_state(&self) -> Result<EditingState, TextInputServiceError> {
        let client = self
            .active_client
            .ok_or(TextInputServiceError::NoActiveClient)?;
        let model = self
            .models
            .get(&client)
            .ok_or(TextInputServiceError::NoActiveClient)?;
        Ok(model.editing_state())
    }

    /// Handles a method call from the host, producing a correlated reply
    pub fn handle_method_call(&mut self, call: &MethodCall) -> MethodReply {
        MethodReply::for_call(call, self.apply_method(call))
    }

    fn apply_method(&mut self, call: &MethodCall) -> MethodResult {
        if !call
            .schema_version
            .is_compatible_with(&TEXT_INPUT_SCHEMA_VERSION)
        {
            return Self::failure(TextInputServiceError::IncompatibleSchema {
                received: call.schema_version,
                supported: TEXT_INPUT_SCHEMA_VERSION,
            });
        }

        match call.method.as_str() {
            // Show/hide carry no state at this layer.
            SHOW_METHOD | HIDE_METHOD => MethodResult::Success,
            CLEAR_CLIENT_METHOD => {
                self.clear_client();
                MethodResult::Success
            }
            SET_CLIENT_METHOD => match call.args.deserialize::<SetClientArgs>() {
                Ok(SetClientArgs(client, config)) => {
                    Self::to_result(self.set_client(client, &config))
                }
                Err(err) => Self::failure(TextInputServiceError::MalformedArgs {
                    reason: err.to_string(),
                }),
            },
            SET_EDITING_STATE_METHOD => match call.args.deserialize::<EditingStateUpdate>() {
                Ok(update) => Self::to_result(self.set_editing_state(&update)),
                Err(err) => Self::failure(TextInputServiceError::MalformedArgs {
                    reason: err.to_string(),
                }),
            },
            _ => MethodResult::NotImplemented,
        }
    }

    /// Routes an input event to the active model
    ///
    /// Silently ignored when no client is active. Callbacks go through the
    /// sink: an editing-state update after any change, and a perform-action
    /// callback when Enter signals submission.
    pub fn handle_input_event<S: HostSink>(
        &mut self,
        event: &InputEvent,
        sink: &mut S,
    ) -> Result<(), TextInputServiceError> {
        let client = match self.active_client {
            Some(client) => client,
            None => return Ok(()),
        };
        match event {
            InputEvent::Character(ch) => {
                self.active_model_mut()?.insert_char(*ch);
                self.send_state_update(client, sink)
            }
            InputEvent::Key(key) => {
                if !(key.is_pressed() || key.is_repeat()) {
                    return Ok(());
                }
                if key.code == KeyCode::Enter {
                    return self.enter_pressed(client, sink);
                }
                let changed = Self::apply_key(self.active_model_mut()?, key);
                if changed {
                    self.send_state_update(client, sink)?;
                }
                Ok(())
            }
        }
    }

    fn apply_key(model: &mut TextInputModel, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => model.move_up(),
            KeyCode::Down => model.move_down(),
            KeyCode::Left => model.move_back(),
            KeyCode::Right => model.move_forward(),
            KeyCode::Home => model.move_to_beginning(),
            KeyCode::End => model.move_to_end(),
            KeyCode::Backspace => model.backspace(),
            KeyCode::Delete => model.delete_forward(),
            _ => false,
        }
    }

    fn enter_pressed<S: HostSink>(
        &mut self,
        client: ClientId,
        sink: &mut S,
    ) -> Result<(), TextInputServiceError> {
        let model = self.active_model_mut()?;
        let inserted = model.insert_newline();
        let action = model.input_action().to_string();
        if inserted {
            self.send_state_update(client, sink)?;
        }
        // The submit action fires whether or not a newline went in.
        let call = Self::callback(PERFORM_ACTION_METHOD, &PerformActionArgs(client, action))?;
        sink.invoke(call)
    }

    fn send_state_update<S: HostSink>(
        &self,
        client: ClientId,
        sink: &mut S,
    ) -> Result<(), TextInputServiceError> {
        let state = self.editing_state()?;
        let call = Self::callback(
            UPDATE_EDITING_STATE_METHOD,
            &UpdateEditingStateArgs(client, state),
        )?;
        sink.invoke(call)
    }

    fn callback<T: Serialize>(
        method: &str,
        args: &T,
    ) -> Result<MethodCall, TextInputServiceError> {
        MethodCall::with_args(TEXT_INPUT_CHANNEL, method, TEXT_INPUT_SCHEMA_VERSION, args)
            .map_err(|err| TextInputServiceError::DeliveryFailed {
                reason: err.to_string(),
            })
    }

    fn active_model_mut(&mut self) -> Result<&mut TextInputModel, TextInputServiceError> {
        let client = self
            .active_client
            .ok_or(TextInputServiceError::NoActiveClient)?;
        self.models
            .get_mut(&client)
            .ok_or(TextInputServiceError::NoActiveClient)
    }

    fn record(&mut self, event: impl FnOnce(u64) -> ClientEvent) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.audit_trail.push(event(sequence));
    }

    fn to_result(outcome: Result<(), TextInputServiceError>) -> MethodResult {
        match outcome {
            Ok(()) => MethodResult::Success,
            Err(err) => Self::failure(err),
        }
    }

    fn failure(err: TextInputServiceError) -> MethodResult {
        MethodResult::error(err.code(), err.to_string())
    }
}

impl Default for TextInputService {
    fn default() -> Self {
        Self::new()
    }
}
