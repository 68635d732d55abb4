//! # Service Contract Tests
//!
//! This crate provides "golden" tests for the text input wire contract to
//! ensure it doesn't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The contract is written down as code
//! - **Testability first**: Contract tests fail when interfaces change
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! The text input module pins:
//! - Channel and method names, in both directions
//! - Editing-state record field names and the round-trip property
//! - Argument array shapes for setClient and the callbacks
//! - Error codes and the schema version

pub mod text_input;

/// Common test helpers for contract validation
pub mod test_helpers {
    use ipc::{MessagePayload, MethodCall, SchemaVersion};
    use serde::Serialize;

    /// Creates a test method call with encoded arguments
    pub fn create_test_call<T: Serialize>(
        channel: &str,
        method: &str,
        version: SchemaVersion,
        args: &T,
    ) -> MethodCall {
        let payload = MessagePayload::new(args).expect("Failed to serialize arguments");
        MethodCall::new(channel.to_string(), method.to_string(), version, payload)
    }

    /// Verifies a call has the expected channel, method, and version
    pub fn verify_call_contract(
        call: &MethodCall,
        expected_channel: &str,
        expected_method: &str,
        expected_version: SchemaVersion,
    ) {
        assert_eq!(
            call.channel, expected_channel,
            "Channel name changed: expected '{}', got '{}'",
            expected_channel, call.channel
        );
        assert_eq!(
            call.method, expected_method,
            "Method name changed: expected '{}', got '{}'",
            expected_method, call.method
        );
        assert_eq!(
            call.schema_version, expected_version,
            "Schema version changed: expected {}, got {}",
            expected_version, call.schema_version
        );
    }
}
