//! Method calls, replies, and payload structure

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random message ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a message ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Msg({})", self.0)
    }
}

/// Schema version for message payload
///
/// This enables backward-compatible evolution of method contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version (breaking changes)
    pub major: u32,
    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl SchemaVersion {
    /// Creates a new schema version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Checks if this version is compatible with another
    ///
    /// Compatibility rules:
    /// - Same major version = compatible
    /// - Different major version = incompatible
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Type-erased message payload
///
/// Transports carry payloads without knowing the concrete argument types;
/// endpoints decode into the types the method contract names. JSON is the
/// wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Serialized data (JSON)
    data: Vec<u8>,
}

impl MessagePayload {
    /// Creates a new payload from serializable data
    pub fn new<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(data)?;
        Ok(Self { data: json })
    }

    /// Creates an empty payload (JSON null), for methods without arguments
    pub fn empty() -> Self {
        Self {
            data: b"null".to_vec(),
        }
    }

    /// Deserializes the payload into a specific type
    pub fn deserialize<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// A method invocation on a named channel
///
/// Both directions of the boundary use this shape: the host invokes service
/// methods, and the service invokes host callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Unique identifier for this call
    pub id: MessageId,
    /// Channel the call is addressed to
    pub channel: String,
    /// Method to invoke
    pub method: String,
    /// Schema version of the arguments
    pub schema_version: SchemaVersion,
    /// Serialized arguments (type-erased)
    pub args: MessagePayload,
}

impl MethodCall {
    /// Creates a new method call with a pre-encoded payload
    pub fn new(
        channel: impl Into<String>,
        method: impl Into<String>,
        schema_version: SchemaVersion,
        args: MessagePayload,
    ) -> Self {
        Self {
            id: MessageId::new(),
            channel: channel.into(),
            method: method.into(),
            schema_version,
            args,
        }
    }

    /// Creates a method call, encoding the given arguments
    pub fn with_args<T: Serialize>(
        channel: impl Into<String>,
        method: impl Into<String>,
        schema_version: SchemaVersion,
        args: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(
            channel,
            method,
            schema_version,
            MessagePayload::new(args)?,
        ))
    }
}

/// Outcome of a method invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodResult {
    /// The method was handled successfully
    Success,
    /// The method failed; `code` is a stable error class identifier
    Error { code: String, message: String },
    /// The channel does not handle this method
    NotImplemented,
}

impl MethodResult {
    /// Creates an error result
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns true if the invocation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Reply to a method call, correlated by the call's ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodReply {
    /// ID of the call this reply answers
    pub correlation_id: MessageId,
    /// Outcome of the invocation
    pub result: MethodResult,
}

impl MethodReply {
    /// Creates a reply for the given call
    pub fn for_call(call: &MethodCall, result: MethodResult) -> Self {
        Self {
            correlation_id: call.id,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestArgs {
        value: i32,
    }

    #[test]
    fn test_message_id_creation() {
        let id1 = MessageId::new();
        let id2 = MessageId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_message_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = MessageId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn test_schema_version_compatibility() {
        let v1_0 = SchemaVersion::new(1, 0);
        let v1_1 = SchemaVersion::new(1, 1);
        let v2_0 = SchemaVersion::new(2, 0);

        assert!(v1_0.is_compatible_with(&v1_1));
        assert!(v1_1.is_compatible_with(&v1_0));
        assert!(!v1_0.is_compatible_with(&v2_0));
        assert!(!v2_0.is_compatible_with(&v1_0));
    }

    #[test]
    fn test_payload_round_trip() {
        let args = TestArgs { value: 42 };
        let payload = MessagePayload::new(&args).unwrap();

        let decoded: TestArgs = payload.deserialize().unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_empty_payload_is_null() {
        let payload = MessagePayload::empty();
        assert_eq!(payload.as_bytes(), b"null");

        let decoded: Option<i32> = payload.deserialize().unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_method_call_creation() {
        let call = MethodCall::with_args(
            "host/testing",
            "Testing.doThing",
            SchemaVersion::new(1, 0),
            &TestArgs { value: 7 },
        )
        .unwrap();

        assert_eq!(call.channel, "host/testing");
        assert_eq!(call.method, "Testing.doThing");
        let decoded: TestArgs = call.args.deserialize().unwrap();
        assert_eq!(decoded.value, 7);
    }

    #[test]
    fn test_method_reply_correlation() {
        let call = MethodCall::new(
            "host/testing",
            "Testing.doThing",
            SchemaVersion::new(1, 0),
            MessagePayload::empty(),
        );
        let reply = MethodReply::for_call(&call, MethodResult::Success);

        assert_eq!(reply.correlation_id, call.id);
        assert!(reply.result.is_success());
    }

    #[test]
    fn test_method_result_error() {
        let result = MethodResult::error("Bad Arguments", "missing field");

        assert!(!result.is_success());
        match result {
            MethodResult::Error { code, message } => {
                assert_eq!(code, "Bad Arguments");
                assert_eq!(message, "missing field");
            }
            other => panic!("expected error result, got {:?}", other),
        }
    }

    #[test]
    fn test_method_call_serialization() {
        let call = MethodCall::with_args(
            "host/testing",
            "Testing.doThing",
            SchemaVersion::new(1, 0),
            &TestArgs { value: 9 },
        )
        .unwrap();

        let json = serde_json::to_string(&call).unwrap();
        let decoded: MethodCall = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.id, call.id);
        assert_eq!(decoded.method, call.method);
        assert_eq!(decoded.args, call.args);
    }
}
