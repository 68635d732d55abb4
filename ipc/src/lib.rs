//! # Inter-Process Communication (IPC)
//!
//! This crate defines the method-call message boundary between the text
//! input service and its host client.
//!
//! ## Philosophy
//!
//! - **Messages, not shared memory**: All communication is explicit message passing
//! - **Methods, not byte streams**: Calls name a channel and a method, and carry a typed payload
//! - **Traceable**: Every call has an ID; every reply is correlated to a call
//! - **Versionable**: Payloads carry a schema version so contracts can evolve
//!
//! ## Architecture
//!
//! A [`MethodCall`] is the unit of communication in both directions: the host
//! invokes service methods with one, and the service invokes host callbacks
//! with one. Each inbound call is answered by a [`MethodReply`] carrying a
//! [`MethodResult`]: success, a coded error, or "not implemented".
//!
//! Payloads are type-erased JSON ([`MessagePayload`]) so generic transports
//! can carry them without knowing the payload types.

pub mod message;

pub use message::{
    MessageId, MessagePayload, MethodCall, MethodReply, MethodResult, SchemaVersion,
};
