#![no_std]

//! # Text Input Core
//!
//! The text editing state machine behind the text input surface.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same operation sequence => same editing state
//! - **Total operations**: Navigation and mutation never fail on valid
//!   state; boundary conditions are reported as "nothing changed"
//! - **Mechanism over policy**: The model edits; hosts decide rendering,
//!   focus, and when to notify
//!
//! ## Design
//!
//! The core provides:
//! - TextInputModel: buffer, selection, composing range, and affinity
//! - Mutation operations returning whether anything changed
//! - Line-aware vertical navigation over soft line breaks
//! - Import/export of the host's editing-state record

extern crate alloc;

pub mod model;

pub use model::{TextInputModel, TextModelError, LINE_BREAK};
