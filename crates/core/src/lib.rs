//! Core types for the scripted call assistant
//!
//! This crate provides the data model shared by the other crates:
//! - Call configuration (`CallContext`)
//! - Conversation turns and their senders
//! - Injected turn identifiers and timestamps (`TurnStamper`)
//! - Error types

pub mod context;
pub mod conversation;
pub mod error;

pub use context::CallContext;
pub use conversation::{
    ConversationTurn, Sender, SequentialStamper, TurnId, TurnStamp, TurnStamper, UuidStamper,
};
pub use error::{Error, Result};
