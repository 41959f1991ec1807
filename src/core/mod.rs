//! Core types & traits: protocol-agnostic contracts for the alert tool.

pub mod content;
pub mod error;
pub mod tool;
