//! Desktop alerts with a sound cue, served as the `send_notification` MCP tool.
//!
//! - `tools::alert` handles one tool call: parse, notify, play sound, report
//! - `sound` classifies sound specifiers and drives the host's audio players
//! - `infra` carries config, logging and the stdio / streamable HTTP transports

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod sound;
pub mod tools;
