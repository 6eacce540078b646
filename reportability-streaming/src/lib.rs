//! # reportability-streaming
//!
//! The C1 stream framer: adapts an orchestrator run's lazy sequence of
//! [`reportability_orchestrator::AgentDelta`] values into the wire's lazy
//! sequence of `\r\n`-delimited JSON frames (spec.md §4.1).
//!
//! This is not a generic streaming toolkit — the engine answers exactly one
//! kind of stream, over exactly one transport (chunked HTTP, not true SSE
//! or WebSocket), so this crate is narrower than the teacher's own
//! streaming crate by design.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod frame;

pub use frame::{error_frame, DeltaFramer};
