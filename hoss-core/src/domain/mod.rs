//! Core domain types
//!
//! Runs and their result envelopes as exposed by the Demon platform. These
//! types are shared between the client library and the CLI.

pub mod envelope;
pub mod run;
