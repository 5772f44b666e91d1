//! Hoss Core
//!
//! Core types for the ritual run client.
//!
//! This crate contains:
//! - Domain types: runs, run statuses and result envelopes
//! - DTOs: request/response bodies of the Demon ritual API

pub mod domain;
pub mod dto;
