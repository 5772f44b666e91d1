//! Data Transfer Objects for the platform API
//!
//! Request and response bodies that only exist on the wire.

pub mod ritual;
