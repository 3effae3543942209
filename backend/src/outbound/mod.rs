//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed user repository plus an in-memory
//!   substitute.
//!
//! Adapters only translate between domain types and store representations.

pub mod persistence;
