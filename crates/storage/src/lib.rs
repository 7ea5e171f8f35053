//! Storage layer for FitCheck
//!
//! This crate provides the durable key-value store that backs the
//! client's persisted state (the session token).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;

pub use kv::{KvConfig, KvError, KvStore};
