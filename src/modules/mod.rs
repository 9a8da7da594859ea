//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like the media store.

pub mod storage;
