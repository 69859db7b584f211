//! Appcast - update metadata and license server for a companion mobile app
//!
//! This library provides the core functionality for the Appcast backend,
//! including the flat-file JSON store, license code handling, and the
//! operator/device HTTP handlers.

pub mod code;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod store;
