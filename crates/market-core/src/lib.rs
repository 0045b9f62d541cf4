//! Market Core Library
//!
//! Shared types, deterministic chart series, display helpers and the mock
//! market catalog for the prediction markets front-end.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod series;
pub mod types;

pub use error::{Error, Result};
