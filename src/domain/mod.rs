//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `report` - The canonical Lab Report value object, label enums, schema
//!   variants, and the pipeline error taxonomy
//! - `pipeline` - Pure pipeline stages turning raw model text into a
//!   validated Lab Report (extract, normalize, validate, screen, fall back)
//! - `telemetry` - Usage event construction and client IP hashing

pub mod pipeline;
pub mod report;
pub mod telemetry;
